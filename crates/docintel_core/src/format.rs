//! Result formatters: pure functions from service payloads to view trees.
//!
//! None of these functions fail. Absent and empty fields both degrade to
//! "not shown", malformed table rows are skipped, and missing pages render
//! as `?`.

use crate::model::{CollectionBatch, DocumentResult, Heading, RankedItem, Table};
use crate::view::{el, icon, Element, ViewNode};

/// Route under which the service serves stored result files.
pub const DOWNLOAD_ROUTE: &str = "/api/download/";

const NO_HEADINGS_NOTE: &str = " This is normal for PDFs without structured headings \
(like brochures, forms, or scanned documents). Text extraction still works!";

const NO_RANKED_SECTIONS_NOTE: &str = "No specific sections were ranked. The document may not \
have clear headings, or the content may not be strongly related to the specified task.";

const NOT_SPECIFIED: &str = "Not specified";

/// Link target for a stored result; the token is used verbatim.
pub fn download_href(result_file: &str) -> String {
    format!("{DOWNLOAD_ROUTE}{result_file}")
}

/// Summary, download link, outline, ranked sections and tables of one
/// processed document, in that order.
pub fn format_single_result(result: &DocumentResult, result_file: Option<&str>) -> ViewNode {
    let mut root = el("div").class("single-result").child(summary_row(result, result_file));

    if !result.outline().is_empty() {
        let entries = result.outline().iter().map(outline_badge_entry);
        root = root.child(
            el("div")
                .class("mt-4 document-outline")
                .child(section_title("h5", "fas fa-list", "Document Outline"))
                .child(el("div").class("result-item").children(entries)),
        );
    }

    if !result.ranked_sections().is_empty() {
        let mut block = el("div")
            .class("mt-4 ranked-sections")
            .child(section_title("h5", "fas fa-brain", "AI-Ranked Sections"));
        if result.persona.is_some() || result.task.is_some() {
            block = block.child(
                el("div")
                    .class("alert alert-info")
                    .child(labelled("Persona:", result.persona.as_deref().unwrap_or(NOT_SPECIFIED)))
                    .child(el("br"))
                    .child(labelled("Task:", result.task.as_deref().unwrap_or(NOT_SPECIFIED))),
            );
        }
        let items = result
            .ranked_sections()
            .iter()
            .enumerate()
            .map(|(index, item)| ranked_row(index, item));
        root = root.child(block.children(items));
    }

    if !result.tables().is_empty() {
        let blocks = result
            .tables()
            .iter()
            .enumerate()
            .map(|(index, table)| table_block(index, table));
        root = root.child(
            el("div")
                .class("mt-4 extracted-tables")
                .child(section_title("h5", "fas fa-table", "Extracted Tables"))
                .children(blocks),
        );
    }

    root.into()
}

fn summary_row(result: &DocumentResult, result_file: Option<&str>) -> Element {
    let page_count = result.page_count();
    let heading_count = result.heading_count();

    let mut info = el("div")
        .class("col-md-6")
        .child(section_title("h5", "fas fa-info-circle", "Document Information"))
        .child(
            el("div")
                .class("result-item document-summary")
                .child(labelled("Title:", result.display_title()))
                .child(el("br"))
                .child(labelled("Pages:", &page_count.to_string()))
                .child(el("br"))
                .child(labelled("Headings:", &heading_count.to_string()))
                .child(el("br"))
                .child(labelled("Tables:", &result.table_count().to_string())),
        );
    if heading_count == 0 {
        info = info.child(
            el("div")
                .class("alert alert-info mt-2 no-headings-note")
                .child(icon("fas fa-info-circle"))
                .child(el("strong").text("No headings detected."))
                .text(NO_HEADINGS_NOTE),
        );
    }

    let link = match result_file {
        Some(file) => el("a")
            .class("btn btn-outline-primary btn-sm download-link")
            .attr("href", download_href(file))
            .child(el("i").class("fas fa-file-download me-1"))
            .text("Download JSON"),
        None => el("span")
            .class("text-muted")
            .text("No result file was stored for this document."),
    };
    let mut download = el("div")
        .class("col-md-6")
        .child(section_title("h5", "fas fa-download", "Download Results"))
        .child(el("div").class("result-item").child(link));
    if page_count > 0 {
        download = download.child(
            el("div")
                .class("alert alert-success mt-2")
                .child(icon("fas fa-check-circle"))
                .child(el("strong").text("Processing successful!"))
                .text(format!(" Extracted text from {page_count} pages.")),
        );
    }

    el("div").class("row").child(info).child(download)
}

fn outline_badge_entry(heading: &Heading) -> Element {
    el("div")
        .class("mb-2 outline-entry")
        .child(
            el("span")
                .class("badge bg-secondary me-2 level-badge")
                .text(heading.level.as_str()),
        )
        .child(el("span").class(&heading.level.css_class()).text(heading.text.as_str()))
        .child(page_note(heading.page))
}

fn ranked_row(index: usize, item: &RankedItem) -> Element {
    el("div").class("result-item ranked-entry").child(
        el("div")
            .class("d-flex justify-content-between align-items-start")
            .child(
                el("div")
                    .child(rank_badge(index, 2, "bg-primary").class("me-2"))
                    .child(el("strong").text(item.section.text.as_str()))
                    .child(page_note(item.section.page)),
            )
            .child(score_badge(item)),
    )
}

fn table_block(index: usize, table: &Table) -> Element {
    // The first entry of `data` is the header; malformed rows never render,
    // so a malformed first entry leaves the table without a header.
    let rows = table
        .data
        .iter()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let cell_tag = if row_index == 0 { "th" } else { "td" };
            row.cells().map(|cells| {
                el("tr").children(cells.iter().map(|cell| el(cell_tag).text(cell.as_str())))
            })
        });

    el("div")
        .class("result-item table-block")
        .child(el("h6").text(format!(
            "Table {} (Page {})",
            index + 1,
            page_text(table.page)
        )))
        .child(
            el("div")
                .class("table-container")
                .child(el("table").class("table table-sm table-striped").children(rows)),
        )
}

/// Success banner plus one card per collection, in response order.
pub fn format_batch_result(
    batch: &CollectionBatch,
    collections_processed: Option<u64>,
    note: Option<&str>,
) -> ViewNode {
    let processed = collections_processed.unwrap_or(batch.len() as u64);
    let mut banner = el("div")
        .class("alert alert-success batch-banner")
        .child(
            el("h6")
                .child(icon("fas fa-check-circle"))
                .text("Processing Complete"),
        )
        .child(el("p").text(format!("Successfully processed {processed} collections.")));
    if let Some(note) = note {
        banner = banner.child(el("p").class("small text-muted mb-0 batch-note").text(note));
    }

    let cards = batch.iter().map(|(name, result)| {
        el("div")
            .class("card mb-3 collection-card")
            .child(
                el("div")
                    .class("card-header")
                    .child(el("h6").class("mb-0").text(name)),
            )
            .child(
                el("div")
                    .class("card-body")
                    .child(el("p").child(labelled(
                        "Persona:",
                        result.metadata.persona.as_deref().unwrap_or(NOT_SPECIFIED),
                    )))
                    .child(el("p").child(labelled(
                        "Task:",
                        result
                            .metadata
                            .job_to_be_done
                            .as_deref()
                            .unwrap_or(NOT_SPECIFIED),
                    )))
                    .child(el("p").child(labelled(
                        "Extracted Sections:",
                        &result.extracted_sections.len().to_string(),
                    )))
                    .child(el("p").child(labelled(
                        "Subsection Analyses:",
                        &result.subsection_analysis.len().to_string(),
                    ))),
            )
    });

    el("div")
        .class("batch-result")
        .child(banner)
        .children(cards)
        .into()
}

/// Custom analysis view. `persona` and `task` are the values the user
/// submitted; the payload's echoes are ignored.
pub fn format_custom_result(result: &DocumentResult, persona: &str, task: &str) -> ViewNode {
    let context_row = el("div")
        .class("row mb-3")
        .child(
            el("div").class("col-md-6").child(
                el("div")
                    .class("alert alert-info analysis-context")
                    .child(el("strong").child(el("i").class("fas fa-user me-1")).text("Persona:"))
                    .text(format!(" {persona}"))
                    .child(el("br"))
                    .child(el("strong").child(el("i").class("fas fa-bullseye me-1")).text("Task:"))
                    .text(format!(" {task}")),
            ),
        )
        .child(
            el("div").class("col-md-6").child(
                el("div")
                    .class("alert alert-light document-facts")
                    .child(
                        el("strong")
                            .child(el("i").class("fas fa-file-pdf me-1"))
                            .text("Document:"),
                    )
                    .text(format!(" {}", result.display_title()))
                    .child(el("br"))
                    .child(
                        el("strong")
                            .child(el("i").class("fas fa-list me-1"))
                            .text("Sections Found:"),
                    )
                    .text(format!(" {}", result.heading_count())),
            ),
        );

    let mut body = el("div").class("card-body").child(context_row);

    if result.ranked_sections().is_empty() {
        body = body.child(
            el("div")
                .class("alert alert-warning no-ranked-sections")
                .child(icon("fas fa-exclamation-triangle"))
                .text(NO_RANKED_SECTIONS_NOTE),
        );
    } else {
        let cards = result
            .ranked_sections()
            .iter()
            .enumerate()
            .map(|(index, item)| ranked_card(index, item));
        body = body
            .child(
                el("h6")
                    .child(icon("fas fa-trophy"))
                    .text(format!("Top Relevant Sections for {persona}")),
            )
            .child(el("div").class("row").children(cards));
    }

    if !result.outline().is_empty() {
        // Pairs of headings per column: even positions open a column, and a
        // trailing odd heading closes its own.
        let columns = result.outline().chunks(2).map(|pair| {
            el("div")
                .class("col-md-6 outline-column")
                .children(pair.iter().map(outline_icon_entry))
        });
        body = body.child(
            el("div")
                .class("mt-4 document-structure")
                .child(section_title("h6", "fas fa-sitemap", "Document Structure"))
                .child(el("div").class("row").children(columns)),
        );
    }

    el("div")
        .class("card border-success custom-result")
        .child(
            el("div").class("card-header bg-success text-white").child(
                el("h5")
                    .class("mb-0")
                    .child(icon("fas fa-brain"))
                    .text("AI Analysis Results"),
            ),
        )
        .child(body)
        .into()
}

fn ranked_card(index: usize, item: &RankedItem) -> Element {
    let mut facts = format!("Page {}", page_text(item.section.page));
    if let Some(level) = item.section.level.as_ref().filter(|l| !l.as_str().is_empty()) {
        facts.push_str(&format!(" | {level}"));
    }
    el("div").class("col-md-6 mb-3 ranked-entry").child(
        el("div").class("card h-100").child(
            el("div")
                .class("card-body")
                .child(
                    el("div")
                        .class("d-flex justify-content-between align-items-start mb-2")
                        .child(rank_badge(index, 3, "bg-secondary").class("fs-6"))
                        .child(score_badge(item)),
                )
                .child(el("h6").class("card-title").text(item.section.text.as_str()))
                .child(
                    el("p")
                        .class("card-text")
                        .child(el("small").class("text-muted").text(facts)),
                ),
        ),
    )
}

fn outline_icon_entry(heading: &Heading) -> Element {
    let level_class = heading.level.css_class();
    el("div")
        .class("mb-2 outline-entry")
        .child(
            el("i")
                .class(heading.level.icon_class())
                .class("me-2")
                .class(&level_class),
        )
        .child(el("span").class(&level_class).text(heading.text.as_str()))
        .child(page_note(heading.page))
}

/// Spinner card shown in the custom flow's result region while analyzing.
pub fn custom_busy_placeholder() -> ViewNode {
    el("div")
        .class("card busy-placeholder")
        .child(
            el("div")
                .class("card-body text-center")
                .child(
                    el("div")
                        .class("spinner-border text-success mb-3")
                        .attr("role", "status")
                        .child(el("span").class("visually-hidden").text("Loading...")),
                )
                .child(el("h5").text("Analyzing PDF with AI..."))
                .child(
                    el("p")
                        .class("text-muted")
                        .text("Applying persona-specific intelligence to your document."),
                ),
        )
        .into()
}

/// Badge for the 0-based `index`; the first `highlighted` ranks get
/// distinct colors, the rest share `rest_class`.
fn rank_badge(index: usize, highlighted: usize, rest_class: &str) -> Element {
    const TOP_CLASSES: [&str; 3] = ["bg-warning", "bg-info", "bg-success"];
    let class = if index < highlighted.min(TOP_CLASSES.len()) {
        TOP_CLASSES[index]
    } else {
        rest_class
    };
    el("span")
        .class("badge rank-badge")
        .class(class)
        .text(format!("#{}", index + 1))
}

fn score_badge(item: &RankedItem) -> Element {
    el("span").class("score-badge").text(item.score_label())
}

fn page_note(page: Option<u32>) -> Element {
    el("small")
        .class("text-muted ms-2 page-note")
        .text(format!("(Page {})", page_text(page)))
}

fn page_text(page: Option<u32>) -> String {
    page.map_or_else(|| "?".to_owned(), |page| page.to_string())
}

fn section_title(tag: &'static str, icon_class: &str, title: &str) -> Element {
    el(tag).child(icon(icon_class)).text(title)
}

fn labelled(label: &str, value: &str) -> ViewNode {
    el("span")
        .child(el("strong").text(label))
        .text(format!(" {value}"))
        .into()
}
