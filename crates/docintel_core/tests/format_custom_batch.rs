use docintel_core::{
    custom_busy_placeholder, format_batch_result, format_custom_result, CollectionBatch,
    DocumentResult,
};
use pretty_assertions::assert_eq;

fn doc(json: &str) -> DocumentResult {
    serde_json::from_str(json).expect("valid document json")
}

#[test]
fn custom_view_uses_local_persona_and_task() {
    let result = doc(
        r#"{"title": "Guide", "persona": "Server Persona", "task": "Server Task",
            "ranked_sections": [{"section": {"text": "Packing", "page": 3, "level": "H2"}, "score": 0.42}]}"#,
    );
    let view = format_custom_result(&result, "Travel Planner", "Plan a 4 day trip");

    let context = view.find_by_class("analysis-context")[0].text_content();
    assert_eq!(context, "Persona: Travel PlannerTask: Plan a 4 day trip");
    let text = view.text_content();
    assert!(!text.contains("Server Persona"));
    assert!(text.contains("Top Relevant Sections for Travel Planner"));
    assert!(text.contains("Document: Guide"));
    assert!(text.contains("Page 3 | H2"));
}

#[test]
fn custom_view_differentiates_top_three_ranks() {
    let sections: Vec<String> = (0..5)
        .map(|i| {
            format!(
                r#"{{"section": {{"text": "S{i}", "page": {p}, "level": "H1"}}, "score": 0.{s}}}"#,
                p = i + 1,
                s = 9 - i
            )
        })
        .collect();
    let result = doc(&format!(r#"{{"ranked_sections": [{}]}}"#, sections.join(",")));
    let view = format_custom_result(&result, "Analyst", "Summarize");

    let badges = view.find_by_class("rank-badge");
    assert_eq!(badges.len(), 5);
    let classes: Vec<&str> = badges
        .iter()
        .map(|badge| {
            ["bg-warning", "bg-info", "bg-success", "bg-secondary"]
                .into_iter()
                .find(|class| badge.has_class(class))
                .unwrap_or("none")
        })
        .collect();
    assert_eq!(
        classes,
        vec!["bg-warning", "bg-info", "bg-success", "bg-secondary", "bg-secondary"]
    );
    let scores: Vec<String> = view
        .find_by_class("score-badge")
        .iter()
        .map(|badge| badge.text_content())
        .collect();
    assert_eq!(scores, vec!["90.0%", "80.0%", "70.0%", "60.0%", "50.0%"]);
    assert!(view.find_by_class("no-ranked-sections").is_empty());
}

#[test]
fn custom_view_warns_when_nothing_ranked() {
    for json in [r#"{"title": "Flyer"}"#, r#"{"title": "Flyer", "ranked_sections": []}"#] {
        let view = format_custom_result(&doc(json), "Analyst", "Find pricing");
        assert_eq!(view.find_by_class("no-ranked-sections").len(), 1);
        assert!(view.find_by_class("ranked-entry").is_empty());
    }
}

#[test]
fn custom_outline_is_split_into_pairs() {
    let result = doc(
        r#"{"outline": [
            {"level": "H1", "text": "A", "page": 1},
            {"level": "H2", "text": "B", "page": 1},
            {"level": "H3", "text": "C", "page": 2},
            {"level": "H2", "text": "D", "page": 3},
            {"level": "H1", "text": "E", "page": 4}
        ]}"#,
    );
    let view = format_custom_result(&result, "Analyst", "Skim");

    let columns: Vec<Vec<String>> = view
        .find_by_class("outline-column")
        .iter()
        .map(|column| {
            column
                .children
                .iter()
                .map(|entry| entry.find_by_tag("span")[0].text_content())
                .collect()
        })
        .collect();
    assert_eq!(
        columns,
        vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["C".to_string(), "D".to_string()],
            vec!["E".to_string()],
        ]
    );
    let icons = view.find_by_tag("i");
    assert!(icons.iter().any(|i| i.has_class("fa-heading") && i.has_class("heading-h1")));
    assert!(icons.iter().any(|i| i.has_class("fa-circle") && i.has_class("heading-h3")));
}

#[test]
fn batch_renders_one_card_per_collection_in_order() {
    let batch: CollectionBatch = serde_json::from_str(
        r#"{
            "Collection 2": {"metadata": {"persona": "HR professional", "job_to_be_done": "Create forms"},
                             "extracted_sections": [1, 2, 3], "subsection_analysis": [1]},
            "Collection 1": {"metadata": {"persona": "Travel Planner", "job_to_be_done": "Plan a trip"},
                             "extracted_sections": [], "subsection_analysis": [1, 2]},
            "Collection 3": {"metadata": {}}
        }"#,
    )
    .unwrap();
    let view = format_batch_result(&batch, Some(3), Some("Using pre-processed results."));

    let banner = view.find_by_class("batch-banner")[0].text_content();
    assert!(banner.contains("Successfully processed 3 collections."));
    assert!(banner.contains("Using pre-processed results."));

    let cards = view.find_by_class("collection-card");
    assert_eq!(cards.len(), 3);
    let headers: Vec<String> = cards
        .iter()
        .map(|card| card.children[0].text_content())
        .collect();
    assert_eq!(headers, vec!["Collection 2", "Collection 1", "Collection 3"]);

    let first = cards[0].children[1].text_content();
    assert_eq!(
        first,
        "Persona: HR professionalTask: Create formsExtracted Sections: 3Subsection Analyses: 1"
    );
    let last = cards[2].children[1].text_content();
    assert!(last.contains("Persona: Not specified"));
    assert!(last.contains("Extracted Sections: 0"));
}

#[test]
fn batch_count_defaults_to_entries() {
    let batch: CollectionBatch = serde_json::from_str(r#"{"Only": {}}"#).unwrap();
    let view = format_batch_result(&batch, None, None);
    assert!(view
        .text_content()
        .contains("Successfully processed 1 collections."));
    assert!(view.find_by_class("batch-note").is_empty());
}

#[test]
fn busy_placeholder_announces_analysis() {
    let view = custom_busy_placeholder();
    assert!(view.text_content().contains("Analyzing PDF with AI..."));
    assert_eq!(
        view.find_by_class("spinner-border")[0].attr_value("role"),
        Some("status")
    );
}
