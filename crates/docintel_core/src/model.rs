use std::fmt;

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One processed document as returned by the upload endpoint.
///
/// Every field may be absent. `None` means the service did not send the
/// field, `Some(vec![])` means it sent an empty list; both render as
/// "not shown".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DocumentResult {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub outline: Option<Vec<Heading>>,
    /// Per-page text blocks; only the length is used.
    #[serde(deserialize_with = "lenient_list")]
    pub raw_text: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient_list")]
    pub tables: Option<Vec<Table>>,
    #[serde(deserialize_with = "lenient_list")]
    pub ranked_sections: Option<Vec<RankedItem>>,
    #[serde(deserialize_with = "lenient_string")]
    pub persona: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub task: Option<String>,
}

impl DocumentResult {
    pub fn outline(&self) -> &[Heading] {
        self.outline.as_deref().unwrap_or_default()
    }

    pub fn tables(&self) -> &[Table] {
        self.tables.as_deref().unwrap_or_default()
    }

    pub fn ranked_sections(&self) -> &[RankedItem] {
        self.ranked_sections.as_deref().unwrap_or_default()
    }

    pub fn page_count(&self) -> usize {
        self.raw_text.as_ref().map_or(0, Vec::len)
    }

    pub fn heading_count(&self) -> usize {
        self.outline().len()
    }

    pub fn table_count(&self) -> usize {
        self.tables().len()
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED_DOCUMENT,
        }
    }
}

pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Heading level tag as sent by the service (`"H1"`, `"H2"`, ...).
///
/// Kept as the literal string: the service may emit levels beyond `H3`, and
/// display only ever needs the literal and a CSS class derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadingLevel(String);

impl HeadingLevel {
    pub fn new(level: impl Into<String>) -> Self {
        Self(level.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `heading-h1`, `heading-h2`, ...
    pub fn css_class(&self) -> String {
        format!("heading-{}", self.0.to_lowercase())
    }

    pub fn icon_class(&self) -> &'static str {
        match self.0.as_str() {
            "H1" => "fas fa-heading",
            "H2" => "fas fa-minus",
            _ => "fas fa-circle",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(lenient_string(deserializer)?.unwrap_or_default()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Heading {
    pub level: HeadingLevel,
    #[serde(deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Table {
    #[serde(deserialize_with = "lenient_page")]
    pub page: Option<u32>,
    #[serde(deserialize_with = "lenient_vec")]
    pub data: Vec<TableRow>,
}

impl Table {
    /// Rows that are cell sequences; malformed rows are skipped.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.data.iter().filter_map(TableRow::cells)
    }
}

/// A table row as received. Anything that is not an array is kept as
/// `Malformed` so one bad row does not reject the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Cells(Vec<String>),
    Malformed,
}

impl TableRow {
    pub fn cells(&self) -> Option<&[String]> {
        match self {
            TableRow::Cells(cells) => Some(cells),
            TableRow::Malformed => None,
        }
    }
}

impl<'de> Deserialize<'de> for TableRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(cells) => TableRow::Cells(cells.iter().map(cell_text).collect()),
            _ => TableRow::Malformed,
        })
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RankedItem {
    #[serde(deserialize_with = "lenient_struct")]
    pub section: RankedSection,
    /// Relevance in `[0, 1]` by contract; rendered as given.
    #[serde(deserialize_with = "lenient_score")]
    pub score: f64,
}

impl RankedItem {
    /// Score as a percentage with one decimal, e.g. `87.5%`.
    pub fn score_label(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RankedSection {
    #[serde(deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(deserialize_with = "lenient_page")]
    pub page: Option<u32>,
    pub level: Option<HeadingLevel>,
}

/// Per-collection results of the batch flow, in response order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionBatch {
    entries: Vec<(String, CollectionResult)>,
}

impl CollectionBatch {
    pub fn new(entries: Vec<(String, CollectionResult)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionResult)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl<'de> Deserialize<'de> for CollectionBatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BatchVisitor;

        impl<'de> Visitor<'de> for BatchVisitor {
            type Value = CollectionBatch;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of collection name to collection result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    let result: CollectionResult =
                        serde_json::from_value(value).unwrap_or_default();
                    // Later duplicates replace earlier ones but keep the first position.
                    match entries
                        .iter_mut()
                        .find(|entry: &&mut (String, CollectionResult)| entry.0 == name)
                    {
                        Some(slot) => slot.1 = result,
                        None => entries.push((name, result)),
                    }
                }
                Ok(CollectionBatch { entries })
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CollectionBatch::default())
            }
        }

        deserializer.deserialize_any(BatchVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CollectionResult {
    #[serde(deserialize_with = "lenient_struct")]
    pub metadata: CollectionMetadata,
    #[serde(deserialize_with = "lenient_vec")]
    pub extracted_sections: Vec<Value>,
    #[serde(deserialize_with = "lenient_vec")]
    pub subsection_analysis: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CollectionMetadata {
    #[serde(deserialize_with = "lenient_string")]
    pub persona: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub job_to_be_done: Option<String>,
}

/// Body of `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(deserialize_with = "lenient_option")]
    pub result: Option<DocumentResult>,
    pub result_file: Option<String>,
    pub error: Option<String>,
}

/// Body of `GET /api/challenge1b` (and its reprocess variant).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BatchResponse {
    pub success: bool,
    pub collections_processed: Option<u64>,
    pub results: Option<CollectionBatch>,
    pub error: Option<String>,
    pub note: Option<String>,
}

/// Accepts any JSON value: strings pass through, `null` is `None`, other
/// scalars keep their JSON text.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Page numbers arrive as integers, occasionally as floats or numeric
/// strings. Anything else is treated as missing.
fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let page = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(page.and_then(|page| u32::try_from(page).ok()))
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or_default(),
        Value::String(text) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// A nested object of the wrong shape (`null`, a string, ...) decodes as
/// `T::default()`.
fn lenient_struct<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// `None` unless the value is an array. Elements that do not decode as `T`
/// are dropped; the rest keep their order.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_list(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_outline_are_distinct() {
        let absent: DocumentResult = serde_json::from_str("{}").unwrap();
        let empty: DocumentResult = serde_json::from_str(r#"{"outline": []}"#).unwrap();
        assert_eq!(absent.outline, None);
        assert_eq!(empty.outline, Some(Vec::new()));
        assert_eq!(absent.heading_count(), 0);
        assert_eq!(empty.heading_count(), 0);
    }

    #[test]
    fn malformed_rows_survive_decoding() {
        let table: Table =
            serde_json::from_str(r#"{"page": 2, "data": [["a", null, 3], "oops", null, ["b"]]}"#)
                .unwrap();
        assert_eq!(table.data.len(), 4);
        let rows: Vec<&[String]> = table.rows().collect();
        assert_eq!(
            rows,
            vec![
                &["a".to_string(), String::new(), "3".to_string()][..],
                &["b".to_string()][..]
            ]
        );
    }

    #[test]
    fn batch_keeps_response_key_order() {
        let batch: CollectionBatch = serde_json::from_str(
            r#"{"Collection 3": {}, "Collection 1": {}, "Collection 2": {}}"#,
        )
        .unwrap();
        assert_eq!(
            batch.names(),
            vec!["Collection 3", "Collection 1", "Collection 2"]
        );
    }

    #[test]
    fn page_tolerates_odd_encodings() {
        let heading: Heading =
            serde_json::from_str(r#"{"level": "H2", "text": "Scope", "page": "4"}"#).unwrap();
        assert_eq!(heading.page, Some(4));
        let heading: Heading = serde_json::from_str(r#"{"text": "Scope", "page": -1}"#).unwrap();
        assert_eq!(heading.page, None);
        assert_eq!(heading.level.as_str(), "");
    }

    #[test]
    fn null_section_keeps_its_score() {
        let result: DocumentResult = serde_json::from_str(
            r#"{"ranked_sections": [{"section": null, "score": 0.5}, {"section": {"text": "Fees"}, "score": 0.25}]}"#,
        )
        .unwrap();
        let ranked = result.ranked_sections();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].section, RankedSection::default());
        assert_eq!(ranked[0].score_label(), "50.0%");
        assert_eq!(ranked[1].section.text, "Fees");
    }

    #[test]
    fn outline_skips_entries_that_are_not_headings() {
        let result: DocumentResult = serde_json::from_str(
            r#"{"outline": [null, {"level": "H1", "text": "Intro", "page": 1}, "stray", 7]}"#,
        )
        .unwrap();
        assert_eq!(result.heading_count(), 1);
        assert_eq!(result.outline()[0].text, "Intro");
    }

    #[test]
    fn wrongly_typed_lists_read_as_absent() {
        let result: DocumentResult = serde_json::from_str(
            r#"{"outline": "none", "tables": {"page": 1}, "raw_text": 3, "ranked_sections": null}"#,
        )
        .unwrap();
        assert_eq!(result.outline, None);
        assert_eq!(result.tables, None);
        assert_eq!(result.page_count(), 0);
        assert!(result.ranked_sections().is_empty());
    }

    #[test]
    fn non_array_table_data_is_empty() {
        let table: Table = serde_json::from_str(r#"{"page": 3, "data": "oops"}"#).unwrap();
        assert_eq!(table.page, Some(3));
        assert!(table.data.is_empty());
    }

    #[test]
    fn null_metadata_and_collections_keep_the_batch() {
        let response: BatchResponse = serde_json::from_str(
            r#"{
                "success": true,
                "results": {
                    "Collection 1": {"metadata": null, "extracted_sections": "n/a"},
                    "Collection 2": null,
                    "Collection 3": {"metadata": {"persona": "HR professional"}}
                }
            }"#,
        )
        .unwrap();
        let batch = response.results.unwrap();
        assert_eq!(
            batch.names(),
            vec!["Collection 1", "Collection 2", "Collection 3"]
        );
        let collections: Vec<&CollectionResult> = batch.iter().map(|(_, result)| result).collect();
        assert_eq!(collections[0].metadata, CollectionMetadata::default());
        assert!(collections[0].extracted_sections.is_empty());
        assert_eq!(*collections[1], CollectionResult::default());
        assert_eq!(
            collections[2].metadata.persona.as_deref(),
            Some("HR professional")
        );
    }

    #[test]
    fn non_object_result_reads_as_missing() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success": true, "result": "pending"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.result, None);
    }

    #[test]
    fn score_label_has_one_decimal() {
        let item = RankedItem {
            score: 0.8734,
            ..RankedItem::default()
        };
        assert_eq!(item.score_label(), "87.3%");
    }
}
