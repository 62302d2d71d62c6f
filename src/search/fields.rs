//! Derivation of the keyword and metadata search fields from front matter.

use crate::corpus::FrontMatter;
use serde_json::Value;

/// Front-matter key holding a page's keywords.
const KEYWORDS_FIELD: &str = "keywords";

/// Extracts the `keywords` and `metadata` fields of an indexed page.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    metadata_fields: Vec<String>,
}

impl FieldExtractor {
    /// Create an extractor folding `metadata_fields`, in order, into the
    /// metadata field. Repeated names are kept once.
    pub fn new(metadata_fields: &[String]) -> Self {
        let mut fields: Vec<String> = Vec::with_capacity(metadata_fields.len());
        for field in metadata_fields {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }
        Self {
            metadata_fields: fields,
        }
    }

    pub fn metadata_fields(&self) -> &[String] {
        &self.metadata_fields
    }

    /// Keywords joined with single spaces, or the literal string value.
    pub fn keywords(&self, front_matter: &FrontMatter) -> String {
        match front_matter.get(KEYWORDS_FIELD) {
            Some(Value::String(keywords)) => keywords.clone(),
            Some(Value::Array(items)) => join_scalars(items),
            _ => String::new(),
        }
    }

    /// Configured front-matter values joined with single spaces.
    pub fn metadata(&self, front_matter: &FrontMatter) -> String {
        self.metadata_fields
            .iter()
            .filter_map(|field| front_matter.get(field))
            .map(value_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render a scalar as text. Objects and null have no text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn join_scalars(items: &[Value]) -> String {
    items
        .iter()
        .filter_map(scalar_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Array(items) => join_scalars(items),
        other => scalar_text(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use serde_json::json;

    fn front_matter(value: Value) -> FrontMatter {
        match value {
            Value::Object(map) => map,
            _ => panic!("front matter must be an object"),
        }
    }

    fn extractor(fields: &[&str]) -> FieldExtractor {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        FieldExtractor::new(&fields)
    }

    #[test]
    fn test_keywords_from_array() {
        let fm = front_matter(json!({ "keywords": ["routing", "slim", "middleware"] }));
        check!(extractor(&[]).keywords(&fm) == "routing slim middleware");
    }

    #[test]
    fn test_keywords_from_string() {
        let fm = front_matter(json!({ "keywords": "sprinkles, recipes" }));
        check!(extractor(&[]).keywords(&fm) == "sprinkles, recipes");
    }

    #[test]
    fn test_keywords_absent() {
        check!(extractor(&[]).keywords(&FrontMatter::new()).is_empty());
        let fm = front_matter(json!({ "keywords": { "nested": true } }));
        check!(extractor(&[]).keywords(&fm).is_empty());
    }

    #[test]
    fn test_metadata_follows_configured_order() {
        let fm = front_matter(json!({
            "author": "Louis",
            "description": "Getting started",
            "tags": ["intro", "setup"],
        }));
        let ex = extractor(&["tags", "description", "author"]);
        check!(ex.metadata(&fm) == "intro setup Getting started Louis");
    }

    #[test]
    fn test_metadata_skips_missing_and_empty() {
        let fm = front_matter(json!({
            "description": "",
            "category": null,
            "tags": [],
            "author": "Alex",
        }));
        let ex = extractor(&["description", "category", "tags", "missing", "author"]);
        check!(ex.metadata(&fm) == "Alex");
    }

    #[test]
    fn test_metadata_renders_scalars() {
        let fm = front_matter(json!({ "weight": 3, "draft": false }));
        check!(extractor(&["weight", "draft"]).metadata(&fm) == "3 false");
    }

    #[test]
    fn test_duplicate_fields_folded_once() {
        let ex = extractor(&["description", "description", "author"]);
        check!(ex.metadata_fields() == ["description".to_string(), "author".to_string()]);

        let fm = front_matter(json!({ "description": "once" }));
        check!(ex.metadata(&fm) == "once");
    }
}
