//! Retrieval value types shared by the web and vector search handlers.

use serde::{Deserialize, Serialize};

/// One web search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl WebResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// A product record in the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Price in US dollars, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CatalogRecord {
    /// Text fed to the embedder for this record.
    pub fn embedding_text(&self) -> String {
        format!("{} {} {}", self.name, self.category, self.description)
    }
}

/// A catalog record with its distance from the query embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHit {
    pub record: CatalogRecord,
    pub distance: f32,
}

/// Whether the backing service answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStatus {
    Ok,
    Unavailable,
}

/// Outcome of a best-effort retrieval: a possibly empty list plus its status.
///
/// Items keep the order the backing service returned them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retrieved<T> {
    pub status: RetrievalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub items: Vec<T>,
}

impl<T> Retrieved<T> {
    /// A successful retrieval.
    pub fn ok(items: Vec<T>) -> Self {
        Self {
            status: RetrievalStatus::Ok,
            detail: None,
            items,
        }
    }

    /// An empty result for a service that failed or timed out.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            status: RetrievalStatus::Unavailable,
            detail: Some(detail.into()),
            items: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == RetrievalStatus::Ok
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_empty_with_detail() {
        let retrieved: Retrieved<WebResult> = Retrieved::unavailable("timed out after 5s");
        assert!(!retrieved.is_available());
        assert!(retrieved.is_empty());
        assert_eq!(retrieved.detail.as_deref(), Some("timed out after 5s"));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&RetrievalStatus::Unavailable).unwrap();
        assert_eq!(json, "\"unavailable\"");
    }

    #[test]
    fn ok_retrieval_omits_detail() {
        let retrieved = Retrieved::ok(vec![WebResult::new("t", "https://a.example", "s")]);
        let json = serde_json::to_value(&retrieved).unwrap();
        assert!(json.get("detail").is_none());
        assert_eq!(json["items"][0]["url"], "https://a.example");
    }

    #[test]
    fn embedding_text_joins_name_category_description() {
        let record = CatalogRecord {
            id: "p1".to_string(),
            name: "Aero 14".to_string(),
            category: "laptop".to_string(),
            description: "Light ultrabook".to_string(),
            price: Some(999.0),
        };
        assert_eq!(record.embedding_text(), "Aero 14 laptop Light ultrabook");
    }
}
