use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Document ID ---

/// Unique identifier of a stored document.
///
/// Identifiers are opaque strings. A document may arrive at the store
/// without one (or with an empty one); the store then assigns a generated
/// identifier before inserting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// An empty identifier counts as absent for upsert purposes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Author ---

/// Author attached to a document: an immutable (id, name) value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// A stored record.
///
/// Every field is optional from the caller's point of view; after a save
/// completes, `id` is guaranteed present and non-empty. `created` is set
/// once by the caller and never generated or altered by the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: Option<DocumentId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
    pub created: Option<DateTime<Utc>>,
}

// --- Search Request ---

/// A set of independently optional filter criteria, combined by logical AND.
///
/// Each candidate list is an OR over its entries: a document satisfies the
/// criterion when any one candidate matches. An absent field skips its
/// criterion entirely. Lists may contain null entries (the wire shape allows
/// them); the query engine ignores those individually, and a list left with
/// no usable candidates behaves as if the field were absent.
///
/// Both timestamp bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub title_prefixes: Option<Vec<Option<String>>>,
    pub contains_contents: Option<Vec<Option<String>>>,
    pub author_ids: Option<Vec<Option<String>>>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn document_id_conversions() {
        let id = DocumentId::from("doc-1");
        assert_eq!(id.as_str(), "doc-1");
        assert_eq!(String::from(id.clone()), "doc-1");
        assert_eq!(id.to_string(), "doc-1");
        assert!(!id.is_empty());
        assert!(DocumentId::new(String::new()).is_empty());
    }

    #[test]
    fn document_default_is_fully_absent() {
        let doc = Document::default();
        assert_eq!(doc.id, None);
        assert_eq!(doc.title, None);
        assert_eq!(doc.content, None);
        assert_eq!(doc.author, None);
        assert_eq!(doc.created, None);
    }

    #[test]
    fn search_request_deserializes_camel_case_wire_shape() {
        let request: SearchRequest = serde_json::from_value(json!({
            "titlePrefixes": ["another", "test", null],
            "containsContents": ["document"],
            "authorIds": ["a1"],
            "createdFrom": "2024-08-20T00:00:00Z",
            "createdTo": "2024-08-21T23:59:59Z"
        }))
        .unwrap();

        assert_eq!(
            request.title_prefixes,
            Some(vec![
                Some("another".to_string()),
                Some("test".to_string()),
                None
            ])
        );
        assert_eq!(
            request.contains_contents,
            Some(vec![Some("document".to_string())])
        );
        assert_eq!(request.author_ids, Some(vec![Some("a1".to_string())]));
        assert_eq!(
            request.created_from,
            Some("2024-08-20T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            request.created_to,
            Some("2024-08-21T23:59:59Z".parse().unwrap())
        );
    }

    #[test]
    fn search_request_missing_fields_deserialize_to_none() {
        let request: SearchRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, SearchRequest::default());
    }

    #[test]
    fn document_serializes_camel_case() {
        let doc = Document {
            id: Some("1".into()),
            title: Some("test title 1".to_string()),
            content: Some("This document is test.".to_string()),
            author: Some(Author::new("a1", "John Doe")),
            created: Some("2024-08-20T10:15:30Z".parse().unwrap()),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], json!("1"));
        assert_eq!(value["author"]["id"], json!("a1"));
        assert_eq!(value["created"], json!("2024-08-20T10:15:30Z"));
    }
}
