//! Structured query tree
//!
//! The wire shape is a tagged variant with the fields
//! `{kind, tag?, value?, sub?, not?, delta?}`. The surrounding service
//! decodes it (JSON or otherwise) straight into `QuerySpec`; the
//! compiler validates which fields each kind may carry.

use serde::{Deserialize, Serialize};

/// Node kind of a query tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Term,
    And,
    Or,
    AndThen,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Term => "term",
            QueryKind::And => "and",
            QueryKind::Or => "or",
            QueryKind::AndThen => "and_then",
        }
    }
}

/// One node of a structured query
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuerySpec {
    pub kind: QueryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub: Vec<QuerySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<QuerySpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<u64>,
}

impl QuerySpec {
    /// Leaf over one `(tag_key, tag_value)` pair
    pub fn term(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Term,
            tag: Some(tag.into()),
            value: Some(value.into()),
            sub: Vec::new(),
            not: None,
            delta: None,
        }
    }

    pub fn and(sub: Vec<QuerySpec>) -> Self {
        Self {
            kind: QueryKind::And,
            tag: None,
            value: None,
            sub,
            not: None,
            delta: None,
        }
    }

    pub fn or(sub: Vec<QuerySpec>) -> Self {
        Self {
            kind: QueryKind::Or,
            tag: None,
            value: None,
            sub,
            not: None,
            delta: None,
        }
    }

    /// `first` followed by `then` within `delta` id-units
    pub fn and_then(first: QuerySpec, then: QuerySpec, delta: u64) -> Self {
        Self {
            kind: QueryKind::AndThen,
            tag: None,
            value: None,
            sub: vec![first, then],
            not: None,
            delta: Some(delta),
        }
    }

    /// Attach an exclusion clause (valid on AND nodes only)
    pub fn with_not(mut self, not: QuerySpec) -> Self {
        self.not = Some(Box::new(not));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_term() {
        let spec: QuerySpec =
            serde_json::from_str(r#"{"kind": "term", "tag": "city", "value": "sofia"}"#).unwrap();
        assert_eq!(spec.kind, QueryKind::Term);
        assert_eq!(spec.tag.as_deref(), Some("city"));
        assert_eq!(spec.value.as_deref(), Some("sofia"));
        assert!(spec.sub.is_empty());
        assert!(spec.not.is_none());
    }

    #[test]
    fn test_decode_nested() {
        let spec: QuerySpec = serde_json::from_str(
            r#"{
                "kind": "and",
                "sub": [
                    {"kind": "term", "tag": "event_type", "value": "click"},
                    {"kind": "or", "sub": [
                        {"kind": "term", "tag": "city", "value": "sofia"},
                        {"kind": "term", "tag": "city", "value": "amsterdam"}
                    ]}
                ],
                "not": {"kind": "term", "tag": "bot", "value": "true"}
            }"#,
        )
        .unwrap();
        assert_eq!(spec.kind, QueryKind::And);
        assert_eq!(spec.sub.len(), 2);
        assert_eq!(spec.sub[1].kind, QueryKind::Or);
        assert!(spec.not.is_some());
    }

    #[test]
    fn test_decode_and_then() {
        let spec: QuerySpec = serde_json::from_str(
            r#"{
                "kind": "and_then",
                "sub": [
                    {"kind": "term", "tag": "event_type", "value": "view"},
                    {"kind": "term", "tag": "event_type", "value": "purchase"}
                ],
                "delta": 100
            }"#,
        )
        .unwrap();
        assert_eq!(spec.kind, QueryKind::AndThen);
        assert_eq!(spec.delta, Some(100));
    }

    #[test]
    fn test_builders_round_trip() {
        let spec = QuerySpec::and(vec![
            QuerySpec::term("a", "1"),
            QuerySpec::or(vec![QuerySpec::term("b", "2")]),
        ])
        .with_not(QuerySpec::term("c", "3"));

        let json = serde_json::to_string(&spec).unwrap();
        let back: QuerySpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, QueryKind::And);
        assert_eq!(back.sub.len(), 2);
        assert!(back.not.is_some());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(QueryKind::AndThen.as_str(), "and_then");
        assert_eq!(QueryKind::Term.as_str(), "term");
    }
}
