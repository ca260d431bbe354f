//! Graph nodes handed back by the response layer, and the parser seam that builds them.
//!
//! Parsing RDF is left to a [`GraphParser`] implementation supplied by the
//! caller. The request layer only needs nodes with a type IRI and attributes it
//! can check, so domain decorators (people, seats, parties, ...) can be written
//! against [`Node::has_attribute`] and the typed getters.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::error::ParseError;

/// Parses a response body into graph nodes.
#[cfg_attr(test, mockall::automock)]
pub trait GraphParser: Send + Sync {
    /// # Errors
    ///
    /// Returns the parser's own error for a malformed body. The request layer
    /// passes it to the caller unchanged.
    fn parse(&self, body: &[u8]) -> Result<Vec<Node>, ParseError>;
}

/// Value of a single node attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Literal(String),
    DateTime(DateTime<FixedOffset>),
    Nodes(Vec<Arc<Node>>),
}

/// A parsed RDF resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    node_type: String,
    attributes: HashMap<String, AttributeValue>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            attributes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(name.into(), value);
    }

    /// Subject IRI of the node.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Type IRI, e.g. `http://id.ukpds.org/schema/Person`.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn is_type(&self, type_iri: &str) -> bool {
        self.node_type == type_iri
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Literal value of `name`, if present and a literal.
    pub fn literal(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name)? {
            AttributeValue::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Date/time value of `name`.
    ///
    /// Literal values are parsed on the fly: RFC 3339 timestamps as given,
    /// plain `YYYY-MM-DD` dates at midnight UTC.
    pub fn date_time(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        match self.attributes.get(name)? {
            AttributeValue::DateTime(value) => Some(*value),
            AttributeValue::Literal(value) => parse_date_time(value),
            AttributeValue::Nodes(_) => None,
        }
    }

    /// Related nodes under `name`; empty when the attribute is absent or not a relation.
    pub fn related(&self, name: &str) -> &[Arc<Node>] {
        match self.attributes.get(name) {
            Some(AttributeValue::Nodes(nodes)) => nodes,
            _ => &[],
        }
    }
}

fn parse_date_time(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().fixed_offset())
    })
}
