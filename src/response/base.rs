use reqwest::header::HeaderMap;

use crate::error::{ParliamentError, Result};
use crate::graph::{GraphParser, Node};
use crate::http::RawResult;

/// A successful response, parsed into graph nodes.
#[derive(Debug, Clone)]
pub struct BaseResponse {
    status_code: u16,
    url: String,
    headers: HeaderMap,
    nodes: Vec<Node>,
}

impl BaseResponse {
    /// Parses `body` and keeps the status line and headers of `raw` alongside the nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ParliamentError::Parse`] wrapping the parser's error unchanged.
    pub fn wrap(body: &[u8], raw: &RawResult, parser: &dyn GraphParser) -> Result<Self> {
        let nodes = parser.parse(body).map_err(ParliamentError::Parse)?;

        log::debug!("Parsed {} nodes from {}", nodes.len(), raw.url);

        Ok(Self {
            status_code: raw.status_code,
            url: raw.url.clone(),
            headers: raw.headers.clone(),
            nodes,
        })
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Nodes whose type IRI is `type_iri`.
    pub fn filter_by_type<'a>(&'a self, type_iri: &'a str) -> impl Iterator<Item = &'a Node> {
        self.nodes.iter().filter(move |node| node.is_type(type_iri))
    }
}

impl IntoIterator for BaseResponse {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a BaseResponse {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
