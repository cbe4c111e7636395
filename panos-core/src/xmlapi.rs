//! Operational-command wire format.
//!
//! Requests are built from an explicit element-path descriptor instead of
//! struct-tag reflection: a command has exactly one root element tag, and
//! parameters are addressed by `>`-delimited paths
//! (`bootstrap>vm-auth-key>generate>lifetime`) that map to nested element
//! hierarchies. Paths sharing a prefix merge into one subtree.
//!
//! Replies are XML documents of the shape
//! `<response status="..."><result>...</result></response>`; typed payloads
//! deserialize from under `result`, and absent elements yield defaults.

use quick_xml::escape::escape;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{PanosError, Result};

#[derive(Debug, Clone, Default)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text.as_str()));
        }
        for child in &self.children {
            child.render_into(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// A typed operational-command request.
///
/// Every request has exactly one root element tag. Parameters are added by
/// element path; later additions to the same path override earlier text.
#[derive(Debug, Clone)]
pub struct OpCommand {
    root: Element,
}

impl OpCommand {
    /// Create a command with the given root element tag.
    pub fn new(root: &str) -> Self {
        Self {
            root: Element::new(root),
        }
    }

    /// Set the text content of the element at `path`, creating the nested
    /// hierarchy as needed.
    pub fn arg(mut self, path: &str, value: impl ToString) -> Self {
        self.node_mut(path).text = Some(value.to_string());
        self
    }

    /// Ensure an (empty) element exists at `path`.
    pub fn flag(mut self, path: &str) -> Self {
        self.node_mut(path);
        self
    }

    /// Set an attribute on the element at `path`.
    pub fn attr(mut self, path: &str, name: &str, value: impl ToString) -> Self {
        let node = self.node_mut(path);
        node.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// The root element tag.
    pub fn root(&self) -> &str {
        &self.root.name
    }

    /// Render the command as its XML wire form.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.root.render_into(&mut out);
        out
    }

    fn node_mut(&mut self, path: &str) -> &mut Element {
        let mut cur = &mut self.root;
        for segment in path.split('>') {
            let idx = match cur.children.iter().position(|c| c.name == segment) {
                Some(idx) => idx,
                None => {
                    cur.children.push(Element::new(segment));
                    cur.children.len() - 1
                }
            };
            cur = &mut cur.children[idx];
        }
        cur
    }
}

#[derive(Debug, Deserialize)]
struct EnvelopeHead {
    #[serde(rename = "@status")]
    status: Option<String>,
    #[serde(rename = "@code")]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
}

/// Decode the payload under `result` from a reply envelope.
///
/// A reply whose `status` attribute is not `success` is a protocol error
/// carrying the raw body. A missing `result` element (or missing
/// sub-elements, via `#[serde(default)]` on the payload types) yields the
/// payload's default value instead of an error.
pub fn parse_response<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let head: EnvelopeHead = decode(body)?;
    match head.status.as_deref() {
        Some("success") | None => {}
        Some(status) => {
            let code = head.code.as_deref().unwrap_or("-");
            return Err(PanosError::Protocol(format!(
                "device returned status {status:?} (code {code}): {body}"
            )));
        }
    }

    let envelope: Envelope<T> = decode(body)?;
    Ok(envelope.result.unwrap_or_default())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    quick_xml::de::from_str(body).map_err(|source| PanosError::Deserialize {
        source,
        body: body.to_string(),
    })
}
