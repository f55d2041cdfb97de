//! Owned, read-only element tree parsed from an SVG drawing.

pub mod index;
pub mod label;

use std::path::Path;

use tracing::debug;

use crate::error::Result;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub(crate) const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespaced name as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
}

impl XmlName {
    /// `prefix:local`, or `local` for the default namespace
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }

    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: XmlName,
    pub value: String,
}

/// An `xmlns` / `xmlns:prefix` declaration
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Namespace {
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: XmlName,
    pub attributes: Vec<Attribute>,
    /// Declarations introduced on this element
    pub namespaces: Vec<Namespace>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.as_deref() == namespace && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Unqualified presentation attribute such as `x` or `d`
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attribute(None, local)
    }

    pub fn label(&self) -> Option<&str> {
        self.attribute(Some(INKSCAPE_NS), "label")
    }

    pub fn style(&self) -> Option<&str> {
        self.attr("style")
    }

    /// Label, falling back to `id`, for error messages
    pub fn display_name(&self) -> String {
        self.label()
            .or_else(|| self.attr("id"))
            .map(str::to_string)
            .unwrap_or_else(|| self.name.qualified())
    }

    pub fn is_group(&self) -> bool {
        self.name.is(SVG_NS, "g")
    }

    pub fn is_layer(&self) -> bool {
        self.is_group() && self.attribute(Some(INKSCAPE_NS), "groupmode") == Some("layer")
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements in document order, excluding `self`
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }
}

fn collect_descendants<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        out.push(child);
        collect_descendants(child, out);
    }
}

/// A parsed source drawing
#[derive(Debug, Clone)]
pub struct Drawing {
    /// Source file stem, used to name the feature output directory
    pub name: String,
    pub root: Element,
}

impl Drawing {
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(text)?;
        let root = convert_element(document.root_element(), None);
        let name = name.into();
        debug!("Parsed drawing '{}' ({} elements)", name, root.descendants().len() + 1);
        Ok(Self { name, root })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "drawing".to_string());
        Self::parse(name, &text)
    }
}

/// Element names keep the default namespace when it matches; attributes
/// without a prefix carry no namespace at all.
fn convert_name(
    node: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    local: &str,
    is_element: bool,
) -> XmlName {
    let default_matches = is_element
        && namespace.is_some()
        && node.namespaces().any(|ns| ns.name().is_none() && Some(ns.uri()) == namespace);
    let prefix = namespace
        .filter(|_| !default_matches)
        .and_then(|uri| node.lookup_prefix(uri))
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string);
    XmlName {
        namespace: namespace.map(str::to_string),
        prefix,
        local: local.to_string(),
    }
}

fn in_scope(node: Option<roxmltree::Node<'_, '_>>) -> Vec<Namespace> {
    node.map(|n| {
        n.namespaces()
            .filter(|ns| ns.uri() != XML_NS)
            .map(|ns| Namespace {
                prefix: ns.name().map(str::to_string),
                uri: ns.uri().to_string(),
            })
            .collect()
    })
    .unwrap_or_default()
}

fn convert_element(node: roxmltree::Node<'_, '_>, parent: Option<roxmltree::Node<'_, '_>>) -> Element {
    let tag = node.tag_name();
    let name = convert_name(node, tag.namespace(), tag.name(), true);

    let attributes = node
        .attributes()
        .map(|attr| Attribute {
            name: convert_name(node, attr.namespace(), attr.name(), false),
            value: attr.value().to_string(),
        })
        .collect();

    let inherited = in_scope(parent.filter(|p| p.is_element()));
    let namespaces = in_scope(Some(node))
        .into_iter()
        .filter(|ns| !inherited.contains(ns))
        .collect();

    let children = node
        .children()
        .filter_map(|child| {
            if child.is_element() {
                Some(Node::Element(convert_element(child, Some(node))))
            } else if child.is_text() {
                child.text().map(|text| Node::Text(text.to_string()))
            } else {
                None
            }
        })
        .collect();

    Element { name, attributes, namespaces, children }
}
