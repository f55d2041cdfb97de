//! Standalone serialization of drawing subtrees.

use std::collections::BTreeMap;

use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    drawing::{Element, Node, SVG_NS, XML_NS},
    error::Result,
    io::Fragment,
    options::ExtractOptions,
};

type Declarations = BTreeMap<Option<String>, String>;

/// Serializes `fragment` as a self-contained document body.
///
/// The fragment root declares every namespace used beneath it. With
/// `wrap_fragments` set, the result is nested in a fixed-viewport `<svg>`
/// whose first child is the palette placeholder comment.
pub fn render_fragment(fragment: &Fragment<'_>, options: &ExtractOptions) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    if options.wrap_fragments {
        let mut wrapper = BytesStart::new("svg");
        let viewbox = format!("0 0 {0} {0}", options.viewport);
        wrapper.push_attribute(("viewBox", viewbox.as_str()));
        wrapper.push_attribute(("xmlns:svg", SVG_NS));
        wrapper.push_attribute(("xmlns", SVG_NS));
        writer.write_event(Event::Start(wrapper))?;
        writer.write_event(Event::Comment(BytesText::from_escaped(
            options.palette_placeholder.as_str(),
        )))?;
        write_root(&mut writer, fragment)?;
        writer.write_event(Event::End(BytesEnd::new("svg")))?;
    } else {
        write_root(&mut writer, fragment)?;
    }

    Ok(writer.into_inner())
}

fn write_root(writer: &mut Writer<Vec<u8>>, fragment: &Fragment<'_>) -> Result<()> {
    let mut declarations = Declarations::new();
    collect_used_namespaces(fragment.element, &Declarations::new(), &mut declarations);
    for ns in &fragment.element.namespaces {
        declarations.insert(ns.prefix.clone(), ns.uri.clone());
    }
    write_element(writer, fragment.element, &declarations, fragment.style)
}

/// Bindings inherited from outside the fragment that its names rely on.
///
/// `scoped` holds the declarations made inside the fragment on the path to
/// `element`; names they cover are declared where they already are.
fn collect_used_namespaces(element: &Element, scoped: &Declarations, out: &mut Declarations) {
    let mut scoped = scoped.clone();
    for ns in &element.namespaces {
        scoped.insert(ns.prefix.clone(), ns.uri.clone());
    }

    let names = std::iter::once(&element.name).chain(element.attributes.iter().map(|a| &a.name));
    for name in names {
        let Some(uri) = name.namespace.as_deref().filter(|uri| *uri != XML_NS) else {
            continue;
        };
        if scoped.get(&name.prefix).map(String::as_str) == Some(uri) {
            continue;
        }
        out.entry(name.prefix.clone()).or_insert_with(|| uri.to_string());
    }
    for child in element.child_elements() {
        collect_used_namespaces(child, &scoped, out);
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    declarations: &Declarations,
    style: Option<&str>,
) -> Result<()> {
    let name = element.name.qualified();
    let mut start = BytesStart::new(name.as_str());

    for (prefix, uri) in declarations {
        let key = match prefix {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };
        start.push_attribute((key.as_str(), uri.as_str()));
    }

    let mut style_written = false;
    for attribute in &element.attributes {
        let key = attribute.name.qualified();
        let is_style = attribute.name.namespace.is_none() && attribute.name.local == "style";
        let value = match style {
            Some(style) if is_style => {
                style_written = true;
                style
            }
            _ => attribute.value.as_str(),
        };
        start.push_attribute((key.as_str(), value));
    }
    if let (Some(style), false) = (style, style_written) {
        start.push_attribute(("style", style));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(child) => {
                let local: Declarations = child
                    .namespaces
                    .iter()
                    .map(|ns| (ns.prefix.clone(), ns.uri.clone()))
                    .collect();
                write_element(writer, child, &local, None)?;
            }
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}
