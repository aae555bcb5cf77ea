use crate::diagram::model::{Diagram, Element, Node};
use std::fmt::Write as _;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

impl Diagram {
    /// Serialize the diagram, including any mid-morph attribute values, back to SVG.
    pub fn to_svg(&self) -> String {
        let mut out = String::from("<svg");
        write_attr(&mut out, "xmlns", SVG_NS);
        if uses_xlink(&self.children) {
            write_attr(&mut out, "xmlns:xlink", XLINK_NS);
        }
        for (name, value) in &self.root_attrs {
            write_attr(&mut out, name, value);
        }
        out.push('>');
        write_nodes(&mut out, &self.children);
        out.push_str("</svg>");
        out
    }
}

fn uses_xlink(nodes: &[Node]) -> bool {
    nodes.iter().any(|n| match n {
        Node::Element(el) => {
            el.extra_attrs.iter().any(|(k, _)| k.starts_with("xlink:")) || uses_xlink(&el.children)
        }
        Node::Text(_) => false,
    })
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Element(el) => write_element(out, el),
            Node::Text(text) => escape_into(out, text, false),
        }
    }
}

fn write_element(out: &mut String, el: &Element) {
    let tag = el.kind.tag();
    let _ = write!(out, "<{tag}");
    if let Some(id) = &el.id {
        write_attr(out, "id", id);
    }
    for (attr, value) in &el.attrs {
        write_attr(out, attr.name(), &value.to_svg_string());
    }
    for (name, value) in &el.extra_attrs {
        write_attr(out, name, value);
    }

    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    write_nodes(out, &el.children);
    let _ = write!(out, "</{tag}>");
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"");
    escape_into(out, value, true);
    out.push('"');
}

fn escape_into(out: &mut String, s: &str, in_attr: bool) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/write.rs"]
mod tests;
