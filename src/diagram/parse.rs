use crate::diagram::model::{Attr, AttrValue, Diagram, Element, ElementKind, Node};
use crate::foundation::error::{MorphcastError, MorphcastResult};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

impl Diagram {
    /// Parse a diagram from its SVG serialization.
    ///
    /// Fails fast on markup errors, a non-`<svg>` root, missing primitive geometry, unparsable
    /// numbers and paints that are not `#RRGGBB`.
    pub fn parse(svg: &str) -> MorphcastResult<Self> {
        let doc = roxmltree::Document::parse(svg)
            .map_err(|e| MorphcastError::diagram(format!("invalid svg markup: {e}")))?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(MorphcastError::diagram(format!(
                "root element must be <svg>, got <{}>",
                root.tag_name().name()
            )));
        }

        Ok(Self {
            root_attrs: root.attributes().map(raw_attr).collect(),
            children: parse_children(root)?,
        })
    }
}

fn raw_attr(attr: roxmltree::Attribute<'_, '_>) -> (String, String) {
    let name = match attr.namespace() {
        Some(XLINK_NS) => format!("xlink:{}", attr.name()),
        Some(XML_NS) => format!("xml:{}", attr.name()),
        _ => attr.name().to_owned(),
    };
    (name, attr.value().to_owned())
}

fn parse_children(node: roxmltree::Node<'_, '_>) -> MorphcastResult<Vec<Node>> {
    let mut out = Vec::new();
    for child in node.children() {
        if child.is_element() {
            out.push(Node::Element(parse_element(child)?));
        } else if child.is_text()
            && let Some(text) = child.text().filter(|t| !t.trim().is_empty())
        {
            out.push(Node::Text(text.to_owned()));
        }
    }
    Ok(out)
}

fn parse_element(node: roxmltree::Node<'_, '_>) -> MorphcastResult<Element> {
    let kind = ElementKind::from_tag(node.tag_name().name());
    let mut el = Element::new(kind);

    for attr in node.attributes() {
        if attr.namespace().is_none() && attr.name() == "id" {
            el.id = Some(attr.value().to_owned());
            continue;
        }

        let animatable = attr
            .namespace()
            .is_none()
            .then(|| Attr::from_name(attr.name()))
            .flatten()
            .filter(|a| el.kind.animatable_attrs().contains(a));
        let Some(a) = animatable else {
            el.extra_attrs.push(raw_attr(attr));
            continue;
        };

        match AttrValue::parse(a, attr.value()).map_err(|e| with_context(e, &el))? {
            Some(value) => el.set(a, value),
            // `none` paint.
            None => el.extra_attrs.push(raw_attr(attr)),
        }
    }

    for &required in el.kind.required_attrs() {
        if el.get(required).is_none() {
            return Err(MorphcastError::diagram(format!(
                "<{}{}> is missing required attribute \"{}\"",
                el.kind.tag(),
                describe_id(&el),
                required.name()
            )));
        }
    }

    el.children = parse_children(node)?;
    Ok(el)
}

fn describe_id(el: &Element) -> String {
    el.id
        .as_deref()
        .map(|id| format!(" id=\"{id}\""))
        .unwrap_or_default()
}

fn with_context(err: MorphcastError, el: &Element) -> MorphcastError {
    let ctx = format!("<{}{}>", el.kind.tag(), describe_id(el));
    match err {
        MorphcastError::Color(msg) => MorphcastError::color(format!("{ctx}: {msg}")),
        MorphcastError::Diagram(msg) => MorphcastError::diagram(format!("{ctx}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/parse.rs"]
mod tests;
