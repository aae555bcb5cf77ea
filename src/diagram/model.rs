use crate::foundation::core::Rgb8;
use crate::foundation::error::{MorphcastError, MorphcastResult};
use std::collections::{BTreeMap, HashMap};

/// The closed set of attributes the morph engine ever interpolates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attr {
    /// Circle/ellipse center x (`cx`).
    Cx,
    /// Circle/ellipse center y (`cy`).
    Cy,
    /// Circle radius (`r`).
    R,
    /// Ellipse x radius (`rx`).
    Rx,
    /// Ellipse y radius (`ry`).
    Ry,
    /// Rectangle left edge (`x`).
    X,
    /// Rectangle top edge (`y`).
    Y,
    /// Rectangle width.
    Width,
    /// Rectangle height.
    Height,
    /// Fill paint.
    Fill,
    /// Stroke paint.
    Stroke,
    /// Element opacity in `[0, 1]`.
    Opacity,
    /// Stroke width.
    StrokeWidth,
}

/// How an attribute value is interpolated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain floating-point number.
    Number,
    /// RGB color, interpolated per channel.
    Color,
}

impl Attr {
    /// Every animatable attribute.
    pub const ALL: [Attr; 13] = [
        Attr::Cx,
        Attr::Cy,
        Attr::R,
        Attr::Rx,
        Attr::Ry,
        Attr::X,
        Attr::Y,
        Attr::Width,
        Attr::Height,
        Attr::Fill,
        Attr::Stroke,
        Attr::Opacity,
        Attr::StrokeWidth,
    ];

    /// SVG attribute name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cx => "cx",
            Self::Cy => "cy",
            Self::R => "r",
            Self::Rx => "rx",
            Self::Ry => "ry",
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::Opacity => "opacity",
            Self::StrokeWidth => "stroke-width",
        }
    }

    /// Look up an attribute by its SVG name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Interpolation kind of this attribute.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Fill | Self::Stroke => ValueKind::Color,
            _ => ValueKind::Number,
        }
    }
}

/// Parsed value of an animatable attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttrValue {
    /// Numeric value (geometry, opacity, stroke width).
    Number(f64),
    /// Paint color.
    Color(Rgb8),
}

impl AttrValue {
    /// Interpolation kind of this value.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Parse a raw attribute string for `attr`.
    ///
    /// Returns `Ok(None)` for the paint keyword `none`, which is kept verbatim and never animated.
    pub fn parse(attr: Attr, raw: &str) -> MorphcastResult<Option<Self>> {
        let raw = raw.trim();
        match attr.kind() {
            ValueKind::Color => {
                if raw == "none" {
                    return Ok(None);
                }
                Rgb8::parse_hex(raw)
                    .map(|c| Some(Self::Color(c)))
                    .map_err(|e| MorphcastError::color(format!("attribute \"{}\": {e}", attr.name())))
            }
            ValueKind::Number => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(Self::Number(v))),
                _ => Err(MorphcastError::diagram(format!(
                    "attribute \"{}\" must be a finite number, got \"{raw}\"",
                    attr.name()
                ))),
            },
        }
    }

    /// Serialized SVG form.
    pub fn to_svg_string(self) -> String {
        match self {
            Self::Number(v) => format!("{v}"),
            Self::Color(c) => c.to_hex(),
        }
    }
}

/// Element kinds. Only circle, ellipse and rect carry animatable geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// `<circle>`
    Circle,
    /// `<ellipse>`
    Ellipse,
    /// `<rect>`
    Rect,
    /// Any other element, kept verbatim and never animated.
    Other(String),
}

impl ElementKind {
    /// Classify an SVG tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "rect" => Self::Rect,
            other => Self::Other(other.to_owned()),
        }
    }

    /// SVG tag name.
    pub fn tag(&self) -> &str {
        match self {
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Rect => "rect",
            Self::Other(tag) => tag,
        }
    }

    /// Return `true` for the animatable primitives.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Geometry attributes that must be present on this kind.
    pub fn required_attrs(&self) -> &'static [Attr] {
        match self {
            Self::Circle => &[Attr::R],
            Self::Ellipse => &[Attr::Rx, Attr::Ry],
            Self::Rect => &[Attr::Width, Attr::Height],
            Self::Other(_) => &[],
        }
    }

    /// Attributes parsed as animatable on this kind.
    pub fn animatable_attrs(&self) -> &'static [Attr] {
        match self {
            Self::Circle => &[
                Attr::Cx,
                Attr::Cy,
                Attr::R,
                Attr::Fill,
                Attr::Stroke,
                Attr::Opacity,
                Attr::StrokeWidth,
            ],
            Self::Ellipse => &[
                Attr::Cx,
                Attr::Cy,
                Attr::Rx,
                Attr::Ry,
                Attr::Fill,
                Attr::Stroke,
                Attr::Opacity,
                Attr::StrokeWidth,
            ],
            Self::Rect => &[
                Attr::X,
                Attr::Y,
                Attr::Width,
                Attr::Height,
                Attr::Fill,
                Attr::Stroke,
                Attr::Opacity,
                Attr::StrokeWidth,
            ],
            Self::Other(_) => &[],
        }
    }
}

/// A child of an element: nested element or non-whitespace text.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Character data.
    Text(String),
}

/// One element of a diagram tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Element kind.
    pub kind: ElementKind,
    /// Identity token (`id`), correlating logical objects across diagrams.
    pub id: Option<String>,
    /// Animatable attributes (primitives only).
    pub attrs: BTreeMap<Attr, AttrValue>,
    /// Every other attribute, verbatim and in source order.
    pub extra_attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Build an empty element of `kind`.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            attrs: BTreeMap::new(),
            extra_attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Animatable attribute value, if present.
    pub fn get(&self, attr: Attr) -> Option<AttrValue> {
        self.attrs.get(&attr).copied()
    }

    pub(crate) fn set(&mut self, attr: Attr, value: AttrValue) {
        self.attrs.insert(attr, value);
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
}

/// Child-index path from the diagram root to an element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeAddr(pub(crate) Vec<usize>);

/// A parsed diagram: the root `<svg>` attributes plus its element tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    /// Root `<svg>` attributes (viewBox, width, height, ...), verbatim.
    pub root_attrs: Vec<(String, String)>,
    /// Top-level nodes.
    pub children: Vec<Node>,
}

impl Diagram {
    /// Depth-first iterator over every primitive element.
    pub fn primitives(&self) -> Vec<&Element> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
            for node in nodes {
                if let Node::Element(el) = node {
                    if el.kind.is_primitive() {
                        out.push(el);
                    }
                    walk(&el.children, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }

    /// First primitive carrying identity token `id`.
    pub fn find(&self, id: &str) -> Option<&Element> {
        let index = self.identity_index();
        let addr = index.get(id)?;
        self.element(addr)
    }

    /// Map identity tokens to the address of the first primitive carrying them.
    ///
    /// Empty tokens are ignored. Later duplicates are logged and skipped.
    pub(crate) fn identity_index(&self) -> HashMap<&str, NodeAddr> {
        fn walk<'a>(
            nodes: &'a [Node],
            path: &mut Vec<usize>,
            out: &mut HashMap<&'a str, NodeAddr>,
        ) {
            for (i, node) in nodes.iter().enumerate() {
                let Node::Element(el) = node else {
                    continue;
                };
                path.push(i);
                if el.kind.is_primitive()
                    && let Some(id) = el.id.as_deref().filter(|id| !id.is_empty())
                {
                    if out.contains_key(id) {
                        tracing::warn!(id, "duplicate identity token; keeping first occurrence");
                    } else {
                        out.insert(id, NodeAddr(path.clone()));
                    }
                }
                walk(&el.children, path, out);
                path.pop();
            }
        }

        let mut out = HashMap::new();
        walk(&self.children, &mut Vec::new(), &mut out);
        out
    }

    pub(crate) fn element(&self, addr: &NodeAddr) -> Option<&Element> {
        let (first, rest) = addr.0.split_first()?;
        let mut el = match self.children.get(*first)? {
            Node::Element(el) => el,
            Node::Text(_) => return None,
        };
        for &i in rest {
            match el.children.get(i)? {
                Node::Element(child) => el = child,
                Node::Text(_) => return None,
            }
        }
        Some(el)
    }

    pub(crate) fn element_mut(&mut self, addr: &NodeAddr) -> Option<&mut Element> {
        let (first, rest) = addr.0.split_first()?;
        let mut el = match self.children.get_mut(*first)? {
            Node::Element(el) => el,
            Node::Text(_) => return None,
        };
        for &i in rest {
            match el.children.get_mut(i)? {
                Node::Element(child) => el = child,
                Node::Text(_) => return None,
            }
        }
        Some(el)
    }
}
