use crate::animation::lerp::Lerp;
use crate::diagram::model::{Attr, AttrValue, Diagram, NodeAddr};
use crate::foundation::core::Rgb8;

/// One attribute of one matched primitive that differs between source and target.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionEntry {
    /// Identity token shared by the source and target primitives.
    pub id: String,
    /// Animated attribute.
    pub attr: Attr,
    /// Value in the source diagram.
    pub from: AttrValue,
    /// Value in the target diagram.
    pub to: AttrValue,
    pub(crate) addr: NodeAddr,
}

impl TransitionEntry {
    /// Interpolated value at eased progress `t`.
    pub fn sample(&self, t: f64) -> AttrValue {
        match (self.from, self.to) {
            (AttrValue::Number(a), AttrValue::Number(b)) => {
                AttrValue::Number(<f64 as Lerp>::lerp(&a, &b, t))
            }
            (AttrValue::Color(a), AttrValue::Color(b)) => {
                AttrValue::Color(<Rgb8 as Lerp>::lerp(&a, &b, t))
            }
            // Kinds are fixed per attribute, so mixed pairs never reach a transition.
            _ => {
                if t < 1.0 {
                    self.from
                } else {
                    self.to
                }
            }
        }
    }
}

/// The per-attribute start/end pairs animating one diagram into another.
///
/// Addresses point into the source diagram, which is the tree being mutated while the morph runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transition {
    entries: Vec<TransitionEntry>,
}

impl Transition {
    /// Diff every primitive whose identity token appears in both diagrams.
    ///
    /// Primitives without a token, or without a counterpart, contribute nothing.
    pub fn between(source: &Diagram, target: &Diagram) -> Self {
        let target_index = target.identity_index();
        let mut source_index: Vec<_> = source.identity_index().into_iter().collect();
        source_index.sort_by(|a, b| a.1.0.cmp(&b.1.0));

        let mut entries = Vec::new();
        for (id, src_addr) in source_index {
            let Some(dst_addr) = target_index.get(id) else {
                continue;
            };
            let (Some(src), Some(dst)) = (source.element(&src_addr), target.element(dst_addr))
            else {
                continue;
            };

            for (&attr, &from) in &src.attrs {
                let Some(&to) = dst.attrs.get(&attr) else {
                    continue;
                };
                if from == to || from.kind() != to.kind() {
                    continue;
                }
                entries.push(TransitionEntry {
                    id: id.to_owned(),
                    attr,
                    from,
                    to,
                    addr: src_addr.clone(),
                });
            }
        }

        Self { entries }
    }

    /// Entries in source document order.
    pub fn entries(&self) -> &[TransitionEntry] {
        &self.entries
    }

    /// Number of animated attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing animates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry's value at eased progress `t` into `displayed`.
    pub(crate) fn apply(&self, displayed: &mut Diagram, t: f64) {
        for entry in &self.entries {
            if let Some(el) = displayed.element_mut(&entry.addr) {
                el.set(entry.attr, entry.sample(t));
            }
        }
    }

    /// Render the source diagram as it looks at eased progress `t`, without any engine state.
    ///
    /// At `t >= 1` this is the target verbatim, matching what the engine shows on completion.
    pub fn sample_at(source: &Diagram, target: &Diagram, t: f64) -> Diagram {
        if t >= 1.0 {
            return target.clone();
        }
        let mut out = source.clone();
        Self::between(source, target).apply(&mut out, t.max(0.0));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/transition.rs"]
mod tests;
