//! Name/value attribute protocol for introspection and scripting.

use std::fmt::Display;

use geom::{AlignPair, Offset, Padding, Size};

use crate::{error::Result, tree::Tree, WidgetId};

/// A single named attribute reported by a widget or by the tree on its
/// behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    /// Attribute name, as accepted by `set_attribute`.
    pub name: String,
    /// Current value, rendered in the same format `set_attribute` parses.
    pub value: String,
    /// True when the value equals the widget's default, so dumps can skip
    /// noise.
    pub is_default: bool,
}

impl Attr {
    /// Construct an attribute from any displayable value.
    pub fn new(name: impl Into<String>, value: impl Display, is_default: bool) -> Self {
        Attr {
            name: name.into(),
            value: value.to_string(),
            is_default,
        }
    }
}

impl Tree {
    /// Set an attribute by name from its string form.
    ///
    /// Attributes the tree manages (name, class, offset, padding, align,
    /// size, hidden) are parsed here; anything else is offered to the
    /// widget, whose answer says whether it recognized the name. Malformed
    /// values are parse errors.
    pub fn set_attribute(&mut self, id: WidgetId, name: &str, value: &str) -> Result<bool> {
        match name {
            "name" => {
                self.set_name(id, value)?;
                Ok(true)
            }
            "class" => {
                self.node_mut(id)?.classes =
                    value.split_whitespace().map(str::to_string).collect();
                Ok(true)
            }
            "offset" => {
                let offset: Offset = value.parse().map_err(crate::Error::from)?;
                self.set_offset(id, offset)?;
                Ok(true)
            }
            "padding" => {
                let padding: Padding = value.parse().map_err(crate::Error::from)?;
                self.set_padding(id, padding)?;
                Ok(true)
            }
            "align" => {
                let align: AlignPair = value.parse().map_err(crate::Error::from)?;
                self.set_align(id, align)?;
                Ok(true)
            }
            "size" => {
                let size: Size = value.parse().map_err(crate::Error::from)?;
                self.assign_size(id, size)?;
                self.request_relayout(id);
                Ok(true)
            }
            "hidden" => {
                let hidden = value.parse::<bool>().map_err(|_| {
                    crate::Error::Invalid(format!("expected true or false, got {value:?}"))
                })?;
                self.set_hidden(id, hidden)?;
                Ok(true)
            }
            _ => self.with_widget_mut(id, |w, ctx| w.set_attribute(name, value, ctx)),
        }
    }

    /// Visit every attribute of a widget: the tree-managed set first, then
    /// whatever the widget reports. Values render in the format
    /// [`Tree::set_attribute`] parses.
    pub fn attributes(&self, id: WidgetId, visit: &mut dyn FnMut(Attr)) -> Result<()> {
        let node = self.node(id)?;
        visit(Attr::new("name", &node.name, false));
        visit(Attr::new(
            "class",
            node.classes.join(" "),
            node.classes.is_empty(),
        ));
        visit(Attr::new("offset", node.offset, node.offset.is_zero()));
        visit(Attr::new(
            "padding",
            node.padding,
            node.padding == Padding::zero(),
        ));
        visit(Attr::new(
            "align",
            node.align,
            node.align == AlignPair::default(),
        ));
        visit(Attr::new("size", node.size, node.size.is_zero()));
        visit(Attr::new("hidden", node.hidden, !node.hidden));
        if let Some(w) = node.widget.as_deref() {
            w.attributes(visit);
        }
        Ok(())
    }
}
