//! Declarative render maps.
//!
//! Widgets never touch the page directly. They return a `RenderMap`: an
//! ordered list of element-id bindings that `Page::apply` executes. This
//! keeps every widget testable as a pure function from data to bindings.

use serde::{Deserialize, Serialize};

use crate::utils::escape_html;

/// A single change to one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace the element content with markup.
    Html { html: String },
    /// Replace the element content with escaped text.
    Text { text: String },
    /// Set an attribute such as `href` or `src`.
    Attr { name: String, value: String },
    AddClass { classes: Vec<String> },
    RemoveClass { classes: Vec<String> },
    Show,
    Hide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Binding {
    pub target: String,
    pub patch: Patch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RenderMap {
    pub bindings: Vec<Binding>,
}

fn owned(classes: &[&str]) -> Vec<String> {
    classes.iter().map(|c| c.to_string()).collect()
}

impl RenderMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, target: &str, patch: Patch) -> Self {
        self.bindings.push(Binding {
            target: target.to_string(),
            patch,
        });
        self
    }

    pub fn html(self, target: &str, html: impl Into<String>) -> Self {
        self.push(target, Patch::Html { html: html.into() })
    }

    pub fn text(self, target: &str, text: impl Into<String>) -> Self {
        self.push(target, Patch::Text { text: text.into() })
    }

    pub fn attr(self, target: &str, name: &str, value: impl Into<String>) -> Self {
        self.push(
            target,
            Patch::Attr {
                name: name.to_string(),
                value: value.into(),
            },
        )
    }

    pub fn add_class(self, target: &str, classes: &[&str]) -> Self {
        self.push(target, Patch::AddClass { classes: owned(classes) })
    }

    pub fn remove_class(self, target: &str, classes: &[&str]) -> Self {
        self.push(target, Patch::RemoveClass { classes: owned(classes) })
    }

    pub fn show(self, target: &str) -> Self {
        self.push(target, Patch::Show)
    }

    pub fn hide(self, target: &str) -> Self {
        self.push(target, Patch::Hide)
    }

    /// Bindings aimed at `target`, in order.
    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Patch> + 'a {
        self.bindings
            .iter()
            .filter(move |b| b.target == target)
            .map(|b| &b.patch)
    }

    /// The last text written to `target`, if any. Handy in tests.
    pub fn text_of(&self, target: &str) -> Option<&str> {
        self.bindings.iter().rev().find_map(|b| match &b.patch {
            Patch::Text { text } if b.target == target => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Small markup builder for list widgets.
pub struct Node {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<String>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, escape_html(value)));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(escape_html(text));
        self
    }

    /// Trusted markup, e.g. a description authored in the admin console.
    pub fn raw(mut self, html: &str) -> Self {
        self.children.push(html.to_string());
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node.build());
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn build(self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
        if matches!(self.tag, "img" | "br") {
            out.push('>');
            return out;
        }
        out.push('>');
        for child in &self.children {
            out.push_str(child);
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}
