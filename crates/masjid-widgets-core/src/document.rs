//! In-memory page document.
//!
//! The page is reduced to what the widgets touch: elements addressed by id,
//! each with child content, attributes, classes and a visibility flag, plus
//! the scripts injected into the page and the host hooks requested.
//! Updates aimed at ids the page does not contain are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::{Patch, RenderMap};
use crate::utils::escape_html;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Element {
    /// Inner markup.
    pub content: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub hidden: bool,
}

impl Element {
    pub fn inner_html(&self) -> String {
        self.content.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn apply(&mut self, patch: &Patch) {
        match patch {
            Patch::Html { html } => self.content = html.clone(),
            Patch::Text { text } => self.content = escape_html(text),
            Patch::Attr { name, value } => {
                self.attributes.insert(name.clone(), value.clone());
            }
            Patch::AddClass { classes } => self.classes.extend(classes.iter().cloned()),
            Patch::RemoveClass { classes } => {
                for class in classes {
                    self.classes.remove(class);
                }
            }
            Patch::Show => self.hidden = false,
            Patch::Hide => self.hidden = true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Page {
    pub url: String,
    elements: BTreeMap<String, Element>,
    pub scripts: Vec<String>,
    /// Markup appended at the end of `<body>`, e.g. floating buttons.
    pub body_nodes: Vec<String>,
    pub hooks: Vec<String>,
}

fn id_pattern() -> &'static Regex {
    static ID_PATTERN: OnceLock<Regex> = OnceLock::new();
    ID_PATTERN.get_or_init(|| {
        Regex::new(r#"\bid\s*=\s*["']([^"']+)["']"#).expect("element id pattern is valid")
    })
}

impl Page {
    /// A page containing the given element ids, all empty.
    pub fn new<I, S>(url: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.into(), Element::default()))
            .collect();
        Self {
            url: url.to_string(),
            elements,
            scripts: Vec::new(),
            body_nodes: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Build a page from HTML markup by collecting its `id` attributes.
    pub fn from_markup(url: &str, markup: &str) -> Self {
        let ids: Vec<String> = id_pattern()
            .captures_iter(markup)
            .map(|c| c[1].to_string())
            .collect();
        debug!(url = url, elements = ids.len(), "Page built from markup");
        Self::new(url, ids)
    }

    /// URL path, e.g. "/" or "/activities.html". Non-URLs are returned as given.
    pub fn path(&self) -> String {
        match Url::parse(&self.url) {
            Ok(url) => url.path().to_string(),
            Err(_) => self.url.clone(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(Element::inner_html)
    }

    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Apply a render map. Returns how many bindings found their element.
    pub fn apply(&mut self, map: &RenderMap) -> usize {
        let mut applied = 0;
        for binding in &map.bindings {
            match self.elements.get_mut(&binding.target) {
                Some(element) => {
                    element.apply(&binding.patch);
                    applied += 1;
                }
                None => debug!(target_id = %binding.target, "Element not found, skipping update"),
            }
        }
        applied
    }

    /// Add a script tag once. Returns false if it was already present.
    pub fn inject_script(&mut self, src: &str) -> bool {
        if self.scripts.iter().any(|s| s == src) {
            return false;
        }
        self.scripts.push(src.to_string());
        true
    }

    /// Append markup to the body unless a node with `class` is already there.
    pub fn append_to_body(&mut self, class: &str, html: String) -> bool {
        let marker = format!("class=\"{}\"", class);
        if self.body_nodes.iter().any(|n| n.contains(&marker)) {
            return false;
        }
        self.body_nodes.push(html);
        true
    }

    /// Ask the host page to run one of its own behaviours.
    pub fn request_hook(&mut self, hook: &str) {
        if !self.hooks.iter().any(|h| h == hook) {
            self.hooks.push(hook.to_string());
        }
    }
}
