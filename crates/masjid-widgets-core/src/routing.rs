//! Page routing: which widgets and page features each page activates.

use chrono::Datelike;
use tracing::debug;

use crate::cache::{keys, CacheManager};
use crate::config::Config;
use crate::document::Page;
use crate::render::{Node, RenderMap};
use crate::widgets::{RenderContext, WidgetKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute {
    Home,
    Activities,
    Other,
}

impl PageRoute {
    /// Dispatch on the trailing path segment: "/" is home, "activities.html" the activities page.
    pub fn from_path(path: &str) -> Self {
        if path.ends_with('/') {
            PageRoute::Home
        } else if path.ends_with("activities.html") {
            PageRoute::Activities
        } else {
            PageRoute::Other
        }
    }
}

/// Static parts of the page that need no endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFeature {
    FooterYear,
    ChatWidget,
    WhatsAppButton,
    CookieBar,
    SignUpModal,
    PillarsOfFaith,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Widget(WidgetKind),
    Feature(PageFeature),
}

/// Host hook names requested on the page.
pub mod hooks {
    pub const SIGNUP_MODAL: &str = "signup-modal";
    pub const PILLARS_OF_FAITH: &str = "pillars-of-faith";
}

/// Class marking the floating WhatsApp link.
const WHATSAPP_CLASS: &str = "whatsapp-float";

const EVERY_PAGE: [Activation; 7] = [
    Activation::Feature(PageFeature::WhatsAppButton),
    Activation::Feature(PageFeature::FooterYear),
    Activation::Feature(PageFeature::ChatWidget),
    Activation::Feature(PageFeature::CookieBar),
    Activation::Widget(WidgetKind::SalahTimetable),
    Activation::Widget(WidgetKind::Iqamah),
    Activation::Widget(WidgetKind::Hadith),
];

const HOME_PAGE: [Activation; 5] = [
    Activation::Widget(WidgetKind::Notices),
    Activation::Feature(PageFeature::PillarsOfFaith),
    Activation::Feature(PageFeature::SignUpModal),
    Activation::Widget(WidgetKind::Announcements),
    Activation::Widget(WidgetKind::LiveEvent),
];

const ACTIVITIES_PAGE: [Activation; 2] = [
    Activation::Widget(WidgetKind::LiveEvent),
    Activation::Widget(WidgetKind::Programmes),
];

pub fn activations_for(route: PageRoute) -> Vec<Activation> {
    let mut activations = EVERY_PAGE.to_vec();
    match route {
        PageRoute::Home => activations.extend(HOME_PAGE),
        PageRoute::Activities => activations.extend(ACTIVITIES_PAGE),
        PageRoute::Other => {}
    }
    activations
}

impl PageFeature {
    /// Paint the feature directly onto the page.
    pub fn apply(&self, page: &mut Page, ctx: &RenderContext, config: &Config, cache: &CacheManager) {
        match self {
            PageFeature::FooterYear => {
                page.apply(&RenderMap::new().text("footer-year", ctx.now.year().to_string()));
            }
            PageFeature::ChatWidget => {
                if !page.inject_script(&config.chat_widget_script) {
                    debug!("Chat widget already injected");
                }
            }
            PageFeature::WhatsAppButton => {
                let link = Node::new("a")
                    .attr("href", &config.whatsapp_url)
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .class(WHATSAPP_CLASS)
                    .attr("aria-label", "Chat on WhatsApp")
                    .child(Node::new("i").class("fa-brands fa-whatsapp whatsapp-icon"))
                    .build();
                if !page.append_to_body(WHATSAPP_CLASS, link) {
                    debug!("WhatsApp button already present");
                }
            }
            PageFeature::CookieBar => {
                // Only an absent or explicitly "false" consent shows the bar.
                let map = match cache.entry(keys::COOKIE_ACCEPTED).as_deref() {
                    None | Some("false") => RenderMap::new().add_class("cookie-bar", &["show"]),
                    Some(_) => RenderMap::new().hide("cookie-bar"),
                };
                page.apply(&map);
            }
            PageFeature::SignUpModal => {
                let is_set = |key: &str| cache.entry(key).is_some_and(|v| !v.is_empty());
                if is_set(keys::MODAL_SNOOZED) || is_set(keys::MODAL_REGISTERED) {
                    debug!("Sign-up modal snoozed or already registered");
                } else {
                    page.request_hook(hooks::SIGNUP_MODAL);
                }
            }
            PageFeature::PillarsOfFaith => page.request_hook(hooks::PILLARS_OF_FAITH),
        }
    }
}
