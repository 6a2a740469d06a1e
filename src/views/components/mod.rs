//! Render components. Each builds nodes into the [`Document`] and registers
//! the [`Action`](crate::events::Action)s its controls trigger.

use crate::models::analysis::RegimeKind;
use crate::views::dom::{Document, El, NodeId};

pub mod alert_card;
pub mod alerts_page;
pub mod contact;
pub mod faq;
pub mod hero;
pub mod modal;
pub mod pro_view;
pub mod result_card;
pub mod shell;
pub mod sidebar;
pub mod watchlist_item;

pub const MISSING: &str = "—";

/// `<section class="panel panel--intro">` with a title and muted lead text.
pub(crate) fn intro_panel(doc: &mut Document, parent: NodeId, title: &str, lead: &str) -> NodeId {
    let intro = doc.append_new(parent, El::new("section").class("panel panel--intro"));
    doc.append_new(intro, El::new("h1").class("panel__title").text(title));
    doc.append_new(
        intro,
        El::new("p").class("panel__text panel__text--muted").text(lead),
    );
    intro
}

/// Regime pill: the base class plus the uptrend/downtrend/sideways modifier.
pub(crate) fn regime_pill(doc: &mut Document, parent: NodeId, class: &str, text: &str, regime: &str) -> NodeId {
    let mut el = El::new("div").class(class).text(text);
    if let Some(modifier) = RegimeKind::classify(regime).css_class() {
        el = el.class(modifier);
    }
    doc.append_new(parent, el)
}

/// Cuts `text` to at most `max` characters, ending with an ellipsis.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", head.trim_end())
}
