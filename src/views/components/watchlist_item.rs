use crate::events::{Action, EventKind};
use crate::models::analysis::format_number;
use crate::models::WatchlistItem;
use crate::views::dom::{Document, El, NodeId};

pub const SUMMARY_FALLBACK: &str = "Saved ticker. Analyze again to refresh its summary.";
const SNIPPET_LEN: usize = 140;

pub fn watchlist_item(doc: &mut Document, item: &WatchlistItem) -> NodeId {
    let signals = &item.signals;
    let row = doc.create(El::new("div").class("watchlist-item"));

    let left = doc.append_new(row, El::new("div").class("watchlist-item__left"));
    doc.append_new(
        left,
        El::new("div").class("watchlist-item__ticker").text(&item.ticker),
    );
    if let Some(score) = signals.health {
        doc.append_new(
            left,
            El::new("div")
                .class("watchlist-item__snippet")
                .text(&format!("Trend Health: {}/100", format_number(score))),
        );
    }
    if let Some(delta) = signals.delta_1d {
        doc.append_new(
            left,
            El::new("div")
                .class("watchlist-item__snippet")
                .text(&format!("Daily Change in Health: {}", format_number(delta))),
        );
    }
    let summary = item.summary.as_deref().unwrap_or(SUMMARY_FALLBACK);
    doc.append_new(
        left,
        El::new("div")
            .class("watchlist-item__snippet")
            .text(&super::truncate_text(summary, SNIPPET_LEN)),
    );

    let right = doc.append_new(row, El::new("div").class("watchlist-item__right"));
    super::regime_pill(
        doc,
        right,
        "watchlist-item__momentum-pill",
        signals.regime_label(),
        signals.regime_label(),
    );
    let remove = doc.append_new(
        right,
        El::button("Remove").class("watchlist-item__remove-btn"),
    );
    if !item.ticker.is_empty() {
        doc.on(
            remove,
            EventKind::Click,
            Action::RemoveFromWatchlist(item.ticker.clone()),
        );
    }

    row
}
