use crate::events::{Action, EventKind};
use crate::models::analysis::format_number;
use crate::models::AnalysisResult;
use crate::views::dom::{Document, El, NodeId};

pub const SUMMARY_FALLBACK: &str =
    "We couldn't generate a full summary yet, but the current regime is shown above.";

pub const UPGRADE_BUTTON_ID: &str = "upgrade-btn-analyze";

/// Result card for one analyzed ticker. Created detached; the caller
/// appends it to the results panel.
pub fn result_card(doc: &mut Document, result: &AnalysisResult) -> NodeId {
    let ticker = result.ticker.clone();
    let signals = &result.signals;

    let card = doc.create(El::new("div").class("result-card"));

    // header: big ticker left, regime pill right
    let header = doc.append_new(card, El::new("div").class("result-card__header"));
    let left = doc.append_new(header, El::new("div"));
    doc.append_new(left, El::new("div").class("result-card__ticker").text(&ticker));
    let right = doc.append_new(header, El::new("div"));
    super::regime_pill(
        doc,
        right,
        "result-card__pill",
        &format!("Regime: {}", signals.regime_label()),
        signals.regime_label(),
    );

    if let Some(score) = signals.health {
        doc.append_new(
            card,
            El::new("div")
                .class("result-card__score")
                .text(&format!("Trend Health: {}/100", format_number(score))),
        );
    }

    let change = doc.append_new(card, El::new("div").class("result-card__change-signals"));
    doc.append_new(
        change,
        El::new("div").class("result-card__change-title").text("Change Signals"),
    );
    if let Some(delta) = signals.delta_1d {
        doc.append_new(
            change,
            El::new("div")
                .class("result-card__delta")
                .text(&format!("Daily Change in Health: {}", format_number(delta))),
        );
    }
    doc.append_new(
        change,
        El::new("div")
            .class("result-card__decay")
            .text(&format!("Trend Pressure: {}", signals.pressure)),
    );

    doc.append_new(
        card,
        El::new("p")
            .class("result-card__summary")
            .text(result.summary.as_deref().unwrap_or(SUMMARY_FALLBACK)),
    );

    let actions = doc.append_new(card, El::new("div").class("result-card__actions"));

    let add = doc.append_new(
        actions,
        El::button("Add to watchlist").class("result-card__watchlist-btn"),
    );
    if !ticker.is_empty() {
        doc.on(add, EventKind::Click, Action::AddToWatchlist(ticker.clone()));
    }

    let alerts = doc.append_new(
        actions,
        El::button("Enable alerts (Pro)").class("result-card__watchlist-btn"),
    );
    doc.on(alerts, EventKind::Click, Action::EnableAlerts(ticker));

    let upgrade = doc.append_new(
        actions,
        El::button("Upgrade to Pro")
            .id(UPGRADE_BUTTON_ID)
            .class("result-card__watchlist-btn"),
    );
    doc.on(upgrade, EventKind::Click, Action::OpenProModal("analyze".to_string()));

    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_signals_and_fallback_summary() {
        let mut doc = Document::new();
        let result = AnalysisResult::from_value(&json!({
            "ticker": "aapl",
            "signals": { "regime": "Uptrend", "trend_score": 82, "delta_1d": -3 }
        }));
        let card = result_card(&mut doc, &result);
        let text = doc.text_content(card);
        assert!(text.contains("AAPL"));
        assert!(text.contains("Regime: Uptrend"));
        assert!(text.contains("Trend Health: 82/100"));
        assert!(text.contains("Daily Change in Health: -3"));
        assert!(text.contains("Trend Pressure: Stable"));
        assert!(text.contains(SUMMARY_FALLBACK));

        let pill = doc.find_all_by_class(card, "result-card__pill")[0];
        assert!(doc.has_class(pill, "momentum--uptrend"));
    }

    #[test]
    fn omits_missing_score_and_delta() {
        let mut doc = Document::new();
        let result = AnalysisResult::from_value(&json!({ "ticker": "X", "summary": "Quiet." }));
        let card = result_card(&mut doc, &result);
        assert!(doc.find_all_by_class(card, "result-card__score").is_empty());
        assert!(doc.find_all_by_class(card, "result-card__delta").is_empty());
        assert!(doc.text_content(card).contains("Regime: —"));
    }
}
