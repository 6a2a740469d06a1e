//! Alert preference card and the small controls it is built from.

use crate::events::{Action, EventKind, PrefControl};
use crate::models::analysis::format_number;
use crate::models::{AlertPreferences, Sensitivity};
use crate::views::dom::{Document, El, NodeId};

pub const UPGRADE_BUTTON_ID: &str = "upgrade-btn-alerts";

pub const CARD_CLASS: &str = "alert-card";
pub const SEGMENT_CLASS: &str = "segmented-control__option";
pub const THRESHOLD_FIELD_CLASS: &str = "alert-threshold-input__field";

/// Feature gating for a card: everything is shown, controls are disabled
/// unless the user is Pro and alerts are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFlags {
    pub pro: bool,
    pub alerts_enabled: bool,
}

impl CardFlags {
    pub fn gated(self) -> bool {
        !(self.pro && self.alerts_enabled)
    }
}

pub fn pro_badge(doc: &mut Document) -> NodeId {
    doc.create(El::new("span").class("pro-badge").text("PRO"))
}

pub struct ToggleRow<'a> {
    pub label: &'a str,
    pub description: Option<&'a str>,
    pub value: bool,
    pub disabled: bool,
    pub on_change: Option<Action>,
    pub right_slot: Option<NodeId>,
}

/// Label and description on the left, a checkbox switch on the right.
pub fn toggle_row(doc: &mut Document, props: ToggleRow<'_>) -> NodeId {
    let mut row_el = El::new("div").class("toggle-row");
    if props.disabled {
        row_el = row_el.class("toggle-row--disabled");
    }
    let row = doc.create(row_el);

    let left = doc.append_new(row, El::new("div").class("toggle-row__left"));
    doc.append_new(left, El::new("div").class("toggle-row__label").text(props.label));
    if let Some(desc) = props.description {
        doc.append_new(left, El::new("div").class("toggle-row__description").text(desc));
    }

    let right = doc.append_new(row, El::new("div").class("toggle-row__right"));
    let switch = doc.append_new(
        right,
        El::checkbox(props.value)
            .class("toggle-row__switch")
            .disabled(props.disabled),
    );
    if let (false, Some(action)) = (props.disabled, props.on_change) {
        doc.on(switch, EventKind::Change, action);
    }

    if let Some(slot) = props.right_slot {
        let wrap = doc.append_new(right, El::new("div").class("toggle-row__slot"));
        doc.append(wrap, slot);
    }
    row
}

/// Pill buttons; the one matching `value` is marked active.
pub fn segmented_control(
    doc: &mut Document,
    options: &[(&str, Option<Action>)],
    value: &str,
    disabled: bool,
) -> NodeId {
    let mut root_el = El::new("div").class("segmented-control");
    if disabled {
        root_el = root_el.class("segmented-control--disabled");
    }
    let root = doc.create(root_el);

    for (label, action) in options {
        let active = *label == value;
        let mut btn_el = El::button(label)
            .class(SEGMENT_CLASS)
            .attr("aria-pressed", if active { "true" } else { "false" })
            .disabled(disabled);
        if active {
            btn_el = btn_el.class("is-active");
        }
        let btn = doc.append_new(root, btn_el);
        if let Some(action) = action {
            doc.on(btn, EventKind::Click, action.clone());
        }
    }
    root
}

/// Marks `selected` as the active option among its sibling pills.
pub fn select_segment(doc: &mut Document, selected: NodeId) {
    let Some(root) = doc.parent(selected) else {
        return;
    };
    for btn in doc.children(root).to_vec() {
        let on = btn == selected;
        doc.toggle_class(btn, "is-active", on);
        doc.set_attr(btn, "aria-pressed", if on { "true" } else { "false" });
    }
}

pub struct AlertCard<'a> {
    pub ticker: &'a str,
    pub prefs: &'a AlertPreferences,
    pub flags: CardFlags,
    /// Server-side rule state; adds the on/off switch and Remove button.
    pub rule_enabled: Option<bool>,
}

pub fn alert_preferences_card(doc: &mut Document, props: AlertCard<'_>) -> NodeId {
    let ticker = props.ticker.trim().to_uppercase();
    let p = props.prefs;
    let gated = props.flags.gated();
    // controls only report when they belong to a real, ungated ticker
    let live = !gated && !ticker.is_empty();
    let pref = |control: PrefControl| {
        live.then(|| Action::Pref {
            ticker: ticker.clone(),
            control,
        })
    };

    let mut card_el = El::new("section").class("alert-card card");
    if gated {
        card_el = card_el.class("alert-card--gated").attr("data-gated", "1");
    }
    if props.rule_enabled == Some(false) {
        card_el = card_el.class("alert-card--disabled");
    }
    let card = doc.create(card_el);

    // header
    let header = doc.append_new(card, El::new("div").class("alert-card__header"));
    let left = doc.append_new(header, El::new("div").class("alert-card__left"));
    doc.append_new(left, El::new("div").class("alert-card__ticker").text(&ticker));
    doc.append_new(left, El::new("div").class("alert-card__sub").text("Alert preferences"));

    let right = doc.append_new(header, El::new("div").class("alert-card__right"));
    if !props.flags.pro {
        let badge = pro_badge(doc);
        doc.append(right, badge);
    }
    doc.append_new(
        right,
        El::new("div")
            .class("alert-card__status")
            .text(if gated { "Pro required" } else { "Active" }),
    );

    if let (Some(enabled), false) = (props.rule_enabled, ticker.is_empty()) {
        let rule = doc.append_new(right, El::new("div").class("alert-card__rule"));
        let toggle = doc.append_new(
            rule,
            El::checkbox(enabled)
                .class("alert-toggle")
                .attr("aria-label", "Alert on"),
        );
        doc.on(toggle, EventKind::Change, Action::ToggleRule(ticker.clone()));
        let remove = doc.append_new(rule, El::button("Remove").class("alert-remove-btn"));
        doc.on(remove, EventKind::Click, Action::RemoveRule(ticker.clone()));
    }

    // body
    let body = doc.append_new(card, El::new("div").class("alert-card__body"));

    let row = toggle_row(
        doc,
        ToggleRow {
            label: "Regime shift",
            description: Some("Notify when trend regime flips (Uptrend/Sideways/Downtrend)."),
            value: p.regime_shift,
            disabled: gated,
            on_change: pref(PrefControl::RegimeShift),
            right_slot: None,
        },
    );
    doc.append(body, row);

    let options: Vec<(&str, Option<Action>)> = Sensitivity::ALL
        .iter()
        .map(|s| (s.label(), pref(PrefControl::Sensitivity(*s))))
        .collect();
    let seg = segmented_control(
        doc,
        &options,
        p.health_delta.sensitivity.label(),
        gated || !p.health_delta.enabled,
    );
    let row = toggle_row(
        doc,
        ToggleRow {
            label: "Trend Health delta (Δ 1D)",
            description: Some("Notify when Trend Health changes sharply day-over-day."),
            value: p.health_delta.enabled,
            disabled: gated,
            on_change: pref(PrefControl::HealthDelta),
            right_slot: Some(seg),
        },
    );
    doc.append(body, row);

    let row = toggle_row(
        doc,
        ToggleRow {
            label: "Trend Pressure increases",
            description: Some("Notify when pressure shifts (cooling / breaking down / improving)."),
            value: p.trend_pressure,
            disabled: gated,
            on_change: pref(PrefControl::TrendPressure),
            right_slot: None,
        },
    );
    doc.append(body, row);

    // advanced, collapsed by default
    let advanced = doc.append_new(body, El::new("div").class("alert-advanced"));
    let adv_btn = doc.append_new(
        advanced,
        El::button("Advanced")
            .class("alert-advanced__toggle")
            .attr("aria-expanded", "false"),
    );
    let panel = doc.append_new(
        advanced,
        El::new("div").class("alert-advanced__panel").hidden(true),
    );
    doc.on(adv_btn, EventKind::Click, Action::ToggleAdvanced { panel });

    let thresholds_on = p.thresholds.enabled;
    let row = toggle_row(
        doc,
        ToggleRow {
            label: "Health thresholds",
            description: Some("Optional: alert when Trend Health crosses a level."),
            value: thresholds_on,
            disabled: gated,
            on_change: pref(PrefControl::Thresholds),
            right_slot: None,
        },
    );
    doc.append(panel, row);

    let inputs = doc.append_new(panel, El::new("div").class("alert-threshold-inputs"));
    for (label, value, control) in [
        ("Below", p.thresholds.below, PrefControl::Below),
        ("Above", p.thresholds.above, PrefControl::Above),
    ] {
        let wrap = doc.append_new(inputs, El::new("label").class("alert-threshold-input"));
        doc.append_new(
            wrap,
            El::new("span").class("alert-threshold-input__label").text(label),
        );
        let field = doc.append_new(
            wrap,
            El::new("input")
                .attr("type", "number")
                .attr("min", "0")
                .attr("max", "100")
                .attr("step", "1")
                .class(THRESHOLD_FIELD_CLASS)
                .value(&format_number(value))
                .disabled(gated || !thresholds_on),
        );
        if let Some(action) = pref(control) {
            doc.on(field, EventKind::Change, action);
        }
    }

    // footer CTA, only when gated
    if gated {
        let footer = doc.append_new(card, El::new("div").class("alert-card__footer"));
        let note = if props.flags.alerts_enabled {
            "Alerts are Pro. Join the waitlist / upgrade to unlock."
        } else {
            "Alerts are coming soon."
        };
        doc.append_new(footer, El::new("div").class("alert-card__note").text(note));
        doc.append_new(
            footer,
            El::button("Upgrade to Pro")
                .id(UPGRADE_BUTTON_ID)
                .class("alert-card__cta"),
        );
    }

    card
}
