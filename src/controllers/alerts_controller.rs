use crate::events::{Action, EventKind, PrefControl};
use crate::models::alert::sort_rules;
use crate::models::prefs::parse_js_number;
use crate::models::{AlertPreferences, AlertRule, PrefChange};
use crate::router::Route;
use crate::services::api_client::ApiError;
use crate::services::pref_store;
use crate::views::components::alert_card::{
    self, AlertCard, CardFlags, CARD_CLASS, SEGMENT_CLASS, THRESHOLD_FIELD_CLASS,
};
use crate::views::components::alerts_page;
use crate::views::dom::{El, NodeId};

use super::{App, AppEvent, EventCtx, HostEffect, MessageKind, PendingPrompt};

pub const NO_EMAIL_MESSAGE: &str = "To manage alerts, analyze a stock first and enable alerts.";
pub const LOAD_FAILED_MESSAGE: &str = "Could not load alerts right now.";
pub const NO_ALERTS_MESSAGE: &str = "No alerts yet.";
pub const EMAIL_PROMPT: &str = "Enter your email to enable alerts:";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const NO_TICKER_MESSAGE: &str = "Could not determine ticker for alerts.";

impl App {
    /// Rebuilds the alerts view from scratch and starts a new render pass.
    pub(crate) fn render_alerts_page(&mut self) {
        self.alerts_pass += 1;
        let (empty, _list) = alerts_page::skeleton(&mut self.doc, self.shell.alerts_view);

        let Some(email) = pref_store::stored_alert_email(&self.storage) else {
            self.doc.set_text(empty, NO_EMAIL_MESSAGE);
            self.doc.append_new(empty, El::new("br"));
            let btn = self.doc.append_new(
                empty,
                El::button("Go to Analyze").class("analyze-form__button"),
            );
            self.doc
                .on(btn, EventKind::Click, Action::Navigate(Route::Analyze));
            return;
        };

        self.doc.set_text(empty, "Loading…");

        let pass = self.alerts_pass;
        self.spawn_call(move |api| async move {
            let result = api.list_alerts(&email).await;
            AppEvent::AlertsLoaded { pass, result }
        });
    }

    pub(crate) fn on_alerts_loaded(&mut self, pass: u64, result: Result<Vec<AlertRule>, ApiError>) {
        if pass != self.alerts_pass {
            tracing::debug!("dropping alerts response from render pass {}", pass);
            return;
        }
        let (Some(empty), Some(list)) = (
            self.doc.find_by_id(alerts_page::EMPTY_ID),
            self.doc.find_by_id(alerts_page::LIST_ID),
        ) else {
            return;
        };

        let mut rules = match result {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("alerts request failed: {}", e);
                self.doc.set_text(empty, LOAD_FAILED_MESSAGE);
                return;
            }
        };

        self.doc.set_text(empty, "");
        if rules.is_empty() {
            self.doc.set_text(empty, NO_ALERTS_MESSAGE);
            return;
        }
        sort_rules(&mut rules);

        // v0: Pro = email captured
        let flags = CardFlags {
            pro: pref_store::stored_alert_email(&self.storage).is_some(),
            alerts_enabled: true,
        };

        self.doc.clear_children(list);
        for rule in &rules {
            let ticker = rule.normalized_ticker();
            if ticker.is_empty() {
                continue;
            }
            let prefs = self.ensure_prefs_for_ticker(&ticker);
            let card = alert_card::alert_preferences_card(
                &mut self.doc,
                AlertCard {
                    ticker: &ticker,
                    prefs: &prefs,
                    flags,
                    rule_enabled: Some(rule.enabled),
                },
            );
            self.doc.append(list, card);
        }

        // one delegated listener per pass; the list node is new every pass
        self.doc.on(list, EventKind::Click, Action::AlertsListClick);
    }

    // ---------------- Preferences ----------------

    /// Returns the ticker's preferences, creating and persisting defaults
    /// the first time a ticker is seen.
    pub(crate) fn ensure_prefs_for_ticker(&mut self, ticker: &str) -> AlertPreferences {
        let t = ticker.trim().to_uppercase();
        if t.is_empty() {
            return AlertPreferences::default();
        }
        match self.state.alert_prefs_by_ticker.get(&t) {
            Some(existing) => {
                let normalized = existing.clone().normalized();
                self.state
                    .alert_prefs_by_ticker
                    .insert(t, normalized.clone());
                normalized
            }
            None => {
                let prefs = AlertPreferences::default();
                self.state.alert_prefs_by_ticker.insert(t, prefs.clone());
                self.schedule_prefs_save();
                prefs
            }
        }
    }

    pub(crate) fn update_preferences(&mut self, ticker: &str, next: AlertPreferences) {
        let t = ticker.trim().to_uppercase();
        if t.is_empty() {
            return;
        }
        self.state.alert_prefs_by_ticker.insert(t, next.normalized());
        self.schedule_prefs_save();
    }

    fn schedule_prefs_save(&mut self) {
        self.prefs_saver.schedule(&self.tx, AppEvent::SavePrefs);
    }

    pub(crate) fn save_prefs_now(&mut self) {
        pref_store::save_alert_prefs(&mut self.storage, &self.state.alert_prefs_by_ticker);
    }

    pub(crate) fn on_pref_control(
        &mut self,
        ticker: &str,
        control: PrefControl,
        node: NodeId,
        ctx: &EventCtx,
    ) {
        let checked = || ctx.checked.unwrap_or_else(|| self.doc.is_checked(node));
        let number = || {
            let raw = ctx.value.as_deref().unwrap_or_else(|| self.doc.value(node));
            parse_js_number(raw).filter(|n| n.is_finite())
        };

        let change = match control {
            PrefControl::RegimeShift => PrefChange::RegimeShift(checked()),
            PrefControl::HealthDelta => PrefChange::HealthDeltaEnabled(checked()),
            PrefControl::Sensitivity(s) => PrefChange::Sensitivity(s),
            PrefControl::TrendPressure => PrefChange::TrendPressure(checked()),
            PrefControl::Thresholds => PrefChange::ThresholdsEnabled(checked()),
            PrefControl::Below => match number() {
                Some(n) => PrefChange::ThresholdBelow(n),
                None => return,
            },
            PrefControl::Above => match number() {
                Some(n) => PrefChange::ThresholdAbove(n),
                None => return,
            },
        };

        let current = self.ensure_prefs_for_ticker(ticker);
        let next = current.with_change(&change);
        self.update_preferences(ticker, next);
        self.sync_card_controls(node, &change);
    }

    /// Keeps dependent controls of the card in step with the edit just made.
    fn sync_card_controls(&mut self, node: NodeId, change: &PrefChange) {
        let Some(card) = self.doc.closest(node, &|el| el.classes.iter().any(|c| c == CARD_CLASS))
        else {
            return;
        };
        match change {
            PrefChange::HealthDeltaEnabled(on) => {
                for btn in self.doc.find_all_by_class(card, SEGMENT_CLASS) {
                    self.doc.set_disabled(btn, !on);
                }
                for seg in self.doc.find_all_by_class(card, "segmented-control") {
                    self.doc.toggle_class(seg, "segmented-control--disabled", !on);
                }
            }
            PrefChange::Sensitivity(_) => alert_card::select_segment(&mut self.doc, node),
            PrefChange::ThresholdsEnabled(on) => {
                for field in self.doc.find_all_by_class(card, THRESHOLD_FIELD_CLASS) {
                    self.doc.set_disabled(field, !on);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn toggle_advanced(&mut self, button: NodeId, panel: NodeId) {
        let open = self.doc.is_hidden(panel);
        self.doc.set_hidden(panel, !open);
        self.doc
            .set_attr(button, "aria-expanded", if open { "true" } else { "false" });
    }

    // ---------------- Server rules ----------------

    pub(crate) fn toggle_rule(&mut self, ticker: String, enabled: bool) {
        let Some(email) = pref_store::stored_alert_email(&self.storage) else {
            return;
        };
        self.spawn_call(move |api| async move {
            let result = api
                .set_alert_enabled(&email, &ticker, enabled)
                .await
                .map(|_| ());
            AppEvent::AlertRuleChanged { ticker, result }
        });
    }

    pub(crate) fn remove_rule(&mut self, ticker: String) {
        let Some(email) = pref_store::stored_alert_email(&self.storage) else {
            return;
        };
        self.spawn_call(move |api| async move {
            let result = api.delete_alert(&email, &ticker).await;
            AppEvent::AlertRuleChanged { ticker, result }
        });
    }

    pub(crate) fn on_alert_rule_changed(&mut self, ticker: String, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                if self.current_route() == Some(Route::Alerts) {
                    self.render_alerts_page();
                }
            }
            Err(e) => {
                tracing::warn!("alert rule update for {} failed: {}", ticker, e);
                self.show_error(&e.to_string());
            }
        }
    }

    // ---------------- Enable alerts from a result card ----------------

    pub(crate) fn enable_alerts(&mut self, ticker: String) {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            self.show_error(NO_TICKER_MESSAGE);
            return;
        }
        self.clear_message();

        match pref_store::stored_alert_email(&self.storage) {
            Some(email) => self.upsert_alert_rule(email, ticker),
            None => {
                self.prompt_seq += 1;
                let token = self.prompt_seq;
                self.prompt = Some(PendingPrompt { token, ticker });
                self.emit(HostEffect::Prompt {
                    token,
                    message: EMAIL_PROMPT.to_string(),
                });
            }
        }
    }

    /// Answer to the email prompt. `None` means the user cancelled.
    pub(crate) fn on_prompt_answer(&mut self, token: u64, value: Option<String>) {
        let Some(pending) = self.prompt.take_if(|p| p.token == token) else {
            tracing::debug!("ignoring answer to stale prompt {}", token);
            return;
        };

        let Some(email) = value.as_deref().and_then(pref_store::clean_email) else {
            self.show_error(INVALID_EMAIL_MESSAGE);
            return;
        };
        pref_store::store_alert_email(&mut self.storage, &email);
        self.state.is_pro = true;
        self.upsert_alert_rule(email, pending.ticker);
    }

    fn upsert_alert_rule(&mut self, email: String, ticker: String) {
        self.spawn_call(move |api| async move {
            let result = api.upsert_alert(&email, &ticker, true).await;
            AppEvent::AlertsEnabled { ticker, result }
        });
    }

    pub(crate) fn on_alerts_enabled(&mut self, ticker: String, result: Result<AlertRule, ApiError>) {
        match result {
            Ok(_) => {
                self.show_message(&format!("Alerts enabled for {}.", ticker), MessageKind::Success);
                if self.current_route() == Some(Route::Alerts) {
                    self.render_alerts_page();
                }
            }
            Err(e) => {
                tracing::warn!("enable alerts for {} failed: {}", ticker, e);
                self.show_error(&e.to_string());
            }
        }
    }
}
