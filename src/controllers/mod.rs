//! The live-page controller.
//!
//! [`App`] is the single owner of the document, the session state and the
//! storage mirror. Every input (a browser event, a finished request, a timer)
//! arrives as an [`AppEvent`] and is handled to completion before the next
//! one, so no handler ever observes another half-way through. Work that has
//! to wait (HTTP calls, timers) is spawned and reports back through the
//! event channel.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::debounce::Debouncer;
use crate::events::{Action, EventKind, UiEvent};
use crate::models::{AlertRule, AnalysisResult, SessionState, WatchlistItem};
use crate::router::Route;
use crate::services::api_client::{AddOutcome, ApiClient, ApiError};
use crate::services::local_store::{LocalStorage, StorageWrite};
use crate::views::components::alert_card;
use crate::views::components::shell::Shell;
use crate::views::dom::{Document, NodeId};
use crate::views::listeners::Dispatch;

pub mod alerts_controller;
pub mod analyze_controller;
pub mod help_controller;
pub mod home_controller;
pub mod navigation_controller;
pub mod pro_controller;
pub mod watchlist_controller;

pub const MESSAGE_TTL: Duration = Duration::from_secs(4);
pub const PREFS_SAVE_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum AppEvent {
    Ui(UiEvent),

    Analyzed {
        ticker: String,
        result: Result<AnalysisResult, ApiError>,
        remaining: Vec<String>,
    },
    WatchlistLoaded(Result<Vec<WatchlistItem>, ApiError>),
    WatchlistAdded {
        ticker: String,
        result: Result<AddOutcome, ApiError>,
    },
    WatchlistRemoved {
        ticker: String,
        result: Result<(), ApiError>,
    },
    AlertsLoaded {
        pass: u64,
        result: Result<Vec<AlertRule>, ApiError>,
    },
    AlertRuleChanged {
        ticker: String,
        result: Result<(), ApiError>,
    },
    AlertsEnabled {
        ticker: String,
        result: Result<AlertRule, ApiError>,
    },
    WaitlistJoined {
        email: Option<String>,
        result: Result<(), ApiError>,
    },

    SavePrefs(u64),
    DismissMessage(u64),
    CloseModal(u64),
    RestoreCopyButton(u64),
}

/// Something only the browser can do, sent over the live socket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEffect {
    Render {
        html: String,
        focus: Option<NodeId>,
    },
    SetHash {
        fragment: String,
    },
    StorageSet {
        key: String,
        value: String,
    },
    Clipboard {
        text: String,
    },
    Prompt {
        token: u64,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
    Success,
}

/// Payload of the browser event currently being dispatched.
#[derive(Debug, Clone, Default)]
pub struct EventCtx {
    pub value: Option<String>,
    pub checked: Option<bool>,
    pub key: Option<String>,
}

/// What the page reported when it connected.
pub struct AppInit {
    pub api: ApiClient,
    pub storage: LocalStorage,
    pub fragment: String,
}

#[derive(Debug, Default)]
pub(crate) struct ModalState {
    /// focus owner when the modal opened
    return_focus: Option<NodeId>,
    /// source of the most recent open
    source: String,
    close_gen: u64,
}

#[derive(Debug)]
pub(crate) struct PendingPrompt {
    token: u64,
    ticker: String,
}

pub struct App {
    doc: Document,
    shell: Shell,
    state: SessionState,
    storage: LocalStorage,
    api: ApiClient,
    tx: UnboundedSender<AppEvent>,

    fragment: String,
    effects: Vec<HostEffect>,

    modal: ModalState,
    prefs_saver: Debouncer,
    message_gen: u64,
    alerts_pass: u64,
    analyze_label: Option<String>,
    faq_open: Option<String>,
    prompt: Option<PendingPrompt>,
    prompt_seq: u64,
    copy_gen: u64,

    last_html: String,
    last_focus: Option<NodeId>,
}

impl App {
    pub fn start(init: AppInit, tx: UnboundedSender<AppEvent>) -> Self {
        let mut doc = Document::new();
        let shell = crate::views::components::shell::mount(&mut doc);

        let mut app = Self {
            doc,
            shell,
            state: SessionState::default(),
            storage: init.storage,
            api: init.api,
            tx,
            fragment: String::new(),
            effects: Vec::new(),
            modal: ModalState::default(),
            prefs_saver: Debouncer::new(PREFS_SAVE_DELAY),
            message_gen: 0,
            alerts_pass: 0,
            analyze_label: None,
            faq_open: None,
            prompt: None,
            prompt_seq: 0,
            copy_gen: 0,
            last_html: String::new(),
            last_focus: None,
        };
        app.init(init.fragment);
        app
    }

    // ---------------- Accessors ----------------

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// The URL fragment as the page currently shows it.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn current_route(&self) -> Option<Route> {
        Route::parse(&self.fragment)
    }

    // ---------------- Event loop ----------------

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Ui(ui) => self.handle_ui(ui),

            AppEvent::Analyzed {
                ticker,
                result,
                remaining,
            } => self.on_analyzed(ticker, result, remaining),
            AppEvent::WatchlistLoaded(result) => self.on_watchlist_loaded(result),
            AppEvent::WatchlistAdded { ticker, result } => self.on_watchlist_added(ticker, result),
            AppEvent::WatchlistRemoved { ticker, result } => {
                self.on_watchlist_removed(ticker, result)
            }
            AppEvent::AlertsLoaded { pass, result } => self.on_alerts_loaded(pass, result),
            AppEvent::AlertRuleChanged { ticker, result } => {
                self.on_alert_rule_changed(ticker, result)
            }
            AppEvent::AlertsEnabled { ticker, result } => self.on_alerts_enabled(ticker, result),
            AppEvent::WaitlistJoined { email, result } => self.on_waitlist_joined(email, result),

            AppEvent::SavePrefs(generation) => {
                if self.prefs_saver.fire(generation) {
                    self.save_prefs_now();
                }
            }
            AppEvent::DismissMessage(generation) => {
                if generation == self.message_gen {
                    self.clear_message();
                }
            }
            AppEvent::CloseModal(generation) => {
                if generation == self.modal.close_gen {
                    self.close_pro_modal();
                }
            }
            AppEvent::RestoreCopyButton(generation) => self.restore_copy_button(generation),
        }

        self.run_observers();
    }

    fn handle_ui(&mut self, ui: UiEvent) {
        match ui {
            UiEvent::Click { node } => self.dispatch(node, EventKind::Click, EventCtx::default()),
            UiEvent::Input { node, value } => {
                // the page already shows what was typed; don't echo it back
                let in_sync = self.doc.inner_html(self.doc.root()) == self.last_html;
                self.doc.set_value(node, &value);
                if in_sync {
                    self.last_html = self.doc.inner_html(self.doc.root());
                }
                let ctx = EventCtx {
                    value: Some(value),
                    ..EventCtx::default()
                };
                self.dispatch(node, EventKind::Input, ctx);
            }
            UiEvent::Change {
                node,
                value,
                checked,
            } => {
                if let Some(v) = &value {
                    self.doc.set_value(node, v);
                }
                if let Some(c) = checked {
                    self.doc.set_checked(node, c);
                }
                self.dispatch(node, EventKind::Change, EventCtx { value, checked, key: None });
            }
            UiEvent::Submit { node } => self.dispatch(node, EventKind::Submit, EventCtx::default()),
            UiEvent::Keydown { key } => {
                let target = self.doc.active_element().unwrap_or(self.doc.root());
                let ctx = EventCtx {
                    key: Some(key),
                    ..EventCtx::default()
                };
                self.dispatch(target, EventKind::KeyDown, ctx);
            }
            UiEvent::Focus { node } => match node {
                Some(n) if self.doc.contains(n) => self.doc.focus(n),
                _ => self.doc.blur(),
            },
            UiEvent::HashChange { fragment } => self.on_hash_change(fragment),
            UiEvent::Prompt { token, value } => self.on_prompt_answer(token, value),
            UiEvent::Clipboard { ok } => self.on_clipboard_result(ok),
        }
    }

    fn dispatch(&mut self, target: NodeId, kind: EventKind, ctx: EventCtx) {
        if !self.doc.contains(target) {
            tracing::debug!("event for a node that is gone: {:?}", target);
            return;
        }
        if kind != EventKind::KeyDown && kind != EventKind::Submit && self.doc.is_disabled(target) {
            return;
        }
        for hit in self.doc.dispatch(target, kind) {
            self.run_action(hit, &ctx);
        }
    }

    fn run_action(&mut self, hit: Dispatch, ctx: &EventCtx) {
        match hit.action {
            Action::Navigate(route) => self.navigate(route),
            Action::SubmitAnalyze => self.submit_analyze(),
            Action::AddToWatchlist(ticker) => self.add_to_watchlist(ticker),
            Action::RemoveFromWatchlist(ticker) => self.remove_from_watchlist(ticker),
            Action::EnableAlerts(ticker) => self.enable_alerts(ticker),
            Action::OpenProModal(source) => self.upgrade_clicked(&source),
            Action::CloseProModal => self.close_pro_modal(),
            Action::OverlayClick => {
                if hit.target == hit.current {
                    self.close_pro_modal();
                }
            }
            Action::SubmitWaitlist => self.submit_waitlist(),
            Action::EscapeKey => {
                if ctx.key.as_deref() == Some("Escape") && self.pro_modal_open() {
                    self.close_pro_modal();
                }
            }
            Action::AlertsListClick => {
                if self
                    .doc
                    .closest_id(hit.target, alert_card::UPGRADE_BUTTON_ID)
                    .is_some()
                {
                    self.upgrade_clicked("alerts");
                }
            }
            Action::Pref { ticker, control } => {
                self.on_pref_control(&ticker, control, hit.current, ctx)
            }
            Action::ToggleRule(ticker) => {
                let enabled = ctx
                    .checked
                    .unwrap_or_else(|| self.doc.is_checked(hit.current));
                self.toggle_rule(ticker, enabled);
            }
            Action::RemoveRule(ticker) => self.remove_rule(ticker),
            Action::ToggleAdvanced { panel } => self.toggle_advanced(hit.current, panel),
            Action::ToggleFaq(id) => self.toggle_faq(id),
            Action::CopyContactEmail => self.copy_contact_email(),
        }
    }

    /// Reacts to child-list changes of observed nodes.
    fn run_observers(&mut self) {
        let changed = self.doc.take_mutations();
        if changed.contains(&self.shell.watchlist_list) {
            self.update_watchlist_lock();
        }
    }

    /// Drains everything the browser has to apply since the last call.
    pub fn flush(&mut self) -> Vec<HostEffect> {
        let mut out = Vec::new();

        let html = self.doc.inner_html(self.doc.root());
        let focus = self.doc.active_element();
        if html != self.last_html || focus != self.last_focus {
            self.last_html.clone_from(&html);
            self.last_focus = focus;
            out.push(HostEffect::Render { html, focus });
        }

        out.append(&mut self.effects);

        for StorageWrite { key, value } in self.storage.take_journal() {
            out.push(HostEffect::StorageSet { key, value });
        }
        out
    }

    // ---------------- Shared helpers ----------------

    /// Runs `call` off the event loop and feeds its result back as an event.
    pub(crate) fn spawn_call<F, Fut>(&self, call: F)
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = AppEvent> + Send + 'static,
    {
        let fut = call(self.api.clone());
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
    }

    pub(crate) fn after(&self, delay: Duration, event: AppEvent) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
    }

    pub(crate) fn show_message(&mut self, text: &str, kind: MessageKind) {
        let el = self.shell.global_message;
        self.doc.set_text(el, text);
        self.doc.set_classes(el, "global-message global-message--visible");
        match kind {
            MessageKind::Error => self.doc.toggle_class(el, "global-message--error", true),
            MessageKind::Success => self.doc.toggle_class(el, "global-message--success", true),
            MessageKind::Info => {}
        }

        self.message_gen += 1;
        self.after(MESSAGE_TTL, AppEvent::DismissMessage(self.message_gen));
    }

    pub(crate) fn show_error(&mut self, text: &str) {
        self.show_message(text, MessageKind::Error);
    }

    pub(crate) fn clear_message(&mut self) {
        let el = self.shell.global_message;
        for class in [
            "global-message--visible",
            "global-message--error",
            "global-message--success",
        ] {
            self.doc.toggle_class(el, class, false);
        }
        self.doc.set_text(el, "");
    }

    pub(crate) fn emit(&mut self, effect: HostEffect) {
        self.effects.push(effect);
    }
}
