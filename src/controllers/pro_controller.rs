use std::sync::LazyLock;

use regex::Regex;

use crate::events::{Action, EventKind};
use crate::services::api_client::{ApiError, WaitlistRequest};
use crate::services::pref_store;
use crate::views::components::modal::{self, StatusKind};

use super::{App, AppEvent};

pub const MODAL_AUTO_CLOSE: std::time::Duration = std::time::Duration::from_millis(900);

pub const INVALID_EMAIL_MESSAGE: &str = "That email looks invalid (or leave it blank).";
pub const JOINED_MESSAGE: &str = "You're on the list. We'll reach out soon.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Permissive sanity check, only applied to a non-empty field.
pub fn looks_like_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl App {
    /// Entry point of every "Upgrade to Pro" button.
    pub(crate) fn upgrade_clicked(&mut self, source: &str) {
        tracing::info!(
            target: "analytics",
            event = "upgrade_clicked",
            source = %source,
            user_id = %self.state.user_id,
        );
        self.open_pro_modal(source);
    }

    pub(crate) fn open_pro_modal(&mut self, source: &str) {
        tracing::info!(
            target: "analytics",
            event = "pro_modal_viewed",
            source = %source,
            user_id = %self.state.user_id,
        );

        self.modal.return_focus = self.doc.active_element();
        self.modal.source = source.to_string();
        // a pending auto-close belongs to the previous opening
        self.modal.close_gen += 1;

        let m = modal::show_pro_modal(&mut self.doc);
        self.doc.wire_once(m.close, EventKind::Click, Action::CloseProModal);
        self.doc.wire_once(m.overlay, EventKind::Click, Action::OverlayClick);
        self.doc.wire_once(m.submit, EventKind::Click, Action::SubmitWaitlist);
        let root = self.doc.root();
        self.doc.wire_once(root, EventKind::KeyDown, Action::EscapeKey);

        modal::set_status(&mut self.doc, m.status, "", StatusKind::Info);
        self.doc.focus(m.email);
    }

    pub(crate) fn close_pro_modal(&mut self) {
        modal::hide_pro_modal(&mut self.doc);

        // the opener may have been re-rendered away meanwhile
        if let Some(el) = self.modal.return_focus.take().filter(|el| self.doc.is_connected(*el)) {
            self.doc.focus(el);
        }
    }

    pub(crate) fn pro_modal_open(&self) -> bool {
        modal::is_open(&self.doc)
    }

    pub(crate) fn submit_waitlist(&mut self) {
        let Some(m) = modal::find_pro_modal(&self.doc) else {
            return;
        };
        modal::set_status(&mut self.doc, m.status, "", StatusKind::Info);

        let email = self.doc.value(m.email).trim().to_string();
        if !email.is_empty() && !looks_like_email(&email) {
            modal::set_status(&mut self.doc, m.status, INVALID_EMAIL_MESSAGE, StatusKind::Error);
            return;
        }

        let email = (!email.is_empty()).then_some(email);
        let req = WaitlistRequest {
            email: email.clone(),
            user_id: Some(self.state.user_id.clone()).filter(|id| !id.is_empty()),
            intent: "upgrade_clicked".to_string(),
            source: self.modal.source.clone(),
        };

        self.spawn_call(move |api| async move {
            let result = api.join_waitlist(&req).await;
            AppEvent::WaitlistJoined { email, result }
        });
    }

    pub(crate) fn on_waitlist_joined(&mut self, email: Option<String>, result: Result<(), ApiError>) {
        let Some(m) = modal::find_pro_modal(&self.doc) else {
            return;
        };
        match result {
            Ok(()) => {
                modal::set_status(&mut self.doc, m.status, JOINED_MESSAGE, StatusKind::Success);
                if let Some(email) = email {
                    // v0: leaving an email here makes you Pro too
                    pref_store::store_alert_email(&mut self.storage, &email);
                    self.state.is_pro = true;
                }
                self.after(MODAL_AUTO_CLOSE, AppEvent::CloseModal(self.modal.close_gen));
            }
            Err(e) => {
                tracing::warn!("waitlist join failed: {}", e);
                modal::set_status(&mut self.doc, m.status, &e.to_string(), StatusKind::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check_is_permissive() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last+tag@sub.example.io"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a b@c.io"));
        assert!(!looks_like_email("@c.io"));
    }
}
