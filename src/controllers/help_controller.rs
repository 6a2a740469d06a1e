use std::time::Duration;

use crate::views::components::contact::{CONTACT_EMAIL, COPY_BUTTON_ID, COPY_LABEL, COPY_TOAST_ID};
use crate::views::components::faq;

use super::{App, AppEvent, HostEffect};

pub const COPY_RESET_DELAY: Duration = Duration::from_millis(1200);

impl App {
    /// Opens `id`, or closes it when it is already the open item.
    pub(crate) fn toggle_faq(&mut self, id: String) {
        self.faq_open = if self.faq_open.as_deref() == Some(id.as_str()) {
            None
        } else {
            Some(id)
        };
        faq::render_faq_view(&mut self.doc, self.shell.faq_view, self.faq_open.as_deref());
    }

    /// Asks the browser to write the address; the outcome comes back as a
    /// clipboard event.
    pub(crate) fn copy_contact_email(&mut self) {
        self.emit(HostEffect::Clipboard {
            text: CONTACT_EMAIL.to_string(),
        });
    }

    pub(crate) fn on_clipboard_result(&mut self, ok: bool) {
        let toast = self.doc.find_by_id(COPY_TOAST_ID);

        if !ok {
            tracing::warn!("clipboard write was refused");
            if let Some(toast) = toast {
                self.doc
                    .set_text(toast, &format!("Couldn’t copy. Email: {}", CONTACT_EMAIL));
            }
            return;
        }

        if let Some(button) = self.doc.find_by_id(COPY_BUTTON_ID) {
            self.doc.set_text(button, "Copied!");
            self.doc.set_disabled(button, true);
        }
        if let Some(toast) = toast {
            self.doc.set_text(toast, "Email copied to clipboard");
        }

        self.copy_gen += 1;
        self.after(COPY_RESET_DELAY, AppEvent::RestoreCopyButton(self.copy_gen));
    }

    pub(crate) fn restore_copy_button(&mut self, generation: u64) {
        if generation != self.copy_gen {
            return;
        }
        if let Some(button) = self.doc.find_by_id(COPY_BUTTON_ID) {
            self.doc.set_text(button, COPY_LABEL);
            self.doc.set_disabled(button, false);
        }
        if let Some(toast) = self.doc.find_by_id(COPY_TOAST_ID) {
            self.doc.set_text(toast, "");
        }
    }
}
