use crate::views::dom::{Document, El, NodeId};

pub const OVERLAY_ID: &str = "pro-modal-overlay";
pub const EMAIL_ID: &str = "pro-waitlist-email";
pub const STATUS_ID: &str = "pro-waitlist-status";

const BENEFITS: [&str; 5] = [
    "More watchlist slots",
    "Batch scans",
    "Alerts",
    "Advanced decay + context",
    "AI summaries (optional)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProModal {
    pub overlay: NodeId,
    pub close: NodeId,
    pub email: NodeId,
    pub submit: NodeId,
    pub status: NodeId,
}

/// Kind of text shown in the modal's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
    Success,
}

/// Shows the upsell modal, building it under the root on first use.
pub fn show_pro_modal(doc: &mut Document) -> ProModal {
    let modal = match find_pro_modal(doc) {
        Some(m) => m,
        None => build(doc),
    };
    doc.set_hidden(modal.overlay, false);
    modal
}

pub fn hide_pro_modal(doc: &mut Document) {
    if let Some(overlay) = doc.find_by_id(OVERLAY_ID) {
        doc.set_hidden(overlay, true);
    }
}

pub fn is_open(doc: &Document) -> bool {
    doc.find_by_id(OVERLAY_ID)
        .is_some_and(|overlay| !doc.is_hidden(overlay))
}

pub fn find_pro_modal(doc: &Document) -> Option<ProModal> {
    Some(ProModal {
        overlay: doc.find_by_id(OVERLAY_ID)?,
        close: doc.find_by_id("pro-modal-close")?,
        email: doc.find_by_id(EMAIL_ID)?,
        submit: doc.find_by_id("pro-waitlist-submit")?,
        status: doc.find_by_id(STATUS_ID)?,
    })
}

pub fn set_status(doc: &mut Document, status: NodeId, text: &str, kind: StatusKind) {
    doc.set_text(status, text);
    doc.toggle_class(status, "pro-modal__status--error", kind == StatusKind::Error);
    doc.toggle_class(status, "pro-modal__status--success", kind == StatusKind::Success);
}

fn build(doc: &mut Document) -> ProModal {
    let root = doc.root();
    let overlay = doc.append_new(
        root,
        El::new("div")
            .id(OVERLAY_ID)
            .class("pro-modal__overlay")
            .hidden(true),
    );
    let modal = doc.append_new(
        overlay,
        El::new("div")
            .id("pro-modal")
            .class("pro-modal")
            .attr("role", "dialog")
            .attr("aria-modal", "true"),
    );

    let header = doc.append_new(modal, El::new("div").class("pro-modal__header"));
    doc.append_new(header, El::new("div").class("pro-modal__title").text("Upgrade to Pro"));
    let close = doc.append_new(
        header,
        El::button("×")
            .id("pro-modal-close")
            .class("pro-modal__close")
            .attr("aria-label", "Close"),
    );

    let body = doc.append_new(modal, El::new("div").class("pro-modal__body"));
    doc.append_new(
        body,
        El::new("p")
            .class("pro-modal__blurb")
            .text("Pro is coming soon. Join the waitlist to get early access."),
    );
    let list = doc.append_new(body, El::new("ul").class("pro-modal__list"));
    for item in BENEFITS {
        doc.append_new(list, El::new("li").class("pro-modal__item").text(item));
    }

    let form = doc.append_new(body, El::new("div").class("pro-modal__form"));
    let email = doc.append_new(
        form,
        El::new("input")
            .attr("type", "email")
            .id(EMAIL_ID)
            .class("pro-modal__input")
            .attr("placeholder", "Email (optional)")
            .value(""),
    );
    let submit = doc.append_new(
        form,
        El::button("Join waitlist")
            .id("pro-waitlist-submit")
            .class("pro-modal__submit"),
    );
    let status = doc.append_new(
        body,
        El::new("div")
            .id(STATUS_ID)
            .class("pro-modal__status")
            .attr("aria-live", "polite"),
    );

    ProModal {
        overlay,
        close,
        email,
        submit,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_once_and_toggled() {
        let mut doc = Document::new();
        assert!(!is_open(&doc));
        let first = show_pro_modal(&mut doc);
        assert!(is_open(&doc));
        hide_pro_modal(&mut doc);
        assert!(!is_open(&doc));
        let second = show_pro_modal(&mut doc);
        assert_eq!(first, second);
    }
}
