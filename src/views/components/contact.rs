use crate::events::{Action, EventKind};
use crate::views::dom::{Document, El, NodeId};

pub const CONTACT_EMAIL: &str = "friendlyticker@gmail.com";
pub const COPY_BUTTON_ID: &str = "copy-email-btn";
pub const COPY_TOAST_ID: &str = "copy-toast";
pub const COPY_LABEL: &str = "Copy email";

pub fn render_contact_view(doc: &mut Document, mount: NodeId) {
    doc.clear_children(mount);
    super::intro_panel(doc, mount, "Contact", "Questions, feedback, or feature requests?");

    let card = doc.append_new(mount, El::new("section").class("card"));
    doc.append_new(
        card,
        El::new("p").class("panel__text").text(
            "We’d love to hear what you want next: bugs, feature ideas, or anything confusing.",
        ),
    );

    let actions = doc.append_new(card, El::new("div").class("contact-actions"));
    doc.append_new(
        actions,
        El::new("a")
            .class("analyze-form__button")
            .attr(
                "href",
                &format!("mailto:{CONTACT_EMAIL}?subject=FriendlyTicker%20Feedback"),
            )
            .text("Email FriendlyTicker"),
    );
    let copy = doc.append_new(
        actions,
        El::button(COPY_LABEL).id(COPY_BUTTON_ID).class("contact-copy-btn"),
    );
    doc.on(copy, EventKind::Click, Action::CopyContactEmail);

    doc.append_new(
        card,
        El::new("div").class("panel__text panel__text--muted").text(CONTACT_EMAIL),
    );
    doc.append_new(
        card,
        El::new("div")
            .id(COPY_TOAST_ID)
            .class("contact-toast")
            .attr("aria-live", "polite"),
    );
}
