use crate::views::dom::{Document, El, NodeId};

const COMING_SOON: [&str; 5] = [
    "Alerts (email/SMS) when trend breaks",
    "More watchlist slots",
    "Faster multi-ticker analysis",
    "Advanced decay + context",
    "AI summaries (optional)",
];

pub fn render_pro_view(doc: &mut Document, mount: NodeId) {
    doc.clear_children(mount);

    let intro = doc.append_new(mount, El::new("section").class("panel panel--intro"));
    doc.append_new(intro, El::new("h1").class("panel__title").text("FriendlyTicker Pro"));
    let lead = doc.append_new(
        intro,
        El::new("p")
            .class("panel__text")
            .text("Unlock deeper signals, higher limits, and faster workflows. "),
    );
    doc.append_new(lead, El::new("strong").text("(Payments coming later)"));
    doc.append_new(
        intro,
        El::new("p")
            .class("panel__text panel__text--muted")
            .text("Join the waitlist from any Upgrade button to hear when Pro opens."),
    );

    let card = doc.append_new(mount, El::new("section").class("card"));
    let header = doc.append_new(card, El::new("header").class("card__header"));
    doc.append_new(header, El::new("h2").class("card__title").text("Coming soon"));

    let list = doc.append_new(card, El::new("ul").class("pro-list"));
    for item in COMING_SOON {
        doc.append_new(list, El::new("li").class("pro-list__item").text(item));
    }

    doc.append_new(
        card,
        El::button("Upgrade (coming soon)")
            .class("analyze-form__button")
            .disabled(true),
    );
}
