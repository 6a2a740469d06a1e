use crate::views::dom::{Document, El, NodeId};

pub const EMPTY_ID: &str = "alerts-empty";
pub const LIST_ID: &str = "alerts-list";

/// Intro panel plus the "Your alerts" card. Returns the status line and the
/// list container.
pub fn skeleton(doc: &mut Document, view: NodeId) -> (NodeId, NodeId) {
    doc.clear_children(view);

    super::intro_panel(
        doc,
        view,
        "Alerts",
        "View and manage your alert preferences per ticker.",
    );

    let card = doc.append_new(view, El::new("section").class("card"));
    let header = doc.append_new(card, El::new("header").class("card__header"));
    doc.append_new(header, El::new("h2").class("card__title").text("Your alerts"));

    let empty = doc.append_new(
        card,
        El::new("div")
            .id(EMPTY_ID)
            .class("panel__text panel__text--muted")
            .attr("aria-live", "polite"),
    );
    let list = doc.append_new(card, El::new("div").id(LIST_ID).attr("aria-live", "polite"));
    (empty, list)
}
