use crate::router::Route;
use crate::views::dom::{Document, El, NodeId};

pub const UPGRADE_BUTTON_ID: &str = "upgrade-btn";
const ACTIVE_CLASS: &str = "sidebar__link--active";

/// Renders brand, navigation and the upgrade entry point into `mount`.
/// Returns the upgrade button so the controller can wire it.
pub fn render_sidebar(doc: &mut Document, mount: NodeId) -> NodeId {
    doc.clear_children(mount);

    let container = doc.append_new(mount, El::new("div").class("sidebar"));

    let brand = doc.append_new(container, El::new("div").class("sidebar__brand"));
    doc.append_new(brand, El::new("div").class("sidebar__logo").text("FT"));
    doc.append_new(brand, El::new("div").class("sidebar__title").text("FriendlyTicker"));

    let nav = doc.append_new(container, El::new("nav").class("sidebar__nav"));
    for route in Route::ALL {
        doc.append_new(
            nav,
            El::new("a")
                .class("sidebar__link")
                .attr("href", &route.fragment())
                .text(route.nav_label()),
        );
    }

    let upgrade = doc.append_new(container, El::new("div").class("sidebar__upgrade"));
    doc.append_new(
        upgrade,
        El::button("Upgrade to Pro").id(UPGRADE_BUTTON_ID).class("sidebar__cta"),
    )
}

/// Highlights the link whose href equals the current fragment exactly.
pub fn set_active_sidebar_link(doc: &mut Document, sidebar: NodeId, fragment: &str) {
    let current = if fragment.is_empty() {
        Route::Analyze.fragment()
    } else if fragment.starts_with('#') {
        fragment.to_string()
    } else {
        format!("#{fragment}")
    };

    for link in doc.find_all_by_class(sidebar, "sidebar__link") {
        let active = doc.attr(link, "href") == Some(current.as_str());
        doc.toggle_class(link, ACTIVE_CLASS, active);
    }
}
