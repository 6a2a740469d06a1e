use crate::events::{Action, EventKind};
use crate::router::{is_blank_fragment, Route};
use crate::services::pref_store;
use crate::views::components::{contact, faq, hero, pro_view, sidebar};

use super::{App, HostEffect};

impl App {
    pub(crate) fn init(&mut self, fragment: String) {
        // v0 rule: Pro = email captured
        self.state.is_pro = pref_store::stored_alert_email(&self.storage).is_some();
        self.state.user_id = pref_store::load_or_create_user_id(&mut self.storage);
        self.state.alert_prefs_by_ticker = pref_store::load_alert_prefs(&self.storage);

        tracing::info!(
            target: "analytics",
            event = "returning_user",
            user_id = %self.state.user_id,
        );

        let upgrade = sidebar::render_sidebar(&mut self.doc, self.shell.sidebar);
        pro_view::render_pro_view(&mut self.doc, self.shell.pro_view);
        faq::render_faq_view(&mut self.doc, self.shell.faq_view, None);
        contact::render_contact_view(&mut self.doc, self.shell.contact_view);

        self.doc.on(
            upgrade,
            EventKind::Click,
            Action::OpenProModal("sidebar".to_string()),
        );
        self.doc
            .on(self.shell.analyze_form, EventKind::Submit, Action::SubmitAnalyze);

        if self
            .doc
            .find_all_by_class(self.shell.analyze_view, "hero")
            .is_empty()
        {
            let hero = hero::hero(&mut self.doc);
            self.doc.prepend(self.shell.analyze_view, hero);
        }

        self.fragment = fragment;
        if is_blank_fragment(&self.fragment) {
            self.navigate(Route::Analyze);
        } else {
            self.handle_route();
        }

        self.fetch_watchlist();
        self.wire_watchlist_lock_observer();
    }

    /// Writes the fragment and routes to it. Writing the fragment the page
    /// already shows is a no-op, as in the browser.
    pub(crate) fn navigate(&mut self, route: Route) {
        let fragment = route.fragment();
        if fragment == self.fragment {
            return;
        }
        self.fragment.clone_from(&fragment);
        self.emit(HostEffect::SetHash { fragment });
        self.handle_route();
    }

    pub(crate) fn on_hash_change(&mut self, fragment: String) {
        if fragment == self.fragment {
            return;
        }
        self.fragment = fragment;
        self.handle_route();
    }

    fn handle_route(&mut self) {
        match Route::parse(&self.fragment) {
            Some(route) => self.show_view(route),
            None => {
                tracing::debug!("unknown route {:?}, redirecting", self.fragment);
                self.hide_all_views();
                self.navigate(Route::Analyze);
            }
        }
        sidebar::set_active_sidebar_link(&mut self.doc, self.shell.sidebar, &self.fragment);
    }

    fn hide_all_views(&mut self) {
        for route in Route::ALL {
            self.doc.set_hidden(self.shell.view(route), true);
        }
    }

    fn show_view(&mut self, route: Route) {
        self.hide_all_views();
        let view = self.shell.view(route);

        match route {
            Route::Alerts => {
                self.doc.set_hidden(view, false);
                self.render_alerts_page();
            }
            Route::Faq => {
                self.faq_open = None;
                faq::render_faq_view(&mut self.doc, view, None);
                self.doc.set_hidden(view, false);
            }
            _ => self.doc.set_hidden(view, false),
        }
    }
}
