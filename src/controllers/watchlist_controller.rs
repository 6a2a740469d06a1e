use crate::models::WatchlistItem;
use crate::services::api_client::{AddOutcome, ApiError};
use crate::views::components::watchlist_item::watchlist_item;
use crate::views::dom::El;

use super::{App, AppEvent, MessageKind};

/// Free-tier slots; the server enforces the real limit.
pub const FREE_WATCHLIST_LIMIT: usize = 3;

pub const LOCK_HINT_ID: &str = "watchlist-lock-hint";
pub const LIMIT_MESSAGE: &str = "Pro required to add more tickers to your watchlist.";

impl App {
    /// Loads the list in the background. Failures are logged only.
    pub(crate) fn fetch_watchlist(&mut self) {
        self.spawn_call(|api| async move { AppEvent::WatchlistLoaded(api.list_watchlist().await) });
    }

    pub(crate) fn on_watchlist_loaded(&mut self, result: Result<Vec<WatchlistItem>, ApiError>) {
        match result {
            Ok(items) => self.render_watchlist(&items),
            Err(e) => tracing::warn!("watchlist request failed: {}", e),
        }
    }

    fn render_watchlist(&mut self, items: &[WatchlistItem]) {
        let list = self.shell.watchlist_list;
        self.doc.clear_children(list);

        let has_items = !items.is_empty();
        self.doc.set_hidden(self.shell.watchlist_empty, has_items);

        for item in items {
            let row = watchlist_item(&mut self.doc, item);
            self.doc.append(list, row);
        }
    }

    pub(crate) fn add_to_watchlist(&mut self, ticker: String) {
        self.clear_message();
        self.spawn_call(move |api| async move {
            let result = api.add_to_watchlist(&ticker).await;
            AppEvent::WatchlistAdded { ticker, result }
        });
    }

    pub(crate) fn on_watchlist_added(&mut self, ticker: String, result: Result<AddOutcome, ApiError>) {
        match result {
            Ok(AddOutcome::Added) => {
                tracing::info!(
                    target: "analytics",
                    event = "watchlist_add_success",
                    ticker = %ticker,
                    user_id = %self.state.user_id,
                );
                self.show_message("Added to your watchlist.", MessageKind::Success);
                self.fetch_watchlist();
            }
            Ok(AddOutcome::ProRequired(message)) => {
                tracing::info!(
                    target: "analytics",
                    event = "watchlist_limit_hit",
                    ticker = %ticker,
                    user_id = %self.state.user_id,
                );
                self.show_error(message.as_deref().unwrap_or(LIMIT_MESSAGE));
                self.open_pro_modal("limit_watchlist");
            }
            Err(e) => {
                tracing::warn!("add {} to watchlist failed: {}", ticker, e);
                self.show_error(&e.to_string());
            }
        }
    }

    pub(crate) fn remove_from_watchlist(&mut self, ticker: String) {
        self.clear_message();
        self.spawn_call(move |api| async move {
            let result = api.remove_from_watchlist(&ticker).await;
            AppEvent::WatchlistRemoved { ticker, result }
        });
    }

    pub(crate) fn on_watchlist_removed(&mut self, ticker: String, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.show_message("Removed from your watchlist.", MessageKind::Success);
                self.fetch_watchlist();
            }
            Err(e) => {
                tracing::warn!("remove {} from watchlist failed: {}", ticker, e);
                self.show_error(&e.to_string());
            }
        }
    }

    // ---------------- Lock indicator ----------------

    pub(crate) fn wire_watchlist_lock_observer(&mut self) {
        self.update_watchlist_lock();
        self.doc.observe_child_list(self.shell.watchlist_list);
    }

    /// Advisory only: flags the view once the free slots are used up.
    pub(crate) fn update_watchlist_lock(&mut self) {
        let view = self.shell.watchlist_view;
        let locked = self.doc.children(self.shell.watchlist_list).len() >= FREE_WATCHLIST_LIMIT;

        let hint = match self.doc.find_by_id(LOCK_HINT_ID) {
            Some(hint) => hint,
            None => {
                let hint = self.doc.create(
                    El::new("div")
                        .id(LOCK_HINT_ID)
                        .class("watchlist-lock-hint")
                        .text("Pro required to add more than 3 tickers to your watchlist."),
                );
                self.doc.append_new(
                    hint,
                    El::new("span")
                        .class("watchlist-lock-hint__small")
                        .text("Upgrade to unlock more watchlist slots."),
                );
                self.doc.prepend(view, hint);
                hint
            }
        };
        self.doc.set_hidden(hint, !locked);

        let add_button = self
            .doc
            .find_in(view, &|el| el.id.as_deref() == Some("watchlist-add-btn"))
            .or_else(|| self.doc.find_all_by_class(view, "watchlist-add-btn").first().copied());
        if let Some(button) = add_button {
            self.doc.toggle_class(button, "watchlist-add-btn--locked", locked);
            self.doc.set_disabled(button, locked);
        }
    }
}
