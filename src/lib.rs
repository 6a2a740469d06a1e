//! Library entrypoint for FriendlyTicker.
//!
//! The binary only wires settings, templates and the router together; the
//! controllers, views and services live here so integration tests under
//! `tests/` can drive them directly.

pub mod config;
pub mod debounce;
pub mod events;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

// Page-level rendering stays reachable as `crate::render` / `crate::templates`.
#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;
pub mod ws;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
}
