//! Headless document model and the components that build the page.

pub mod components;
pub mod dom;
pub mod html;
pub mod listeners;
