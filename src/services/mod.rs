pub mod api_client;
pub mod local_store;
pub mod pref_store;
