use std::env;

pub const DEFAULT_LOCAL_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REMOTE_API_BASE: &str = "https://friendlyticker-api.onrender.com";

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    /// Forces one backend regardless of the page's hostname.
    pub api_base: Option<String>,
    pub local_api_base: String,
    pub remote_api_base: String,

    pub static_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base: None,
            local_api_base: DEFAULT_LOCAL_API_BASE.to_string(),
            remote_api_base: DEFAULT_REMOTE_API_BASE.to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl Settings {
    /// Backend base URL for a page served from `hostname`: loopback hosts
    /// talk to the local backend, everything else to the hosted one.
    pub fn api_base_for_host(&self, hostname: &str) -> String {
        if let Some(base) = &self.api_base {
            return base.clone();
        }
        match hostname.trim() {
            "localhost" | "127.0.0.1" => self.local_api_base.clone(),
            _ => self.remote_api_base.clone(),
        }
    }
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let host = env::var("HOST").unwrap_or(defaults.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let api_base = env::var("FT_API_BASE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let local_api_base = env::var("FT_LOCAL_API_BASE").unwrap_or(defaults.local_api_base);
    let remote_api_base = env::var("FT_REMOTE_API_BASE").unwrap_or(defaults.remote_api_base);
    let static_dir = env::var("FT_STATIC_DIR").unwrap_or(defaults.static_dir);

    Settings {
        host,
        port,
        api_base,
        local_api_base,
        remote_api_base,
        static_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_hosts_use_local_backend() {
        let s = Settings::default();
        assert_eq!(s.api_base_for_host("localhost"), DEFAULT_LOCAL_API_BASE);
        assert_eq!(s.api_base_for_host("127.0.0.1"), DEFAULT_LOCAL_API_BASE);
        assert_eq!(s.api_base_for_host("friendlyticker.app"), DEFAULT_REMOTE_API_BASE);
        assert_eq!(s.api_base_for_host(""), DEFAULT_REMOTE_API_BASE);
    }

    #[test]
    fn explicit_base_wins() {
        let s = Settings {
            api_base: Some("http://10.0.0.5:9000".into()),
            ..Settings::default()
        };
        assert_eq!(s.api_base_for_host("localhost"), "http://10.0.0.5:9000");
    }
}
