use once_cell::sync::Lazy;
use std::{env, time::Duration};

/// Holds all tunables, read-once from ENV with fallbacks.
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub listen_addr: String,
    pub auth_scope: String,
    pub tick_interval: Duration,
    pub debounce_window: Duration,
    pub request_timeout: Duration,
    pub display_width: u32,
    pub display_height: u32,
    pub max_text_width: u32,
}

impl Settings {
    fn from_env() -> Self {
        // optionally load .env
        let _ = dotenvy::dotenv();

        // helper to read a string
        fn parse_string(var: &str, default: &str) -> String {
            env::var(var).unwrap_or_else(|_| default.to_string())
        }

        // helper to parse u32
        fn parse_u32(var: &str, default: u32) -> u32 {
            env::var(var)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        // helper to parse seconds into Duration
        fn parse_secs(var: &str, default_secs: u64) -> Duration {
            env::var(var)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or_else(|| Duration::from_secs(default_secs))
        }

        // helper to parse millis into Duration
        fn parse_millis(var: &str, default_ms: u64) -> Duration {
            env::var(var)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(default_ms))
        }

        Settings {
            client_id: parse_string("SPOTIFY_CLIENT_ID", ""),
            client_secret: parse_string("SPOTIFY_CLIENT_SECRET", ""),
            redirect_uri: parse_string("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:8080/callback"),
            listen_addr: parse_string("REMOTE_LISTEN_ADDR", "0.0.0.0:8080"),
            auth_scope: parse_string(
                "SPOTIFY_AUTH_SCOPE",
                "user-read-private user-read-currently-playing user-modify-playback-state",
            ),
            tick_interval: parse_millis("TICK_INTERVAL_MS", 30),
            debounce_window: parse_millis("DEBOUNCE_WINDOW_MS", 20),
            request_timeout: parse_secs("REQUEST_TIMEOUT_SECS", 10),
            display_width: parse_u32("DISPLAY_WIDTH_PX", 128),
            display_height: parse_u32("DISPLAY_HEIGHT_PX", 64),
            max_text_width: parse_u32("MAX_TEXT_WIDTH_PX", 95),
        }
    }
}

/// Global settings instance
pub static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);
