use axum::http::HeaderMap;

use super::host::{AppearanceQuery, Capability, ChangeListener, Subscription};

/// Client hint header carrying the browser's `prefers-color-scheme` value.
pub const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

/// Appearance query answered from a single HTTP request's client hints.
///
/// A request is a one-off snapshot, so change notifications are never
/// available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientHints {
    prefers_dark: Option<bool>,
}

impl ClientHints {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let prefers_dark = headers
            .get(PREFERS_COLOR_SCHEME)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| {
                // Structured header: the value may be sent quoted.
                match v.trim().trim_matches('"').to_ascii_lowercase().as_str() {
                    "dark" => Some(true),
                    "light" => Some(false),
                    _ => None,
                }
            });
        Self { prefers_dark }
    }
}

impl AppearanceQuery for ClientHints {
    fn prefers_dark(&self) -> Capability<bool> {
        match self.prefers_dark {
            Some(dark) => Capability::Available(dark),
            None => Capability::Unavailable,
        }
    }

    fn subscribe(&self, _listener: ChangeListener) -> Capability<Subscription> {
        Capability::Unavailable
    }
}
