//! Dark/light display mode.
//!
//! `ThemeController` is the single owner of the flag. The presentation layer
//! observes it through a `watch` receiver; every toggle publishes exactly once,
//! in the same call that flips the state.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

pub const THEME_COOKIE: &str = "theme";
const COOKIE_MAX_AGE_SECS: u32 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

pub struct ThemeController {
    signal: watch::Sender<Theme>,
}

impl ThemeController {
    pub fn new(initial: Theme) -> Self {
        let (signal, _) = watch::channel(initial);
        Self { signal }
    }

    pub fn current(&self) -> Theme {
        *self.signal.borrow()
    }

    /// Read-only view of the theme for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.signal.subscribe()
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        // send_replace publishes even when nobody is subscribed yet
        self.signal.send_replace(next);
        debug!("Theme toggled to {}", next.as_str());
        next
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Reads the persisted theme from the request cookies. Missing or unknown values
/// fall back to the default.
pub fn theme_from_headers(headers: &HeaderMap) -> Theme {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == THEME_COOKIE)
        .and_then(|(_, value)| Theme::parse(value))
        .unwrap_or_default()
}

pub fn theme_cookie(theme: Theme) -> String {
    format!(
        "{THEME_COOKIE}={}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax",
        theme.as_str()
    )
}
