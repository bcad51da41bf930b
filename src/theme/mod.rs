//! Theme preference: persisted light/dark/system choice, resolved against the
//! host's color-scheme preference and pushed to a presentation root.

pub mod file_store;
pub mod hints;
pub mod host;
pub mod memory;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

pub use file_store::JsonFileStore;
pub use hints::ClientHints;
pub use host::{
    AppearanceQuery, AppearanceSink, Capability, ChangeListener, PreferenceStore, Subscription,
};
pub use memory::{MemoryStore, PresentationRoot, SimulatedHost};

/// Storage key the mode is persisted under.
pub const STORAGE_KEY: &str = "theme-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidThemeMode(pub String);

impl fmt::Display for InvalidThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid theme mode: {:?} (expected light, dark or system)",
            self.0
        )
    }
}

impl std::error::Error for InvalidThemeMode {}

impl FromStr for ThemeMode {
    type Err = InvalidThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(InvalidThemeMode(other.to_string())),
        }
    }
}

/// Hint for native widgets (scrollbars, form controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// Effective appearance for a mode. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appearance {
    pub dark: bool,
    pub color_scheme: ColorScheme,
}

impl Appearance {
    pub fn from_dark(dark: bool) -> Self {
        Self {
            dark,
            color_scheme: if dark {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            },
        }
    }
}

pub struct ThemeManager<S, Q, K> {
    store: S,
    query: Q,
    sink: K,
}

impl<S, Q, K> ThemeManager<S, Q, K>
where
    S: PreferenceStore,
    Q: AppearanceQuery,
    K: AppearanceSink,
{
    pub fn new(store: S, query: Q, sink: K) -> Self {
        Self { store, query, sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Stored mode, or `System` when storage is missing or holds garbage.
    pub fn get_stored_theme(&self) -> ThemeMode {
        match self.store.read(STORAGE_KEY) {
            Capability::Available(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                tracing::debug!("ignoring stored theme: {e}");
                ThemeMode::System
            }),
            Capability::Available(None) => ThemeMode::System,
            Capability::Unavailable => {
                tracing::debug!("preference storage unavailable, assuming system theme");
                ThemeMode::System
            }
        }
    }

    pub fn set_stored_theme(&self, mode: ThemeMode) {
        if let Capability::Unavailable = self.store.write(STORAGE_KEY, mode.as_str()) {
            tracing::warn!("preference storage unavailable, theme {mode} not persisted");
        }
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.query.prefers_dark().unwrap_or(false)
    }

    pub fn appearance(&self, mode: ThemeMode) -> Appearance {
        let dark = match mode {
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
            ThemeMode::System => self.system_prefers_dark(),
        };
        Appearance::from_dark(dark)
    }

    pub fn apply_theme(&self, mode: ThemeMode) -> Appearance {
        let appearance = self.appearance(mode);
        self.sink.set_dark_marker(appearance.dark);
        self.sink.set_color_scheme_hint(appearance.color_scheme);
        tracing::debug!("applied theme {mode}: {}", appearance.color_scheme.as_str());
        appearance
    }

    /// Calls `on_change` on every system preference transition until the
    /// returned subscription is disposed.
    pub fn watch_system_theme(&self, on_change: impl Fn() + Send + Sync + 'static) -> Subscription {
        match self.query.subscribe(Arc::new(on_change)) {
            Capability::Available(sub) => sub,
            Capability::Unavailable => {
                tracing::debug!("host has no color-scheme notifications, watcher is inert");
                Subscription::inert()
            }
        }
    }
}

impl<S, Q, K> ThemeManager<S, Q, K>
where
    S: PreferenceStore + Send + Sync + 'static,
    Q: AppearanceQuery + Send + Sync + 'static,
    K: AppearanceSink + Send + Sync + 'static,
{
    /// Re-applies the theme on each system change while the stored mode is
    /// `System`. The listener only holds a weak reference to the manager.
    pub fn follow_system(self: &Arc<Self>) -> Subscription {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.watch_system_theme(move || {
            let Some(manager) = weak.upgrade() else {
                return;
            };
            if manager.get_stored_theme() == ThemeMode::System {
                manager.apply_theme(ThemeMode::System);
            }
        })
    }
}
