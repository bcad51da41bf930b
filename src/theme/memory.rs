use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use super::host::{
    AppearanceQuery, AppearanceSink, Capability, ChangeListener, PreferenceStore, Subscription,
};
use super::ColorScheme;

/// In-process preference store. Can be built unavailable to stand in for a
/// host without storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            values: DashMap::new(),
            unavailable: true,
        }
    }

    /// Seeds a raw value, bypassing any validation.
    pub fn insert(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Capability<Option<String>> {
        if self.unavailable {
            return Capability::Unavailable;
        }
        Capability::Available(self.values.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, value: &str) -> Capability<()> {
        if self.unavailable {
            return Capability::Unavailable;
        }
        self.values.insert(key.to_string(), value.to_string());
        Capability::Available(())
    }
}

struct HostInner {
    prefers_dark: AtomicBool,
    query_supported: bool,
    notifications_supported: bool,
    listeners: DashMap<u64, ChangeListener>,
    next_id: AtomicU64,
}

/// An in-process host whose color-scheme preference is set by hand. Used by
/// headless runs and tests.
#[derive(Clone)]
pub struct SimulatedHost {
    inner: Arc<HostInner>,
}

impl SimulatedHost {
    pub fn new(prefers_dark: bool) -> Self {
        Self::build(prefers_dark, true, true)
    }

    /// Query works but changes are never announced.
    pub fn without_notifications(prefers_dark: bool) -> Self {
        Self::build(prefers_dark, true, false)
    }

    /// No appearance API at all.
    pub fn without_query() -> Self {
        Self::build(false, false, false)
    }

    fn build(prefers_dark: bool, query_supported: bool, notifications_supported: bool) -> Self {
        Self {
            inner: Arc::new(HostInner {
                prefers_dark: AtomicBool::new(prefers_dark),
                query_supported,
                notifications_supported,
                listeners: DashMap::new(),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Changes the preference and notifies listeners if it actually flipped.
    pub fn set_prefers_dark(&self, dark: bool) {
        let previous = self.inner.prefers_dark.swap(dark, Ordering::SeqCst);
        if previous == dark || !self.inner.notifications_supported {
            return;
        }
        // Snapshot first: a listener may subscribe or unsubscribe while running.
        let listeners: Vec<ChangeListener> = self
            .inner
            .listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        tracing::debug!(
            "system color scheme changed to {}, notifying {} listener(s)",
            if dark { "dark" } else { "light" },
            listeners.len()
        );
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl AppearanceQuery for SimulatedHost {
    fn prefers_dark(&self) -> Capability<bool> {
        if !self.inner.query_supported {
            return Capability::Unavailable;
        }
        Capability::Available(self.inner.prefers_dark.load(Ordering::SeqCst))
    }

    fn subscribe(&self, listener: ChangeListener) -> Capability<Subscription> {
        if !self.inner.notifications_supported {
            return Capability::Unavailable;
        }
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner.listeners.insert(id, listener);
        let inner = Arc::clone(&self.inner);
        Capability::Available(Subscription::new(move || {
            inner.listeners.remove(&id);
        }))
    }
}

const SCHEME_UNSET: u8 = 0;
const SCHEME_LIGHT: u8 = 1;
const SCHEME_DARK: u8 = 2;

/// Observable state of a [`PresentationRoot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootState {
    pub dark: bool,
    pub color_scheme: Option<ColorScheme>,
}

/// Presentation root that just remembers what was applied to it.
#[derive(Debug, Default)]
pub struct PresentationRoot {
    dark: AtomicBool,
    color_scheme: AtomicU8,
}

impl PresentationRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RootState {
        let color_scheme = match self.color_scheme.load(Ordering::SeqCst) {
            SCHEME_LIGHT => Some(ColorScheme::Light),
            SCHEME_DARK => Some(ColorScheme::Dark),
            _ => None,
        };
        RootState {
            dark: self.dark.load(Ordering::SeqCst),
            color_scheme,
        }
    }
}

impl AppearanceSink for PresentationRoot {
    fn set_dark_marker(&self, dark: bool) {
        self.dark.store(dark, Ordering::SeqCst);
    }

    fn set_color_scheme_hint(&self, hint: ColorScheme) {
        let raw = match hint {
            ColorScheme::Light => SCHEME_LIGHT,
            ColorScheme::Dark => SCHEME_DARK,
        };
        self.color_scheme.store(raw, Ordering::SeqCst);
    }
}
