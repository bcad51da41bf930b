//! Host capabilities the theme manager talks to.
//!
//! Every capability may be missing in a given host (headless runs, HTTP
//! requests without client hints, read-only profiles). Callers get an explicit
//! [`Capability::Unavailable`] instead of an error and must pick a fallback.

use std::fmt;
use std::sync::Arc;

use super::ColorScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Capability::Available(v) => v,
            Capability::Unavailable => fallback,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Capability<U> {
        match self {
            Capability::Available(v) => Capability::Available(f(v)),
            Capability::Unavailable => Capability::Unavailable,
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Capability::Available(v) => Some(v),
            Capability::Unavailable => None,
        }
    }
}

/// Persistent key-value storage, e.g. the browser's local storage or a
/// preferences file.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Capability<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Capability<()>;
}

/// Callback fired whenever the host's color-scheme preference flips.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// The host's "prefers dark" query and its change notification.
pub trait AppearanceQuery {
    fn prefers_dark(&self) -> Capability<bool>;
    fn subscribe(&self, listener: ChangeListener) -> Capability<Subscription>;
}

/// The presentation root: a dark marker plus a color-scheme hint.
pub trait AppearanceSink {
    fn set_dark_marker(&self, dark: bool);
    fn set_color_scheme_hint(&self, hint: ColorScheme);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn read(&self, key: &str) -> Capability<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Capability<()> {
        (**self).write(key, value)
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn read(&self, key: &str) -> Capability<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Capability<()> {
        (**self).write(key, value)
    }
}

impl<T: AppearanceQuery + ?Sized> AppearanceQuery for &T {
    fn prefers_dark(&self) -> Capability<bool> {
        (**self).prefers_dark()
    }

    fn subscribe(&self, listener: ChangeListener) -> Capability<Subscription> {
        (**self).subscribe(listener)
    }
}

impl<T: AppearanceQuery + ?Sized> AppearanceQuery for Arc<T> {
    fn prefers_dark(&self) -> Capability<bool> {
        (**self).prefers_dark()
    }

    fn subscribe(&self, listener: ChangeListener) -> Capability<Subscription> {
        (**self).subscribe(listener)
    }
}

impl<T: AppearanceSink + ?Sized> AppearanceSink for &T {
    fn set_dark_marker(&self, dark: bool) {
        (**self).set_dark_marker(dark)
    }

    fn set_color_scheme_hint(&self, hint: ColorScheme) {
        (**self).set_color_scheme_hint(hint)
    }
}

impl<T: AppearanceSink + ?Sized> AppearanceSink for Arc<T> {
    fn set_dark_marker(&self, dark: bool) {
        (**self).set_dark_marker(dark)
    }

    fn set_color_scheme_hint(&self, hint: ColorScheme) {
        (**self).set_color_scheme_hint(hint)
    }
}

/// Disposer for a registered listener. Deregisters on [`unsubscribe`] or on
/// drop, whichever comes first.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A disposer with nothing to dispose, handed out when the host cannot
    /// deliver notifications.
    pub fn inert() -> Self {
        Self { dispose: None }
    }

    pub fn is_inert(&self) -> bool {
        self.dispose.is_none()
    }

    pub fn unsubscribe(mut self) {
        self.dispose_now();
    }

    fn dispose_now(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("inert", &self.is_inert())
            .finish()
    }
}
