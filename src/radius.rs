//! Preferred-radius state and its persistence.
//!
//! The preferred radius lets a single click place a radius point at a remembered
//! distance instead of the click distance. It is clamped to configured bounds
//! and written through to an optional [`RadiusStore`].
//!
//! Stores never fail loudly: storage that is missing, unreadable or corrupt is
//! logged and treated as "no stored value".

#[cfg(test)]
#[path = "radius_test.rs"]
mod radius_test;

use std::cell::Cell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::CompassConfig;
use crate::consts::{DEFAULT_PREFERRED_RADIUS, PREFERRED_RADIUS_MAX, PREFERRED_RADIUS_MIN};

/// Persistence for the preferred radius.
pub trait RadiusStore {
    /// The stored radius, or `None` if nothing usable is stored.
    fn load_radius(&self) -> Option<f64>;

    /// Store `radius`. Failures are swallowed.
    fn save_radius(&self, radius: f64);
}

impl<T: RadiusStore + ?Sized> RadiusStore for Rc<T> {
    fn load_radius(&self) -> Option<f64> {
        (**self).load_radius()
    }

    fn save_radius(&self, radius: f64) {
        (**self).save_radius(radius);
    }
}

/// In-memory store, for hosts without storage and for tests.
#[derive(Debug, Default)]
pub struct MemoryRadiusStore {
    value: Cell<Option<f64>>,
}

impl MemoryRadiusStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_radius(radius: f64) -> Self {
        Self { value: Cell::new(Some(radius)) }
    }
}

impl RadiusStore for MemoryRadiusStore {
    fn load_radius(&self) -> Option<f64> {
        self.value.get()
    }

    fn save_radius(&self, radius: f64) {
        self.value.set(Some(radius));
    }
}

/// On-disk record written by [`JsonFileRadiusStore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct StoredRadius {
    radius: f64,
}

/// Stores the radius as a small JSON file: `{"radius": 120.0}`.
#[derive(Debug, Clone)]
pub struct JsonFileRadiusStore {
    path: PathBuf,
}

impl JsonFileRadiusStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RadiusStore for JsonFileRadiusStore {
    fn load_radius(&self) -> Option<f64> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read stored radius");
                return None;
            }
        };
        match serde_json::from_str::<StoredRadius>(&raw) {
            Ok(stored) if stored.radius.is_finite() => Some(stored.radius),
            Ok(stored) => {
                tracing::warn!(path = %self.path.display(), radius = stored.radius, "ignoring non-finite stored radius");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt stored radius");
                None
            }
        }
    }

    fn save_radius(&self, radius: f64) {
        let raw = match serde_json::to_string(&StoredRadius { radius }) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode radius");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to store radius");
        }
    }
}

/// The preferred radius, clamped to `[min, max]`.
pub struct RadiusState {
    current: f64,
    min: f64,
    max: f64,
    store: Option<Box<dyn RadiusStore>>,
}

impl RadiusState {
    /// A state with no backing store. `initial` is clamped into range.
    #[must_use]
    pub fn new(initial: f64, min: f64, max: f64) -> Self {
        let mut state = Self { current: min, min, max, store: None };
        state.current = state.clamp(initial).unwrap_or(min);
        state
    }

    /// Attach `store`, hydrating the current radius from it when it holds a value.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn RadiusStore>) -> Self {
        if let Some(stored) = store.load_radius().and_then(|r| self.clamp(r)) {
            self.current = stored;
        }
        self.store = Some(store);
        self
    }

    /// Build from configuration, backed by the configured radius file if any.
    #[must_use]
    pub fn from_config(config: &CompassConfig) -> Self {
        let state = Self::new(config.default_radius, config.radius_min, config.radius_max);
        match &config.radius_file {
            Some(path) => state.with_store(Box::new(JsonFileRadiusStore::new(path.clone()))),
            None => state,
        }
    }

    #[must_use]
    pub fn current_radius(&self) -> f64 {
        self.current
    }

    /// Set the preferred radius, clamped into range, and persist it.
    /// Non-finite values are ignored.
    pub fn set_current_radius(&mut self, radius: f64) {
        let Some(clamped) = self.clamp(radius) else {
            return;
        };
        self.current = clamped;
        if let Some(store) = &self.store {
            store.save_radius(clamped);
        }
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn clamp(&self, radius: f64) -> Option<f64> {
        // max/min rather than clamp: clamp panics on inverted or NaN bounds.
        radius.is_finite().then(|| radius.max(self.min).min(self.max))
    }
}

impl Default for RadiusState {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERRED_RADIUS, PREFERRED_RADIUS_MIN, PREFERRED_RADIUS_MAX)
    }
}
