//! Grid Layout Resolver.
//!
//! Maps the persisted grid density and the current viewport to a concrete
//! column count. Narrow viewports downgrade a wide preference for display
//! only; the persisted choice is never rewritten by a resize, so widening
//! the window restores the wide grid on its own.

use shop_model::{GapToken, GridLayout, GridMode, ViewportClass};
use shop_persistence::{LAYOUT_PREFERENCE_KEY, PersistenceError, PreferenceStore};
use tracing::{debug, warn};

// =============================================================================
// PURE RULES
// =============================================================================

/// Classify a viewport width in CSS pixels.
pub fn classify_viewport(width_px: u32) -> ViewportClass {
    ViewportClass::classify(width_px)
}

/// Mode to render for `preference` at `viewport`.
///
/// Only ever downgrades wide to compact; a compact choice is never upgraded.
pub fn recommended_mode(preference: GridMode, viewport: ViewportClass) -> GridMode {
    match preference {
        GridMode::Wide if !is_wide_mode_available(viewport) => GridMode::Compact,
        mode => mode,
    }
}

pub fn is_wide_mode_available(viewport: ViewportClass) -> bool {
    viewport.supports_wide()
}

/// Fixed column table.
pub fn columns_for(mode: GridMode, viewport: ViewportClass) -> u8 {
    match (mode, viewport) {
        (_, ViewportClass::Sm) => 1,
        (_, ViewportClass::Md) => 2,
        (_, ViewportClass::Lg) | (GridMode::Compact, ViewportClass::Xl | ViewportClass::Xxl) => 3,
        (GridMode::Wide, ViewportClass::Xl | ViewportClass::Xxl) => 5,
    }
}

/// Cell spacing for a row of `columns`.
pub fn gap_for(columns: u8) -> GapToken {
    if columns >= 5 {
        GapToken::Snug
    } else {
        GapToken::Relaxed
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Per-view layout state backed by a shared preference store.
#[derive(Debug)]
pub struct LayoutResolver<S> {
    store: S,
    preference: GridMode,
    viewport: ViewportClass,
}

impl<S: PreferenceStore> LayoutResolver<S> {
    /// Read the persisted preference and classify the initial viewport.
    ///
    /// A missing, unreadable or invalid preference means compact.
    pub fn mount(store: S, width_px: u32) -> Self {
        let preference = load_preference(&store);
        let viewport = classify_viewport(width_px);
        debug!(%preference, %viewport, "Mounted grid layout");
        Self {
            store,
            preference,
            viewport,
        }
    }

    /// Re-read the persisted preference, picking up a change made by another
    /// view.
    pub fn reload(&mut self) -> GridLayout {
        self.preference = load_preference(&self.store);
        self.layout()
    }

    /// Reclassify after a viewport resize. Never touches the store.
    pub fn resize(&mut self, width_px: u32) -> GridLayout {
        let viewport = classify_viewport(width_px);
        if viewport != self.viewport {
            debug!(from = %self.viewport, to = %viewport, "Viewport class changed");
            self.viewport = viewport;
        }
        self.layout()
    }

    /// The user's persisted choice.
    pub fn preference(&self) -> GridMode {
        self.preference
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    /// The mode actually rendered at the current viewport.
    pub fn effective_mode(&self) -> GridMode {
        recommended_mode(self.preference, self.viewport)
    }

    pub fn columns(&self) -> u8 {
        columns_for(self.effective_mode(), self.viewport)
    }

    pub fn is_wide_mode_available(&self) -> bool {
        is_wide_mode_available(self.viewport)
    }

    pub fn layout(&self) -> GridLayout {
        let columns = self.columns();
        GridLayout {
            mode: self.effective_mode(),
            preferred: self.preference,
            viewport: self.viewport,
            columns,
            gap: gap_for(columns),
            wide_available: self.is_wide_mode_available(),
        }
    }

    /// Persist a new preference.
    ///
    /// A failed write is logged; the view still switches to `mode`.
    pub fn change_mode(&mut self, mode: GridMode) -> GridLayout {
        if let Err(e) = self.try_change_mode(mode) {
            warn!(error = %e, %mode, "Failed to persist grid layout preference");
        }
        self.layout()
    }

    /// Like [`Self::change_mode`], but hands a failed write back to the
    /// caller. The view switches to `mode` either way.
    pub fn try_change_mode(&mut self, mode: GridMode) -> Result<GridLayout, PersistenceError> {
        let saved = self.store.set(LAYOUT_PREFERENCE_KEY, mode.stored_value());
        self.preference = mode;
        debug!(%mode, "Grid layout preference changed");
        saved.map(|()| self.layout())
    }

    /// Validate untyped input before changing mode.
    ///
    /// Returns `false` and leaves everything unchanged when `raw` is not a
    /// valid mode.
    pub fn change_mode_raw(&mut self, raw: &str) -> bool {
        match raw.parse::<GridMode>() {
            Ok(mode) => {
                self.change_mode(mode);
                true
            }
            Err(e) => {
                warn!(error = %e, "Rejected grid layout change");
                false
            }
        }
    }
}

fn load_preference<S: PreferenceStore>(store: &S) -> GridMode {
    match store.get(LAYOUT_PREFERENCE_KEY) {
        Ok(Some(value)) => GridMode::from_stored(&value).unwrap_or_else(|| {
            warn!(%value, "Ignoring invalid grid layout preference");
            GridMode::default()
        }),
        Ok(None) => GridMode::default(),
        Err(e) => {
            warn!(error = %e, "Failed to read grid layout preference");
            GridMode::default()
        }
    }
}
