//! Grid density preference and viewport classes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ModelError, Result};

// =============================================================================
// GRID MODE
// =============================================================================

/// User's chosen column density for a product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Up to three columns.
    #[default]
    Compact,
    /// Up to five columns on large screens.
    Wide,
}

impl GridMode {
    /// Both modes, densest last.
    pub const ALL: [GridMode; 2] = [Self::Compact, Self::Wide];

    /// Value written to the preference store.
    pub fn stored_value(&self) -> &'static str {
        match self {
            Self::Compact => "3",
            Self::Wide => "5",
        }
    }

    /// Read a stored preference. Anything other than `"3"` or `"5"` is
    /// treated as absent.
    pub fn from_stored(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.stored_value() == value)
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Wide => "Wide",
        }
    }
}

impl FromStr for GridMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "3" => Ok(Self::Compact),
            "wide" | "5" => Ok(Self::Wide),
            _ => Err(ModelError::InvalidGridMode(s.to_string())),
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// VIEWPORT CLASS
// =============================================================================

/// Discrete bucket of the current viewport width.
///
/// Each class starts at its min-width breakpoint (640, 768, 1024, 1280,
/// 1536). Widths below the first breakpoint are still `Sm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Below 768px.
    Sm,
    /// 768px to 1023px.
    Md,
    /// 1024px to 1279px.
    Lg,
    /// 1280px to 1535px.
    Xl,
    /// 1536px and up.
    Xxl,
}

impl ViewportClass {
    /// Minimum width (inclusive) of each class.
    pub const BREAKPOINTS: [(u32, ViewportClass); 5] = [
        (640, Self::Sm),
        (768, Self::Md),
        (1024, Self::Lg),
        (1280, Self::Xl),
        (1536, Self::Xxl),
    ];

    /// Classify a viewport width in CSS pixels.
    pub fn classify(width_px: u32) -> Self {
        Self::BREAKPOINTS
            .into_iter()
            .rev()
            .find(|(min_width, _)| width_px >= *min_width)
            .map_or(Self::Sm, |(_, class)| class)
    }

    /// Whether the wide grid can be shown at this size (1024px and up).
    pub fn supports_wide(&self) -> bool {
        matches!(self, Self::Lg | Self::Xl | Self::Xxl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DERIVED LAYOUT
// =============================================================================

/// Spacing between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapToken {
    Relaxed,
    /// Used when five columns share the row.
    Snug,
}

impl GapToken {
    /// Utility class a web front end would apply.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Relaxed => "gap-6",
            Self::Snug => "gap-4",
        }
    }
}

/// Concrete layout of a product grid for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    /// Mode actually rendered (may be downgraded from the preference).
    pub mode: GridMode,
    /// Mode the user chose and persisted.
    pub preferred: GridMode,
    pub viewport: ViewportClass,
    pub columns: u8,
    pub gap: GapToken,
    /// Whether the wide option should be offered at this size.
    pub wide_available: bool,
}
