//! Tokens rendered by pagination controls.

use std::fmt;

use serde::Serialize;

/// One slot in a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageToken {
    /// A clickable page number (1-based).
    Page(u32),
    /// A gap between non-adjacent page numbers.
    Ellipsis,
}

impl PageToken {
    /// The page number, if this token is one.
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(*page),
            Self::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}
