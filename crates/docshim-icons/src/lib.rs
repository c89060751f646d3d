//! Icon name resolution.
//!
//! Authored documents name icons with free-form semantic strings
//! (`icon="Shield"`). This crate maps those names onto assets of the shared
//! icon set used by the target framework. Lookup is case-insensitive and an
//! unknown name simply yields no icon.
//!
//! Some names have no matching asset; those are bound to the nearest visual
//! analog (`windows` renders as `monitor`, `waveform` as `waves`).
//!
//! # Example
//!
//! ```
//! use docshim_icons::{IconHandle, resolve};
//!
//! assert_eq!(resolve(Some("Shield")), Some(IconHandle::new("shield")));
//! assert_eq!(resolve(Some("waveform")), Some(IconHandle::new("waves")));
//! assert_eq!(resolve(Some("not-a-real-icon")), None);
//! assert_eq!(resolve(None), None);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Sizing class applied to every rendered icon.
pub const ICON_CLASS: &str = "w-5 h-5";

/// Semantic name to asset identifier.
const ENTRIES: [(&str, &str); 11] = [
    ("microphone", "mic"),
    ("film", "film"),
    ("code", "code"),
    ("shield", "shield"),
    ("download", "download"),
    ("rocket", "rocket"),
    ("apple", "apple"),
    // No OS-specific glyph in the set.
    ("windows", "monitor"),
    ("server", "server"),
    ("user", "user"),
    // No waveform glyph in the set.
    ("waveform", "waves"),
];

static TABLE: LazyLock<IconTable> = LazyLock::new(IconTable::build);

/// Opaque handle naming an asset in the shared icon set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct IconHandle(&'static str);

impl IconHandle {
    /// Create a handle for the given asset identifier.
    #[must_use]
    pub const fn new(asset: &'static str) -> Self {
        Self(asset)
    }

    /// Asset identifier within the icon set (e.g. `"mic"`).
    #[must_use]
    pub const fn asset(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for IconHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Immutable lookup table from normalized icon name to [`IconHandle`].
#[derive(Debug)]
pub struct IconTable {
    by_name: HashMap<&'static str, IconHandle>,
}

impl IconTable {
    fn build() -> Self {
        let by_name = ENTRIES
            .iter()
            .map(|&(name, asset)| (name, IconHandle(asset)))
            .collect();
        Self { by_name }
    }

    /// The process-wide table.
    #[must_use]
    pub fn global() -> &'static Self {
        &TABLE
    }

    /// Look up an already lower-cased name.
    #[must_use]
    pub fn get(&self, normalized: &str) -> Option<IconHandle> {
        self.by_name.get(normalized).copied()
    }

    /// Iterate `(name, handle)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, IconHandle)> + '_ {
        ENTRIES
            .iter()
            .filter_map(|&(name, _)| self.get(name).map(|handle| (name, handle)))
    }

    /// Number of known names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Resolve an icon name to a handle.
///
/// Returns `None` when `name` is absent or not in the table. Neither case is
/// an error: the caller renders without an icon.
#[must_use]
pub fn resolve(name: Option<&str>) -> Option<IconHandle> {
    let name = name?;
    let handle = TABLE.get(&name.to_lowercase());
    if handle.is_none() {
        tracing::debug!(icon = name, "Unknown icon name, rendering without icon");
    }
    handle
}
