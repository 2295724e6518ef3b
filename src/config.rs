//! Run-time configuration.

use camino::Utf8PathBuf;

use crate::query::{DEFAULT_APPLICATION, DEFAULT_CATEGORY, FilterState};

pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Settings shared by every front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    /// Catalog JSON document.
    pub data_path: Utf8PathBuf,
    /// Category selected at startup and after reset.
    pub default_category: String,
    /// Application selected at startup and after reset.
    pub default_application: String,
    /// Directory export packages are written to.
    pub export_dir: Utf8PathBuf,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            data_path: Utf8PathBuf::from(DEFAULT_DATA_FILE),
            default_category: DEFAULT_CATEGORY.to_string(),
            default_application: DEFAULT_APPLICATION.to_string(),
            export_dir: Utf8PathBuf::from("."),
        }
    }
}

impl FinderConfig {
    /// The filter state used at startup and restored by reset.
    pub fn default_filters(&self) -> FilterState {
        FilterState::with_defaults(&self.default_category, &self.default_application)
    }
}
