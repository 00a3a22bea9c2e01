use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::WkError,
    persistence,
    sort::{
        ItemOrder,
        SortDirection,
        SortField,
    },
    stats::DistributionOptions,
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub default_sort: SortField,
    /// `None` keeps each field's own default direction.
    pub direction: Option<SortDirection>,
    pub weight_by_percentage: bool,
    pub use_tls: bool,
    pub log_level: String,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            default_sort: SortField::Toxicity,
            direction: None,
            weight_by_percentage: false,
            use_tls: true,
            log_level: "info".to_string(),
        }
    }
}

impl SettingsData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Self {
        persistence::load_json_or_default(SETTINGS_FILE)
    }

    pub fn load_from(dir: &Path) -> Self {
        persistence::load_json_or_default_in(dir, SETTINGS_FILE)
    }

    pub fn save(&self) -> Result<(), WkError> {
        persistence::save_json(self, SETTINGS_FILE)
    }

    pub fn save_to(&self, dir: &Path) -> Result<(), WkError> {
        persistence::save_json_in(dir, self, SETTINGS_FILE)
    }

    pub fn is_saved() -> bool {
        persistence::data_file_exists(SETTINGS_FILE)
    }

    /// Removes the stored file; the next load yields the defaults.
    pub fn reset() -> Result<(), WkError> {
        persistence::delete_data_file(SETTINGS_FILE)
    }

    pub fn reset_in(dir: &Path) -> Result<(), WkError> {
        persistence::delete_data_file_in(dir, SETTINGS_FILE)
    }

    /// Order to use when the caller picks nothing; `field` and `direction`
    /// override the stored preferences when given.
    pub fn order(&self, field: Option<SortField>, direction: Option<SortDirection>) -> ItemOrder {
        let field = field.unwrap_or(self.default_sort);
        match direction.or(self.direction) {
            Some(direction) => ItemOrder::with_direction(field, direction),
            None => ItemOrder::new(field),
        }
    }

    pub fn distribution_options(&self) -> DistributionOptions {
        DistributionOptions { weight_by_percentage: self.weight_by_percentage }
    }
}
