pub mod factory;
pub mod kind;
pub mod types;

use chrono::{
    DateTime,
    Local,
    Utc,
};
use serde::Serialize;
use wana_kana::ConvertJapanese;

pub use kind::ItemKind;
pub use types::{
    Performance,
    SrsLevel,
    Stats,
};

use crate::core::utils::serialize_percentage;

/// Reported for items that have never been studied.
///
/// Only [`Item::percentage`] and serialized output use it; the item itself
/// keeps an `Option`.
pub const UNKNOWN_PERCENTAGE: i32 = -1;

const SITE_HOST: &str = "www.wanikani.com";

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub kind: ItemKind,
    pub character: String,
    pub meaning: String,
    pub level: u32,
    /// Kana readings, used only for search.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub readings: Vec<String>,
    pub stats: Option<Stats>,
    #[serde(serialize_with = "serialize_percentage")]
    percentage: Option<i32>,
    unlocked_date: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub instance_creation_date: DateTime<Local>,
}

impl Item {
    pub fn new(kind: ItemKind, character: &str, meaning: &str, level: u32) -> Self {
        Self {
            kind,
            character: character.to_string(),
            meaning: meaning.to_string(),
            level,
            readings: Vec::new(),
            stats: None,
            percentage: None,
            unlocked_date: None,
            instance_creation_date: Local::now(),
        }
    }

    /// Attaches a new snapshot and re-derives the percentage from it.
    pub fn set_stats(&mut self, mut stats: Stats) {
        if !self.kind.has_reading() {
            stats.reading = None;
        }
        if let Some(date) = self.unlocked_date {
            stats.unlocked_date = Some(date);
        }

        self.percentage = Some(stats.derived_percentage());
        self.stats = Some(stats);
    }

    /// Overrides the derived value, as sent for "critical" item lists.
    pub fn set_percentage(&mut self, percentage: Option<i32>) {
        self.percentage = percentage.filter(|p| *p >= 0);
    }

    /// Mastery in `[0, 100]`, or [`UNKNOWN_PERCENTAGE`].
    pub fn percentage(&self) -> i32 {
        self.percentage.unwrap_or(UNKNOWN_PERCENTAGE)
    }

    pub fn known_percentage(&self) -> Option<i32> {
        self.percentage
    }

    /// The early unlock date if one was sent, else the one in the stats.
    pub fn unlocked_date(&self) -> Option<DateTime<Utc>> {
        self.unlocked_date.or_else(|| self.stats.as_ref().and_then(|s| s.unlocked_date))
    }

    pub fn set_unlocked_date(&mut self, date: Option<DateTime<Utc>>) {
        self.unlocked_date = date;
        if let Some(stats) = self.stats.as_mut() {
            stats.unlocked_date = date;
        }
    }

    pub fn available_date(&self) -> Option<DateTime<Utc>> {
        self.stats.as_ref().and_then(|s| s.available_date)
    }

    pub fn srs(&self) -> Option<SrsLevel> {
        self.stats.as_ref().map(|s| s.srs)
    }

    pub fn is_burned(&self) -> bool {
        self.stats.as_ref().map_or(false, Stats::is_burned)
    }

    pub fn has_reading(&self) -> bool {
        self.kind.has_reading()
    }

    pub fn url_path(&self) -> String {
        format!(
            "/{}/{}",
            self.kind.url_segment(),
            self.kind.url_component(&self.character, &self.meaning)
        )
    }

    pub fn url(&self, tls: bool) -> String {
        let scheme = if tls { "https" } else { "http" };
        format!("{}://{}{}", scheme, SITE_HOST, self.url_path())
    }

    /// Substring search over the gloss, the character and the readings.
    /// Romaji queries are converted to hiragana before matching readings.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }

        if self.meaning.to_lowercase().contains(&query.to_lowercase())
            || self.character.contains(query)
        {
            return true;
        }

        let kana = query.to_hiragana();
        self.readings.iter().any(|reading| reading.to_hiragana().contains(&kana))
    }
}
