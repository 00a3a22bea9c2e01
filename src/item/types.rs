use core::fmt;
use std::str::FromStr;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    utils::Record,
    WkError,
};

/// Spaced repetition stages, in the order an item moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SrsLevel {
    Unseen,
    Apprentice,
    Guru,
    Master,
    Enlightened,
    Burned,
}

impl SrsLevel {
    pub const ALL: [SrsLevel; 6] = [
        SrsLevel::Unseen,
        SrsLevel::Apprentice,
        SrsLevel::Guru,
        SrsLevel::Master,
        SrsLevel::Enlightened,
        SrsLevel::Burned,
    ];

    /// Stages shown in the summary distribution.
    pub const SUMMARY: [SrsLevel; 4] =
        [SrsLevel::Apprentice, SrsLevel::Guru, SrsLevel::Master, SrsLevel::Enlightened];

    pub fn as_str(&self) -> &'static str {
        match self {
            SrsLevel::Unseen => "unseen",
            SrsLevel::Apprentice => "apprentice",
            SrsLevel::Guru => "guru",
            SrsLevel::Master => "master",
            SrsLevel::Enlightened => "enlightened",
            SrsLevel::Burned => "burned",
        }
    }

    pub fn is_active(&self) -> bool {
        SrsLevel::SUMMARY.contains(self)
    }
}

impl FromStr for SrsLevel {
    type Err = WkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unseen" => Ok(SrsLevel::Unseen),
            "apprentice" => Ok(SrsLevel::Apprentice),
            "guru" => Ok(SrsLevel::Guru),
            "master" => Ok(SrsLevel::Master),
            // the service spells it "enlighten"
            "enlighten" | "enlightened" => Ok(SrsLevel::Enlightened),
            "burned" => Ok(SrsLevel::Burned),
            _ => Err(WkError::InvalidStage(s.to_string())),
        }
    }
}

impl fmt::Display for SrsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let readable = match self {
            SrsLevel::Unseen => "Unseen",
            SrsLevel::Apprentice => "Apprentice",
            SrsLevel::Guru => "Guru",
            SrsLevel::Master => "Master",
            SrsLevel::Enlightened => "Enlightened",
            SrsLevel::Burned => "Burned",
        };
        f.pad(readable)
    }
}

/// Answer counters for one axis (meaning or reading) of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub correct: u32,
    pub incorrect: u32,
    pub max_streak: u32,
    pub current_streak: u32,
}

impl Performance {
    pub fn new(correct: u32, incorrect: u32, max_streak: u32, current_streak: u32) -> Self {
        Self { correct, incorrect, max_streak, current_streak }
    }

    /// Reads the `<prefix>_correct`, `<prefix>_incorrect`, `<prefix>_max_streak`
    /// and `<prefix>_current_streak` counters.
    pub(crate) fn from_record(record: &Record<'_>, prefix: &str) -> Result<Self, WkError> {
        Ok(Self {
            correct: record.count(&format!("{}_correct", prefix))?,
            incorrect: record.count(&format!("{}_incorrect", prefix))?,
            max_streak: record.count(&format!("{}_max_streak", prefix))?,
            current_streak: record.count(&format!("{}_current_streak", prefix))?,
        })
    }

    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }
}

/// Snapshot of the server side learning state of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub srs: SrsLevel,
    pub unlocked_date: Option<DateTime<Utc>>,
    pub available_date: Option<DateTime<Utc>>,
    pub burned_date: Option<DateTime<Utc>>,
    pub burned: bool,
    pub reading: Option<Performance>,
    pub meaning: Option<Performance>,
    pub reading_note: Option<String>,
    pub meaning_note: Option<String>,
    #[serde(default)]
    pub user_synonyms: Vec<String>,
}

impl Stats {
    pub fn new(srs: SrsLevel) -> Self {
        Self {
            srs,
            unlocked_date: None,
            available_date: None,
            burned_date: None,
            burned: srs == SrsLevel::Burned,
            reading: None,
            meaning: Some(Performance::default()),
            reading_note: None,
            meaning_note: None,
            user_synonyms: Vec::new(),
        }
    }

    pub(crate) fn from_record(record: &Record<'_>, has_reading: bool) -> Result<Self, WkError> {
        let srs = match record.optional_str("srs")? {
            Some(s) => s.parse::<SrsLevel>()?,
            None => return Err(WkError::MissingField("user_specific.srs".to_string())),
        };

        let reading =
            if has_reading { Some(Performance::from_record(record, "reading")?) } else { None };

        Ok(Self {
            srs,
            unlocked_date: record.date("unlocked_date")?,
            available_date: record.date("available_date")?,
            burned_date: record.date("burned_date")?,
            burned: record.flag("burned")?,
            reading,
            meaning: Some(Performance::from_record(record, "meaning")?),
            reading_note: record.optional_str("reading_note")?,
            meaning_note: record.optional_str("meaning_note")?,
            user_synonyms: record.string_list("user_synonyms")?,
        })
    }

    pub fn is_burned(&self) -> bool {
        self.burned
    }

    /// Incorrect answers summed over both axes.
    pub fn toxicity(&self) -> u64 {
        self.axes().map(|p| p.incorrect as u64).sum()
    }

    pub fn max_streaks(&self) -> u64 {
        self.axes().map(|p| p.max_streak as u64).sum()
    }

    pub fn axes(&self) -> impl Iterator<Item = &Performance> {
        self.meaning.iter().chain(self.reading.iter())
    }

    /// Mastery in percent, or 100 when nothing has been answered yet.
    pub fn derived_percentage(&self) -> i32 {
        let (num, den) = self.axes().fold((0u64, 0u64), |(num, den), p| {
            (num + p.correct as u64, den + p.correct as u64 + p.incorrect as u64)
        });

        if den == 0 {
            100
        } else {
            (num * 100 / den) as i32
        }
    }
}
