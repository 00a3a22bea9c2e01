use core::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    utils::slugify,
    WkError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Radical,
    Kanji,
    Vocabulary,
}

/// How an item identity is turned into the last URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlComponent {
    Character,
    MeaningSlug,
}

#[derive(Debug, PartialEq, Eq)]
pub struct KindCapabilities {
    pub kind: ItemKind,
    pub name: &'static str,
    pub has_reading: bool,
    pub url_segment: &'static str,
    pub url_component: UrlComponent,
    /// Record fields holding kana readings for search.
    pub reading_fields: &'static [&'static str],
}

static CAPABILITIES: [KindCapabilities; 3] = [
    KindCapabilities {
        kind: ItemKind::Radical,
        name: "radical",
        has_reading: false,
        url_segment: "radicals",
        url_component: UrlComponent::MeaningSlug,
        reading_fields: &[],
    },
    KindCapabilities {
        kind: ItemKind::Kanji,
        name: "kanji",
        has_reading: true,
        url_segment: "kanji",
        url_component: UrlComponent::Character,
        reading_fields: &["onyomi", "kunyomi", "nanori"],
    },
    KindCapabilities {
        kind: ItemKind::Vocabulary,
        name: "vocabulary",
        has_reading: true,
        url_segment: "vocabulary",
        url_component: UrlComponent::Character,
        reading_fields: &["kana"],
    },
];

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Radical, ItemKind::Kanji, ItemKind::Vocabulary];

    pub fn capabilities(&self) -> &'static KindCapabilities {
        match self {
            ItemKind::Radical => &CAPABILITIES[0],
            ItemKind::Kanji => &CAPABILITIES[1],
            ItemKind::Vocabulary => &CAPABILITIES[2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.capabilities().name
    }

    pub fn has_reading(&self) -> bool {
        self.capabilities().has_reading
    }

    pub fn url_segment(&self) -> &'static str {
        self.capabilities().url_segment
    }

    pub fn url_component(&self, character: &str, meaning: &str) -> String {
        match self.capabilities().url_component {
            UrlComponent::Character => character.to_string(),
            UrlComponent::MeaningSlug => slugify(meaning),
        }
    }
}

impl FromStr for ItemKind {
    type Err = WkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| WkError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let readable = match self {
            ItemKind::Radical => "Radical",
            ItemKind::Kanji => "Kanji",
            ItemKind::Vocabulary => "Vocabulary",
        };
        f.pad(readable)
    }
}
