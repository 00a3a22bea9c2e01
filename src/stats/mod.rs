use rayon::iter::{
    IntoParallelIterator,
    ParallelIterator,
};
use serde::Serialize;
use tracing::debug;

use crate::item::{
    Item,
    ItemKind,
    SrsLevel,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributionOptions {
    /// Also sum the mastery percentage of the items in each stage.
    pub weight_by_percentage: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTotals {
    pub stage: SrsLevel,
    pub total: usize,
    pub radicals: usize,
    pub kanji: usize,
    pub vocabulary: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_sum: Option<u64>,
    #[serde(skip)]
    weighted_items: usize,
}

impl StageTotals {
    fn empty(stage: SrsLevel, options: DistributionOptions) -> Self {
        Self {
            stage,
            total: 0,
            radicals: 0,
            kanji: 0,
            vocabulary: 0,
            percentage_sum: options.weight_by_percentage.then_some(0),
            weighted_items: 0,
        }
    }

    fn add(&mut self, item: &Item) {
        self.total += 1;
        match item.kind {
            ItemKind::Radical => self.radicals += 1,
            ItemKind::Kanji => self.kanji += 1,
            ItemKind::Vocabulary => self.vocabulary += 1,
        }

        if let (Some(sum), Some(percentage)) = (self.percentage_sum.as_mut(), item.known_percentage())
        {
            *sum += percentage as u64;
            self.weighted_items += 1;
        }
    }

    fn merge(&mut self, other: &StageTotals) {
        self.total += other.total;
        self.radicals += other.radicals;
        self.kanji += other.kanji;
        self.vocabulary += other.vocabulary;
        self.weighted_items += other.weighted_items;
        if let (Some(sum), Some(other_sum)) = (self.percentage_sum.as_mut(), other.percentage_sum) {
            *sum += other_sum;
        }
    }

    pub fn count_of(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Radical => self.radicals,
            ItemKind::Kanji => self.kanji,
            ItemKind::Vocabulary => self.vocabulary,
        }
    }

    /// Mean mastery of the stage, when percentages were requested and known.
    pub fn average_percentage(&self) -> Option<f32> {
        match self.percentage_sum {
            Some(sum) if self.weighted_items > 0 => Some(sum as f32 / self.weighted_items as f32),
            _ => None,
        }
    }
}

/// Item counts per active SRS stage, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrsDistribution {
    stages: Vec<StageTotals>,
}

impl SrsDistribution {
    pub fn from_items(items: &[Item], options: DistributionOptions) -> Self {
        let empty = || Self::empty(options);

        let distribution = items
            .into_par_iter()
            .fold(empty, |mut acc, item| {
                if let Some(totals) = summary_stage(item).and_then(|stage| acc.slot_mut(stage)) {
                    totals.add(item);
                }
                acc
            })
            .reduce(empty, |mut left, right| {
                for (mine, theirs) in left.stages.iter_mut().zip(right.stages.iter()) {
                    mine.merge(theirs);
                }
                left
            });

        debug!(
            "SRS distribution over {} items: {:?}",
            items.len(),
            distribution.counts()
        );
        distribution
    }

    fn empty(options: DistributionOptions) -> Self {
        Self {
            stages: SrsLevel::SUMMARY
                .iter()
                .map(|stage| StageTotals::empty(*stage, options))
                .collect(),
        }
    }

    fn slot_mut(&mut self, stage: SrsLevel) -> Option<&mut StageTotals> {
        self.stages.iter_mut().find(|totals| totals.stage == stage)
    }

    pub fn get(&self, stage: SrsLevel) -> Option<&StageTotals> {
        self.stages.iter().find(|totals| totals.stage == stage)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageTotals> {
        self.stages.iter()
    }

    pub fn counts(&self) -> Vec<(SrsLevel, usize)> {
        self.stages.iter().map(|totals| (totals.stage, totals.total)).collect()
    }

    pub fn total(&self) -> usize {
        self.stages.iter().map(|totals| totals.total).sum()
    }
}

/// Burned and never studied items are left out of the summary.
fn summary_stage(item: &Item) -> Option<SrsLevel> {
    item.stats
        .as_ref()
        .filter(|stats| !stats.is_burned())
        .map(|stats| stats.srs)
        .filter(SrsLevel::is_active)
}
