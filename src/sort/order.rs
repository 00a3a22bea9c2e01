use core::fmt;
use std::{
    borrow::Borrow,
    cmp::Ordering,
    iter,
};

use rayon::slice::ParallelSliceMut;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    SortDirection,
    SortField,
};
use crate::item::Item;

/// A primary sort criterion plus the chain of tie breakers behind it.
///
/// The chain is a plain owned value, built once and then only read, so one
/// order can rank any number of collections from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOrder {
    pub field: SortField,
    pub direction: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    then: Option<Box<ItemOrder>>,
}

impl ItemOrder {
    /// Default chain for `field`, each link in its own default direction.
    pub fn new(field: SortField) -> Self {
        Self::build(field, SortField::default_direction)
    }

    /// Default chain for `field`, every link in `direction`.
    pub fn with_direction(field: SortField, direction: SortDirection) -> Self {
        Self::build(field, |_| direction)
    }

    pub fn ascending(field: SortField) -> Self {
        Self::with_direction(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::with_direction(field, SortDirection::Descending)
    }

    fn build<F>(field: SortField, direction_of: F) -> Self
    where
        F: Fn(SortField) -> SortDirection + Copy,
    {
        Self {
            field,
            direction: direction_of(field),
            then: field.default_secondary().map(|next| Box::new(Self::build(next, direction_of))),
        }
    }

    /// Replaces the tie breaker.
    pub fn then(mut self, secondary: ItemOrder) -> Self {
        self.then = Some(Box::new(secondary));
        self
    }

    /// Drops the tie breaker; ties compare equal.
    pub fn terminal(mut self) -> Self {
        self.then = None;
        self
    }

    pub fn secondary(&self) -> Option<&ItemOrder> {
        self.then.as_deref()
    }

    pub fn links(&self) -> impl Iterator<Item = &ItemOrder> {
        iter::successors(Some(self), |order| order.secondary())
    }

    /// The tie-break path, primary first.
    pub fn chain(&self) -> Vec<(SortField, SortDirection)> {
        self.links().map(|order| (order.field, order.direction)).collect()
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        self.links()
            .map(|order| compare_by(order.field, order.direction, a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable sort: items equal under the whole chain keep their input order.
    pub fn sort<T>(&self, items: &mut [T])
    where
        T: Borrow<Item> + Send,
    {
        items.par_sort_by(|a, b| self.compare(a.borrow(), b.borrow()));
    }

    pub fn sorted<'a, I>(&self, items: I) -> Vec<&'a Item>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut ranked: Vec<&'a Item> = items.into_iter().collect();
        self.sort(&mut ranked);
        ranked
    }
}

impl fmt::Display for ItemOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, order) in self.links().enumerate() {
            if index > 0 {
                write!(f, " > ")?;
            }
            let arrow = if order.direction.is_ascending() { "↑" } else { "↓" };
            write!(f, "{} {}", order.field, arrow)?;
        }
        Ok(())
    }
}

fn compare_by(field: SortField, direction: SortDirection, a: &Item, b: &Item) -> Ordering {
    match field {
        SortField::Toxicity => direction.apply(toxicity_key(a).cmp(&toxicity_key(b))),
        SortField::MaxStreak => {
            direction.apply(max_streak_key(a, direction).cmp(&max_streak_key(b, direction)))
        }
        SortField::ErrorRate => unknown_last(error_rate(a), error_rate(b), direction),
        SortField::Recency => unknown_last(a.unlocked_date(), b.unlocked_date(), direction),
        SortField::Availability => match (a.is_burned(), b.is_burned()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            // Descending puts the earliest (most overdue) review first
            _ => unknown_last(a.available_date(), b.available_date(), direction.reversed()),
        },
        SortField::Level => direction.apply(a.level.cmp(&b.level)),
        SortField::Stage => unknown_last(a.srs(), b.srs(), direction),
        SortField::Kind => direction.apply(a.kind.cmp(&b.kind)),
    }
}

/// Missing keys sort after present ones whatever the direction.
fn unknown_last<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// -1 for items without a live error signal (never studied or burned).
fn toxicity_key(item: &Item) -> i64 {
    match &item.stats {
        Some(stats) if !stats.is_burned() => stats.toxicity() as i64,
        _ => -1,
    }
}

fn max_streak_key(item: &Item, direction: SortDirection) -> i64 {
    match &item.stats {
        Some(stats) => stats.max_streaks() as i64,
        None if direction.is_ascending() => -1,
        None => 0,
    }
}

fn error_rate(item: &Item) -> Option<i32> {
    match &item.stats {
        Some(stats) if !stats.is_burned() => item.known_percentage().map(|p| 100 - p),
        _ => None,
    }
}
