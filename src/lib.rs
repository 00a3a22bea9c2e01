pub mod core;
pub mod item;
pub mod logging;
pub mod persistence;
pub mod settings;
pub mod sort;
pub mod stats;

pub use crate::core::WkError;
pub use item::{
    factory::{
        parse_item,
        parse_item_as,
        parse_items,
        parse_items_lenient,
        parse_response,
    },
    Item,
    ItemKind,
    Performance,
    SrsLevel,
    Stats,
};
pub use settings::SettingsData;
pub use sort::{
    ItemOrder,
    SortDirection,
    SortField,
};
pub use stats::{
    DistributionOptions,
    SrsDistribution,
    StageTotals,
};
