use serde_json::Value;
use tracing::{
    debug,
    warn,
};

use super::{
    Item,
    ItemKind,
    Stats,
};
use crate::core::{
    utils::{
        json_type,
        Record,
    },
    WkError,
};

const RECORD: &str = "record";

/// Parses one record, dispatching on its `type` field.
pub fn parse_item(value: &Value) -> Result<Item, WkError> {
    let record = Record::new(RECORD, value)?;
    let kind = record.required_str("type")?.parse::<ItemKind>()?;
    parse_record(kind, &record)
}

/// Parses one record whose kind is already known, e.g. from the list it came in.
pub fn parse_item_as(kind: ItemKind, value: &Value) -> Result<Item, WkError> {
    let record = Record::new(RECORD, value)?;
    parse_record(kind, &record)
}

fn parse_record(kind: ItemKind, record: &Record<'_>) -> Result<Item, WkError> {
    let caps = kind.capabilities();

    let character = record.required_str("character")?;
    let meaning = record.required_str("meaning")?;
    let level = record.required_u32("level")?;

    let mut item = Item::new(kind, &character, &meaning, level);

    for field in caps.reading_fields {
        item.readings.extend(record.reading_list(field)?);
    }

    // Only sent for recent unlocks, independent of user_specific
    item.set_unlocked_date(record.date("unlocked_date")?);

    if let Some(user_specific) = record.nested("user_specific")? {
        item.set_stats(Stats::from_record(&user_specific, caps.has_reading)?);
    }

    // Only sent for critical items, wins over the derived value. Negative
    // values mean unknown.
    if let Some(percentage) = record.optional_i64("percentage")? {
        if percentage > 100 {
            return Err(WkError::MalformedRecord(format!(
                "{}.percentage: {} out of range",
                RECORD, percentage
            )));
        }
        let percentage = i32::try_from(percentage).map_err(|_| {
            WkError::MalformedRecord(format!("{}.percentage: {} out of range", RECORD, percentage))
        })?;
        item.set_percentage(Some(percentage));
    }

    Ok(item)
}

/// All or nothing: the first bad record fails the batch.
pub fn parse_items(values: &[Value]) -> Result<Vec<Item>, WkError> {
    let items = values.iter().map(parse_item).collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} items", items.len());
    Ok(items)
}

/// Skips records that fail to parse, logging each one.
pub fn parse_items_lenient(values: &[Value]) -> Vec<Item> {
    let mut skipped = 0;
    let items: Vec<Item> = values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match parse_item(value) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Skipping record {}: {}", index, err);
                skipped += 1;
                None
            }
        })
        .collect();

    debug!("Parsed {} items, skipped {}", items.len(), skipped);
    items
}

/// Accepts a bare array of records or the service envelope that wraps them
/// under `requested_information` (optionally split into a `general` list).
pub fn parse_response(json: &str) -> Result<Vec<Item>, WkError> {
    let value: Value = serde_json::from_str(json)?;
    parse_items(records_of(&value)?)
}

fn records_of(value: &Value) -> Result<&[Value], WkError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(fields) => match fields.get("requested_information") {
            Some(Value::Array(records)) => Ok(records),
            Some(inner @ Value::Object(_)) => match inner.get("general") {
                Some(Value::Array(records)) => Ok(records),
                _ => Err(WkError::MalformedRecord(
                    "requested_information has no general list".to_string(),
                )),
            },
            Some(other) => Err(WkError::MalformedRecord(format!(
                "requested_information must be an array, got {}",
                json_type(other)
            ))),
            None => Err(WkError::MissingField("requested_information".to_string())),
        },
        other => Err(WkError::MalformedRecord(format!(
            "expected an array of records, got {}",
            json_type(other)
        ))),
    }
}
