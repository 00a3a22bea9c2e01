use chrono::{
    DateTime,
    TimeZone,
    Utc,
};
use serde::Serializer;
use serde_json::{
    Map,
    Value,
};

use super::WkError;

/// Read-only view over one JSON object of an inbound record.
///
/// `null` and an absent key are treated the same way everywhere: the service
/// sends `null` for anything the learner has not reached yet.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    context: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    pub fn new(context: &'a str, value: &'a Value) -> Result<Self, WkError> {
        match value.as_object() {
            Some(fields) => Ok(Self { context, fields }),
            None => Err(WkError::MalformedRecord(format!(
                "{} must be an object, got {}",
                context,
                json_type(value)
            ))),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    fn malformed(&self, field: &str, expected: &str, found: &Value) -> WkError {
        WkError::MalformedRecord(format!(
            "{}.{}: expected {}, got {}",
            self.context,
            field,
            expected,
            json_type(found)
        ))
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn nested(&self, field: &'a str) -> Result<Option<Record<'a>>, WkError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) if value.is_object() => Record::new(field, value).map(Some),
            Some(value) => Err(self.malformed(field, "an object", value)),
        }
    }

    pub fn required_str(&self, field: &str) -> Result<String, WkError> {
        self.optional_str(field)?.ok_or_else(|| WkError::MissingField(field.to_string()))
    }

    pub fn optional_str(&self, field: &str) -> Result<Option<String>, WkError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(value) => Err(self.malformed(field, "a string", value)),
        }
    }

    pub fn required_u32(&self, field: &str) -> Result<u32, WkError> {
        match self.get(field) {
            None => Err(WkError::MissingField(field.to_string())),
            Some(value) => self.to_u32(field, value),
        }
    }

    /// Attempt counters: absent means the axis was never answered.
    pub fn count(&self, field: &str) -> Result<u32, WkError> {
        match self.get(field) {
            None => Ok(0),
            Some(value) => self.to_u32(field, value),
        }
    }

    pub fn optional_i64(&self, field: &str) -> Result<Option<i64>, WkError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => number_or_numeric_string(value)
                .map(Some)
                .ok_or_else(|| self.malformed(field, "an integer", value)),
        }
    }

    pub fn flag(&self, field: &str) -> Result<bool, WkError> {
        match self.get(field) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(value) => Err(self.malformed(field, "a boolean", value)),
        }
    }

    /// Epoch seconds, as a number or a numeric string.
    pub fn date(&self, field: &str) -> Result<Option<DateTime<Utc>>, WkError> {
        let Some(seconds) = self.optional_i64(field)? else {
            return Ok(None);
        };

        match Utc.timestamp_opt(seconds, 0).single() {
            Some(date) => Ok(Some(date)),
            None => Err(WkError::MalformedRecord(format!(
                "{}.{}: timestamp {} out of range",
                self.context, field, seconds
            ))),
        }
    }

    pub fn string_list(&self, field: &str) -> Result<Vec<String>, WkError> {
        let Some(value) = self.get(field) else {
            return Ok(Vec::new());
        };
        let Value::Array(entries) = value else {
            return Err(self.malformed(field, "an array of strings", value));
        };

        entries
            .iter()
            .map(|entry| match entry {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.malformed(field, "an array of strings", other)),
            })
            .collect()
    }

    /// Readings come either as one comma separated string or as an array.
    pub fn reading_list(&self, field: &str) -> Result<Vec<String>, WkError> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s
                .split(|c: char| c == ',' || c == '、')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()),
            _ => self.string_list(field),
        }
    }

    fn to_u32(&self, field: &str, value: &Value) -> Result<u32, WkError> {
        number_or_numeric_string(value)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.malformed(field, "a non-negative integer", value))
    }
}

pub fn number_or_numeric_string(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Lowercase, hyphen separated form of a gloss, used for radical URLs.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn serialize_percentage<S>(percentage: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i32(percentage.unwrap_or(crate::item::UNKNOWN_PERCENTAGE))
}
