use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// The only accepted date and time layout, `MM/dd/yyyy HH:mm`
pub const DATE_AND_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";

lazy_static! {
    // chrono accepts unpadded numbers, so the exact shape is checked first
    static ref DATE_AND_TIME_SHAPE: Regex =
        Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4} [0-9]{2}:[0-9]{2}$").unwrap();
}

/// Inclusive character-count bounds for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Inclusive bounds for a seminar's duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: i32,
    pub max: i32,
}

/// Every bound the validators enforce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub category_name: LengthRange,
    pub topic: LengthRange,
    pub lecturer: LengthRange,
    pub details: LengthRange,
    pub duration: DurationRange,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            category_name: LengthRange::new(3, 50),
            topic: LengthRange::new(3, 100),
            lecturer: LengthRange::new(3, 60),
            details: LengthRange::new(10, 500),
            duration: DurationRange { min: 30, max: 180 },
        }
    }
}

/// A form field that can carry validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Topic,
    Lecturer,
    Details,
    DateAndTime,
    Duration,
    CategoryId,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Name => "Name",
            Self::Topic => "Topic",
            Self::Lecturer => "Lecturer",
            Self::Details => "Details",
            Self::DateAndTime => "DateAndTime",
            Self::Duration => "Duration",
            Self::CategoryId => "CategoryId",
        };
        write!(f, "{name}")
    }
}

/// Field-level validation messages, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Checks that a required text value is present and within `range` characters
pub fn validate_length(field: Field, value: &str, range: LengthRange) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("The {field} field is required."));
    }

    let length = value.chars().count();
    if length < range.min || length > range.max {
        return Err(format!(
            "The field {field} must be a string with a minimum length of {} and a maximum length of {}.",
            range.min, range.max
        ));
    }

    Ok(())
}

/// Checks that a duration was supplied and lies within the configured bounds
pub fn validate_duration(value: Option<i32>, rules: &ValidationRules) -> Result<i32, String> {
    let Some(duration) = value else {
        return Err(format!("The {} field is required.", Field::Duration));
    };

    let DurationRange { min, max } = rules.duration;
    if !(min..=max).contains(&duration) {
        return Err(format!(
            "The field {} must be between {min} and {max}.",
            Field::Duration
        ));
    }

    Ok(duration)
}

/// Parses a date and time written exactly as `MM/dd/yyyy HH:mm`
pub fn parse_date_and_time(value: &str) -> Result<NaiveDateTime, String> {
    if !DATE_AND_TIME_SHAPE.is_match(value) {
        return Err("Invalid date or time format".to_string());
    }

    NaiveDateTime::parse_from_str(value, DATE_AND_TIME_FORMAT)
        .map_err(|_| "Invalid date or time format".to_string())
}

/// Renders a timestamp in the same layout `parse_date_and_time` accepts
pub fn format_date_and_time(value: &NaiveDateTime) -> String {
    value.format(DATE_AND_TIME_FORMAT).to_string()
}

/// Checks a category name against the configured length bounds
pub fn validate_category_name(name: &str, rules: &ValidationRules) -> Result<(), ValidationErrors> {
    validate_length(Field::Name, name, rules.category_name)
        .map_err(|message| ValidationErrors::single(Field::Name, message))
}
