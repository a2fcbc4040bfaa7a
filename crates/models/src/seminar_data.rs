use crate::validation::{
    Field, ValidationErrors, ValidationRules, parse_date_and_time, validate_duration,
    validate_length,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Raw seminar input as submitted from a create or edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(default)]
pub struct SeminarForm {
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    /// Formatted as `MM/dd/yyyy HH:mm`
    #[cfg_attr(feature = "openapi", schema(example = "03/15/2025 14:00"))]
    pub date_and_time: String,
    /// Length in minutes
    pub duration: Option<i32>,
    pub category_id: i32,
}

/// A seminar form that passed every field rule
#[derive(Debug, Clone, PartialEq)]
pub struct SeminarInput {
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    pub date_and_time: NaiveDateTime,
    pub duration: i32,
    pub category_id: i32,
}

impl SeminarForm {
    /// Validates every field and collects all failures rather than stopping at the first.
    ///
    /// Category existence needs the store and is checked by the caller.
    pub fn validate(&self, rules: &ValidationRules) -> Result<SeminarInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let text_fields = [
            (Field::Topic, &self.topic, rules.topic),
            (Field::Lecturer, &self.lecturer, rules.lecturer),
            (Field::Details, &self.details, rules.details),
        ];
        for (field, value, range) in text_fields {
            if let Err(message) = validate_length(field, value, range) {
                errors.add(field, message);
            }
        }

        let date_and_time = parse_date_and_time(&self.date_and_time)
            .map_err(|message| errors.add(Field::DateAndTime, message))
            .ok();

        let duration = validate_duration(self.duration, rules)
            .map_err(|message| errors.add(Field::Duration, message))
            .ok();

        match (date_and_time, duration) {
            (Some(date_and_time), Some(duration)) if errors.is_empty() => Ok(SeminarInput {
                topic: self.topic.clone(),
                lecturer: self.lecturer.clone(),
                details: self.details.clone(),
                date_and_time,
                duration,
                category_id: self.category_id,
            }),
            _ => Err(errors),
        }
    }
}

/// A seminar row as shown in the "all" and "joined" lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SeminarInfo {
    pub id: i32,
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    pub date_and_time: String,
    /// Category name
    pub category: String,
    /// Organizer display name, empty when the user record is unknown
    pub organizer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SeminarDetails {
    pub id: i32,
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    pub date_and_time: String,
    pub duration: i32,
    pub category: String,
    pub organizer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
}

/// The edit form prefilled from a stored seminar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SeminarEditForm {
    pub id: i32,
    pub form: SeminarForm,
    pub categories: Vec<CategoryOption>,
}

/// What the organizer confirms before a seminar is deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SeminarDeleteInfo {
    pub id: i32,
    pub topic: String,
    pub date_and_time: String,
}
