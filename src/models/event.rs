use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::AppError;

/// Allowed event categories. Anything outside this set is rejected at
/// validation time; an absent category falls back to `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Meeting,
    Conference,
    Personal,
    Workshop,
    #[default]
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "Meeting",
            EventCategory::Conference => "Conference",
            EventCategory::Personal => "Personal",
            EventCategory::Workshop => "Workshop",
            EventCategory::Other => "Other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Meeting" => Ok(EventCategory::Meeting),
            "Conference" => Ok(EventCategory::Conference),
            "Personal" => Ok(EventCategory::Personal),
            "Workshop" => Ok(EventCategory::Workshop),
            "Other" => Ok(EventCategory::Other),
            other => Err(AppError::InvalidCategory(format!(
                "{} is not a valid category",
                other
            ))),
        }
    }
}

/// Storage shape of an event, one document per record in the `events`
/// collection. `_id` is `None` until MongoDB assigns it on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: EventCategory,
    pub attendees: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// API shape of a stored event: hex identifier, RFC 3339 timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub category: EventCategory,
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: doc.title,
            description: doc.description,
            date: doc.date,
            location: doc.location,
            category: doc.category,
            attendees: doc.attendees,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Validated fields for a new event, ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub category: EventCategory,
    pub attendees: Vec<String>,
}

/// Validated partial fields for an update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub attendees: Option<Vec<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.attendees.is_none()
    }
}

/// Incoming body for event creation. Every field is optional at the wire
/// level so that validation can report missing fields itself instead of
/// failing inside deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub attendees: Option<Vec<String>>,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        let title = require_title(self.title)?;
        let date = self
            .date
            .ok_or_else(|| AppError::Validation("Event date is required".to_string()))?;
        let category = parse_category(self.category)?.unwrap_or_default();

        Ok(NewEvent {
            title,
            description: trim_optional(self.description),
            date,
            location: trim_optional(self.location),
            category,
            attendees: self.attendees.unwrap_or_default(),
        })
    }
}

/// Incoming body for event updates. Fields left out of the payload are
/// not touched on the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub attendees: Option<Vec<String>>,
}

impl UpdateEventRequest {
    pub fn validate(self) -> Result<EventPatch, AppError> {
        let title = match self.title {
            Some(title) => Some(require_title(Some(title))?),
            None => None,
        };

        Ok(EventPatch {
            title,
            description: trim_optional(self.description),
            date: self.date,
            location: trim_optional(self.location),
            category: parse_category(self.category)?,
            attendees: self.attendees,
        })
    }
}

fn require_title(title: Option<String>) -> Result<String, AppError> {
    let trimmed = title.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Event title is required".to_string()));
    }
    Ok(trimmed.to_string())
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn parse_category(value: Option<String>) -> Result<Option<EventCategory>, AppError> {
    value.map(|v| v.parse()).transpose()
}
