//! ``src/model/record.rs``
//! ============================================================================
//! # Record: one immutable row of the dataset
//!
//! Records are deserialized once from the dataset and never mutated. Text
//! fields that are missing or `null` in the source become empty strings so
//! search and sort treat them as "" instead of failing.

use std::{borrow::Cow, fmt, str::FromStr};

use compact_str::{CompactString, ToCompactString};
use enum_map::Enum;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Stable unique identifier. The mock data uses integers, other exports use
/// string keys, both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(CompactString),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: CompactString,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: CompactString,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub gender: CompactString,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: CompactString,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_title: CompactString,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<CompactString, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CompactString>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Build a record from its parts. Mostly used by tests and fixtures.
    pub fn new(
        id: impl Into<RecordId>,
        first_name: &str,
        last_name: &str,
        gender: &str,
        email: &str,
        job_title: &str,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: gender.into(),
            email: email.into(),
            job_title: job_title.into(),
        }
    }

    /// Text of the given field as used by search, sort and display.
    #[must_use]
    pub fn field(&self, field: RecordField) -> Cow<'_, str> {
        match field {
            RecordField::Id => Cow::Owned(self.id.to_string()),
            RecordField::FirstName => Cow::Borrowed(&self.first_name),
            RecordField::LastName => Cow::Borrowed(&self.last_name),
            RecordField::Gender => Cow::Borrowed(&self.gender),
            RecordField::Email => Cow::Borrowed(&self.email),
            RecordField::JobTitle => Cow::Borrowed(&self.job_title),
        }
    }
}

/// Closed set of record columns. Field names coming from configuration are
/// parsed into this enum at load time, so an unknown field can never reach
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Id,
    FirstName,
    LastName,
    Gender,
    Email,
    JobTitle,
}

impl RecordField {
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::Gender,
        Self::Email,
        Self::JobTitle,
    ];

    /// Config/CLI spelling.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Gender => "gender",
            Self::Email => "email",
            Self::JobTitle => "job_title",
        }
    }

    /// Column header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Gender => "Gender",
            Self::Email => "Email",
            Self::JobTitle => "Job Title",
        }
    }

    /// Next field in column order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RecordField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| {
                AppError::invalid_input(
                    "field",
                    format!("unknown record field '{}'", s.to_compact_string()),
                )
            })
    }
}
