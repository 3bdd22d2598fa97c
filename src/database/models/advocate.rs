use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;

use crate::filter::SearchColumn;

pub const TABLE: &str = "advocates";

/// Columns selected for an advocate, in wire order.
pub const COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "city",
    "degree",
    "specialties",
    "years_of_experience",
    "phone_number",
    "created_at",
];

/// Columns the free-text search runs against.
pub const SEARCH_COLUMNS: &[SearchColumn] = &[
    SearchColumn::Text("first_name"),
    SearchColumn::Text("last_name"),
    SearchColumn::Text("city"),
    SearchColumn::Text("degree"),
    SearchColumn::JsonTextArray("specialties"),
    SearchColumn::CastText("years_of_experience"),
];

/// Newest first; `id` breaks ties between rows inserted in the same statement.
pub const DEFAULT_ORDER: &str = "created_at desc, id desc";

/// A row as the store hands it back, before any shape checks.
#[derive(Debug, Clone, FromRow)]
pub struct AdvocateRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Value,
    pub years_of_experience: i32,
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable advocate; `id` and `createdAt` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvocate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: i64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvocateShapeError {
    #[error("id must be positive, got {0}")]
    NonPositiveId(i32),

    #[error("{0} must not be blank")]
    BlankField(&'static str),

    #[error("specialties must be an array of strings")]
    InvalidSpecialties,

    #[error("yearsOfExperience must be non-negative, got {0}")]
    NegativeExperience(i32),

    #[error("phoneNumber must be positive, got {0}")]
    NonPositivePhone(i64),
}

impl TryFrom<AdvocateRow> for Advocate {
    type Error = AdvocateShapeError;

    fn try_from(row: AdvocateRow) -> Result<Self, Self::Error> {
        if row.id <= 0 {
            return Err(AdvocateShapeError::NonPositiveId(row.id));
        }
        check_text_fields(&row.first_name, &row.last_name, &row.city, &row.degree)?;
        check_numbers(row.years_of_experience, row.phone_number)?;

        let specialties = match row.specialties {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(label) => Ok(label),
                    _ => Err(AdvocateShapeError::InvalidSpecialties),
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(AdvocateShapeError::InvalidSpecialties),
        };

        Ok(Advocate {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            degree: row.degree,
            specialties,
            years_of_experience: row.years_of_experience,
            phone_number: row.phone_number,
            created_at: row.created_at,
        })
    }
}

impl NewAdvocate {
    pub fn validate(&self) -> Result<(), AdvocateShapeError> {
        check_text_fields(&self.first_name, &self.last_name, &self.city, &self.degree)?;
        check_numbers(self.years_of_experience, self.phone_number)
    }

    /// The row the store would produce for this advocate.
    pub fn into_row(self, id: i32, created_at: DateTime<Utc>) -> AdvocateRow {
        AdvocateRow {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            city: self.city,
            degree: self.degree,
            specialties: Value::Array(self.specialties.into_iter().map(Value::String).collect()),
            years_of_experience: self.years_of_experience,
            phone_number: self.phone_number,
            created_at,
        }
    }
}

fn check_text_fields(first_name: &str, last_name: &str, city: &str, degree: &str) -> Result<(), AdvocateShapeError> {
    for (field, value) in [
        ("firstName", first_name),
        ("lastName", last_name),
        ("city", city),
        ("degree", degree),
    ] {
        if value.trim().is_empty() {
            return Err(AdvocateShapeError::BlankField(field));
        }
    }
    Ok(())
}

fn check_numbers(years_of_experience: i32, phone_number: i64) -> Result<(), AdvocateShapeError> {
    if years_of_experience < 0 {
        return Err(AdvocateShapeError::NegativeExperience(years_of_experience));
    }
    if phone_number <= 0 {
        return Err(AdvocateShapeError::NonPositivePhone(phone_number));
    }
    Ok(())
}
