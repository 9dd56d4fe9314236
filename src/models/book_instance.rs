//! Book instance (physical copy) model

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{
    author::DATE_MED,
    form::{self, clean, parse_id, FormErrors},
};

/// Lending status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Available,
        InstanceStatus::Maintenance,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn from_data(id: Uuid, data: BookInstanceData) -> Self {
        Self {
            id,
            book_id: data.book_id,
            imprint: data.imprint,
            status: data.status,
            due_back: data.due_back,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back
            .map(|d| d.format(DATE_MED).to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceData {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "book_reference")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "known_status"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "due_date"))]
    pub due_back: String,
}

const INSTANCE_FIELDS: &[&str] = &["book", "imprint", "status", "due_back"];

fn book_reference(value: &str) -> Result<(), ValidationError> {
    form::optional_identity(value, "Book must be one of the listed books")
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<InstanceStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status").with_message("Invalid status".into()))
    }
}

fn due_date(value: &str) -> Result<(), ValidationError> {
    form::optional_date(value, "Invalid date")
}

impl BookInstanceForm {
    pub fn sanitize(self) -> Self {
        Self {
            book: clean(&self.book),
            imprint: clean(&self.imprint),
            status: clean(&self.status),
            due_back: clean(&self.due_back),
        }
    }

    pub fn to_data(&self) -> Result<BookInstanceData, FormErrors> {
        self.validate()
            .map_err(|e| FormErrors::from_validation(&e, INSTANCE_FIELDS))?;

        let book_id = parse_id(&self.book).ok_or_else(|| {
            let mut errors = FormErrors::default();
            errors.push("book", "Book must be specified");
            errors
        })?;

        Ok(BookInstanceData {
            book_id,
            imprint: self.imprint.clone(),
            status: self.status.parse().unwrap_or_default(),
            due_back: form::parse_optional_date(&self.due_back).unwrap_or_default(),
        })
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance
                .due_back
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }
}
