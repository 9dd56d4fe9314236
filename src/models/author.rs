//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::form::{self, clean, FormErrors};

/// Medium date format, e.g. "Jan 2, 1920"
pub const DATE_MED: &str = "%b %-d, %Y";

/// Full author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn from_data(id: Uuid, data: AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    /// "First Family", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{} {}", self.first_name, self.family_name)
    }

    pub fn lifespan(&self) -> String {
        let birth = self
            .date_of_birth
            .map(|d| d.format(DATE_MED).to_string())
            .unwrap_or_default();
        let death = self
            .date_of_death
            .map(|d| d.format(DATE_MED).to_string())
            .unwrap_or_default();
        format!("{} - {}", birth, death)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// Validated author fields, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author create/update form as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified"),
        custom(function = "first_name_chars")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified"),
        custom(function = "family_name_chars")
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "birth_date"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "death_date"))]
    pub date_of_death: String,
}

const AUTHOR_FIELDS: &[&str] = &["first_name", "family_name", "date_of_birth", "date_of_death"];

fn first_name_chars(value: &str) -> Result<(), ValidationError> {
    form::name_part(value, "First name")
}

fn family_name_chars(value: &str) -> Result<(), ValidationError> {
    form::name_part(value, "Family name")
}

fn birth_date(value: &str) -> Result<(), ValidationError> {
    form::optional_date(value, "Invalid date of birth")
}

fn death_date(value: &str) -> Result<(), ValidationError> {
    form::optional_date(value, "Invalid date of death")
}

impl AuthorForm {
    pub fn sanitize(self) -> Self {
        Self {
            first_name: clean(&self.first_name),
            family_name: clean(&self.family_name),
            date_of_birth: clean(&self.date_of_birth),
            date_of_death: clean(&self.date_of_death),
        }
    }

    /// Validate an already sanitized form
    pub fn to_data(&self) -> Result<AuthorData, FormErrors> {
        self.validate()
            .map_err(|e| FormErrors::from_validation(&e, AUTHOR_FIELDS))?;

        Ok(AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: form::parse_optional_date(&self.date_of_birth).unwrap_or_default(),
            date_of_death: form::parse_optional_date(&self.date_of_death).unwrap_or_default(),
        })
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_default(),
            date_of_death: author
                .date_of_death
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }
}
