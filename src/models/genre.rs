//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::form::{clean, FormErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Validated genre fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreData {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl GenreForm {
    pub fn sanitize(self) -> Self {
        Self {
            name: clean(&self.name),
        }
    }

    pub fn to_data(&self) -> Result<GenreData, FormErrors> {
        self.validate()
            .map_err(|e| FormErrors::from_validation(&e, &["name"]))?;
        Ok(GenreData {
            name: self.name.clone(),
        })
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
