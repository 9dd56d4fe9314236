//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::form::{self, clean, parse_id, FormErrors};

/// Book record. `author_id` and `genre_ids` reference other documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn from_data(id: Uuid, data: BookData) -> Self {
        Self {
            id,
            title: data.title,
            author_id: data.author_id,
            summary: data.summary,
            isbn: data.isbn,
            genre_ids: data.genre_ids,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

/// Book create/update form. Repeated `genre` keys collect into `genre`,
/// so zero, one or many checked boxes all arrive as a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Author must not be empty"),
        custom(function = "author_reference")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty"))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

const BOOK_FIELDS: &[&str] = &["title", "author", "summary", "isbn", "genre"];

fn author_reference(value: &str) -> Result<(), ValidationError> {
    form::optional_identity(value, "Author must be one of the listed authors")
}

/// Trim, escape and de-duplicate the genre selection, keeping first-seen order.
pub fn normalize_genre_selection(selection: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(selection.len());
    for value in selection {
        let value = clean(&value);
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

impl BookForm {
    pub fn sanitize(self) -> Self {
        Self {
            title: clean(&self.title),
            author: clean(&self.author),
            summary: clean(&self.summary),
            isbn: clean(&self.isbn),
            genre: normalize_genre_selection(self.genre),
        }
    }

    pub fn to_data(&self) -> Result<BookData, FormErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::default(),
            Err(e) => FormErrors::from_validation(&e, BOOK_FIELDS),
        };

        let mut genre_ids = Vec::with_capacity(self.genre.len());
        for value in &self.genre {
            match parse_id(value) {
                Some(id) => genre_ids.push(id),
                None => {
                    errors.push("genre", "Genre must be one of the listed genres");
                    break;
                }
            }
        }

        let author_id = parse_id(&self.author);
        match author_id {
            Some(author_id) if errors.is_empty() => Ok(BookData {
                title: self.title.clone(),
                author_id,
                summary: self.summary.clone(),
                isbn: self.isbn.clone(),
                genre_ids,
            }),
            _ => Err(errors),
        }
    }

    pub fn is_genre_selected(&self, id: Uuid) -> bool {
        self.genre.iter().any(|g| parse_id(g) == Some(id))
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(|g| g.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(genre: Vec<String>) -> BookForm {
        BookForm {
            title: "Foundation".to_string(),
            author: Uuid::new_v4().to_string(),
            summary: "Psychohistory".to_string(),
            isbn: "9780553293357".to_string(),
            genre,
        }
    }

    #[test]
    fn test_genre_selection_is_normalized() {
        let a = Uuid::new_v4().to_string();
        let b = Uuid::new_v4().to_string();
        let selection = vec![a.clone(), format!(" {} ", b), a.clone(), String::new()];
        assert_eq!(normalize_genre_selection(selection), vec![a, b]);
        assert!(normalize_genre_selection(vec![]).is_empty());
    }

    #[test]
    fn test_zero_one_many_genres() {
        assert!(form(vec![]).sanitize().to_data().unwrap().genre_ids.is_empty());

        let one = Uuid::new_v4();
        let data = form(vec![one.to_string()]).sanitize().to_data().unwrap();
        assert_eq!(data.genre_ids, vec![one]);

        let two = Uuid::new_v4();
        let data = form(vec![one.to_string(), two.to_string()])
            .sanitize()
            .to_data()
            .unwrap();
        assert_eq!(data.genre_ids, vec![one, two]);
    }

    #[test]
    fn test_missing_fields() {
        let errors = BookForm::default().sanitize().to_data().unwrap_err();
        let messages: Vec<_> = errors.0.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Title must not be empty",
                "Author must not be empty",
                "Summary must not be empty",
                "ISBN must not be empty",
            ]
        );
    }

    #[test]
    fn test_bad_references() {
        let mut bad = form(vec!["not-a-genre".to_string()]);
        bad.author = "someone".to_string();
        let errors = bad.sanitize().to_data().unwrap_err();
        assert!(errors.has_field("author"));
        assert!(errors.has_field("genre"));
    }
}
