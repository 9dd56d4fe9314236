//! Render-time shapes of the entities, carrying the derived fields

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Author, Book, BookInstance, Genre, InstanceStatus};

#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            name: author.name(),
            lifespan: author.lifespan(),
            url: author.url(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
            url: genre.url(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorView>,
}

impl BookView {
    pub fn new(book: &Book, author: Option<&Author>) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            url: book.url(),
            author: author.map(AuthorView::from),
        }
    }
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        BookView::new(book, None)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub available: bool,
    pub due_back: Option<String>,
    pub due_back_formatted: String,
    pub url: String,
    pub book: Option<BookView>,
}

impl BookInstanceView {
    pub fn new(instance: &BookInstance, book: Option<&Book>) -> Self {
        Self {
            id: instance.id,
            imprint: instance.imprint.clone(),
            status: instance.status,
            available: instance.status == InstanceStatus::Available,
            due_back: instance.due_back.map(|d| d.to_string()),
            due_back_formatted: instance.due_back_formatted(),
            url: instance.url(),
            book: book.map(BookView::from),
        }
    }
}

impl From<&BookInstance> for BookInstanceView {
    fn from(instance: &BookInstance) -> Self {
        BookInstanceView::new(instance, None)
    }
}

/// One entry of a select/checkbox list
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn author_choices(authors: &[Author], selected: &str) -> Vec<Choice> {
    authors
        .iter()
        .map(|a| Choice {
            value: a.id.to_string(),
            label: a.name(),
            selected: a.id.to_string() == selected,
        })
        .collect()
}

pub fn genre_choices(genres: &[Genre], is_checked: impl Fn(Uuid) -> bool) -> Vec<Choice> {
    genres
        .iter()
        .map(|g| Choice {
            value: g.id.to_string(),
            label: g.name.clone(),
            selected: is_checked(g.id),
        })
        .collect()
}

pub fn book_choices(books: &[Book], selected: &str) -> Vec<Choice> {
    books
        .iter()
        .map(|b| Choice {
            value: b.id.to_string(),
            label: b.title.clone(),
            selected: b.id.to_string() == selected,
        })
        .collect()
}

pub fn status_choices(selected: &str) -> Vec<Choice> {
    InstanceStatus::ALL
        .iter()
        .map(|s| Choice {
            value: s.to_string(),
            label: s.to_string(),
            selected: s.as_str() == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_flag_selection() {
        let genres = vec![
            Genre { id: Uuid::new_v4(), name: "Fantasy".to_string() },
            Genre { id: Uuid::new_v4(), name: "Poetry".to_string() },
        ];
        let checked = genres[1].id;
        let choices = genre_choices(&genres, |id| id == checked);
        assert!(!choices[0].selected);
        assert!(choices[1].selected);

        let statuses = status_choices("Loaned");
        assert_eq!(statuses.iter().filter(|c| c.selected).count(), 1);
        assert_eq!(statuses.len(), 4);
    }
}
