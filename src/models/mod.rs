//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod form;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorForm};
pub use book::{Book, BookData, BookForm};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceForm, InstanceStatus};
pub use form::{FieldError, FormErrors};
pub use genre::{Genre, GenreData, GenreForm};
