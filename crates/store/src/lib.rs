//! Entities, filter criteria, and the store interface for the course library.
//!
//! The [`CourseStore`] trait is the seam between the domain and whatever
//! holds the data. [`memory::InMemoryStore`] is the shipped backend; the
//! handlers and tests only ever see the trait.

pub mod criteria;
pub mod entities;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use criteria::FilterCriteria;
pub use entities::{Author, Course, NewAuthor, NewCourse};
pub use memory::InMemoryStore;

/// Shared handle to the configured store backend.
pub type SharedStore = Arc<dyn CourseStore>;

/// Errors surfaced by store operations.
///
/// Lookups that find nothing return `Ok(None)` rather than an error; the
/// `NotFound` variants cover operations whose target must exist (deletes,
/// adding a course to an author).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("author {0} not found")]
    AuthorNotFound(Uuid),

    #[error("course {0} not found")]
    CourseNotFound(Uuid),

    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Read and write operations over authors and their courses.
///
/// Reads are side-effect free. `find_authors` returns authors ordered by
/// last name then first name; `find_courses_by_author` returns courses
/// ordered by title.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// All authors matching the given criteria.
    async fn find_authors(&self, criteria: &FilterCriteria) -> Result<Vec<Author>, StoreError>;

    /// Look up a single author. Absent authors are `Ok(None)`.
    async fn find_author_by_id(&self, author_id: Uuid) -> Result<Option<Author>, StoreError>;

    /// Whether an author with this id exists.
    async fn author_exists(&self, author_id: Uuid) -> Result<bool, StoreError>;

    /// All courses owned by the given author, ordered by title.
    async fn find_courses_by_author(&self, author_id: Uuid) -> Result<Vec<Course>, StoreError>;

    /// Look up a single course under the given author.
    async fn find_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, StoreError>;

    /// Add an author. The store assigns fresh ids to the author and to every
    /// nested course.
    async fn add_author(&self, author: NewAuthor) -> Result<Author, StoreError>;

    /// Remove an author and, with it, every course it owns.
    async fn delete_author(&self, author_id: Uuid) -> Result<(), StoreError>;

    /// Add a course under an existing author. The owning author id is always
    /// taken from `author_id`, never from the payload.
    async fn add_course(&self, author_id: Uuid, course: NewCourse) -> Result<Course, StoreError>;

    /// Remove a single course owned by the given author.
    async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<(), StoreError>;

    /// Commit pending changes. Backends that write through immediately
    /// implement this as a no-op.
    async fn save(&self) -> Result<(), StoreError>;
}
