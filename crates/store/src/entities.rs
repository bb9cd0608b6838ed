//! Persisted entity types for the course library.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// A content author. Aggregate root: every course belongs to exactly one
/// author and is removed with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Unique identifier, assigned by the store at creation and immutable
    /// afterwards.
    pub id: Uuid,
    /// Author's first name
    pub first_name: String,
    /// Author's last name
    pub last_name: String,
    /// Date of birth; age is always derived from it, never stored
    pub date_of_birth: Date,
    /// Main category the author publishes in, if any
    pub main_category: Option<String>,
}

/// A course owned by exactly one author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    /// Unique identifier for the course
    pub id: Uuid,
    /// Title of the course
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Identifier of the owning author; set exactly once at creation
    pub author_id: Uuid,
}

/// Payload for creating an author. The store assigns the id, and ids for any
/// initial courses, when the record is added.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub main_category: Option<String>,
    /// Courses created together with the author
    #[serde(default)]
    pub courses: Vec<NewCourse>,
}

/// Payload for creating a course under an author.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
}
