//! External representations for authors and courses.

use courselib_store::{Author, Course};
use serde::Serialize;
use time::Date;
use uuid::Uuid;

/// Author as returned to API consumers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    /// Unique identifier for the author
    pub id: Uuid,
    /// Display name, "{first} {last}"
    pub name: String,
    /// Whole completed years as of the evaluation date
    pub age: i32,
    /// Main category the author publishes in, if any
    pub main_category: Option<String>,
}

impl AuthorView {
    /// Project an author entity, deriving the display name and the age as of
    /// `today`. Pure: the same author and date always yield the same view.
    pub fn project(author: &Author, today: Date) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: age_in_years(author.date_of_birth, today),
            main_category: author.main_category.clone(),
        }
    }
}

/// Course as returned to API consumers.
///
/// The owning author appears only as its id. Embedding the full author view
/// would repeat identical author data on every course in a response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    /// Unique identifier for the course
    pub id: Uuid,
    /// Title of the course
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Identifier of the owning author
    pub author_id: Uuid,
}

impl CourseView {
    /// Project a course entity; every field is copied verbatim.
    pub fn project(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

/// Whole years elapsed between `date_of_birth` and `today`: the year
/// difference, minus one when this year's birthday has not happened yet.
pub fn age_in_years(date_of_birth: Date, today: Date) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month() as u8, today.day()) < (date_of_birth.month() as u8, date_of_birth.day()) {
        age -= 1;
    }
    age
}
