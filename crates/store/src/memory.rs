//! In-memory course store backend.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::criteria::FilterCriteria;
use crate::entities::{Author, Course, NewAuthor, NewCourse};
use crate::{CourseStore, StoreError};

#[derive(Debug, Default)]
struct State {
    authors: Vec<Author>,
    courses: Vec<Course>,
}

/// Course store backed by process memory.
///
/// Writes go through an `RwLock`, so concurrent readers are isolated from
/// in-flight writes. Ids are v7 uuids assigned here at creation time.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))
    }
}

fn require_id(id: Uuid, what: &'static str) -> Result<(), StoreError> {
    if id.is_nil() {
        return Err(StoreError::InvalidArgument(what));
    }
    Ok(())
}

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn find_authors(&self, criteria: &FilterCriteria) -> Result<Vec<Author>, StoreError> {
        let state = self.read()?;
        let mut authors: Vec<Author> = state
            .authors
            .iter()
            .filter(|author| criteria.matches(author))
            .cloned()
            .collect();
        authors.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn find_author_by_id(&self, author_id: Uuid) -> Result<Option<Author>, StoreError> {
        require_id(author_id, "author id must not be nil")?;
        let state = self.read()?;
        Ok(state
            .authors
            .iter()
            .find(|author| author.id == author_id)
            .cloned())
    }

    async fn author_exists(&self, author_id: Uuid) -> Result<bool, StoreError> {
        require_id(author_id, "author id must not be nil")?;
        let state = self.read()?;
        Ok(state.authors.iter().any(|author| author.id == author_id))
    }

    async fn find_courses_by_author(&self, author_id: Uuid) -> Result<Vec<Course>, StoreError> {
        require_id(author_id, "author id must not be nil")?;
        let state = self.read()?;
        let mut courses: Vec<Course> = state
            .courses
            .iter()
            .filter(|course| course.author_id == author_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(courses)
    }

    async fn find_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, StoreError> {
        require_id(author_id, "author id must not be nil")?;
        require_id(course_id, "course id must not be nil")?;
        let state = self.read()?;
        Ok(state
            .courses
            .iter()
            .find(|course| course.author_id == author_id && course.id == course_id)
            .cloned())
    }

    async fn add_author(&self, author: NewAuthor) -> Result<Author, StoreError> {
        let mut state = self.write()?;

        let record = Author {
            id: Uuid::now_v7(),
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            main_category: author.main_category,
        };

        for course in author.courses {
            state.courses.push(Course {
                id: Uuid::now_v7(),
                title: course.title,
                description: course.description,
                author_id: record.id,
            });
        }

        tracing::debug!(author_id = %record.id, "author added");
        state.authors.push(record.clone());
        Ok(record)
    }

    async fn delete_author(&self, author_id: Uuid) -> Result<(), StoreError> {
        require_id(author_id, "author id must not be nil")?;
        let mut state = self.write()?;

        let before = state.authors.len();
        state.authors.retain(|author| author.id != author_id);
        if state.authors.len() == before {
            return Err(StoreError::AuthorNotFound(author_id));
        }

        // Courses never outlive their owning author.
        state.courses.retain(|course| course.author_id != author_id);
        tracing::debug!(%author_id, "author and owned courses removed");
        Ok(())
    }

    async fn add_course(&self, author_id: Uuid, course: NewCourse) -> Result<Course, StoreError> {
        require_id(author_id, "author id must not be nil")?;
        let mut state = self.write()?;

        if !state.authors.iter().any(|author| author.id == author_id) {
            return Err(StoreError::AuthorNotFound(author_id));
        }

        // The owner is always the passed-in author, regardless of payload.
        let record = Course {
            id: Uuid::now_v7(),
            title: course.title,
            description: course.description,
            author_id,
        };
        state.courses.push(record.clone());
        Ok(record)
    }

    async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> Result<(), StoreError> {
        require_id(author_id, "author id must not be nil")?;
        require_id(course_id, "course id must not be nil")?;
        let mut state = self.write()?;

        let before = state.courses.len();
        state
            .courses
            .retain(|course| !(course.author_id == author_id && course.id == course_id));
        if state.courses.len() == before {
            return Err(StoreError::CourseNotFound(course_id));
        }
        Ok(())
    }

    async fn save(&self) -> Result<(), StoreError> {
        // Writes are applied immediately; there is nothing buffered to flush.
        Ok(())
    }
}
