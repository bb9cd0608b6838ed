//! Request handlers for the authors module.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use courselib_http::error::AppError;
use courselib_store::{FilterCriteria, SharedStore};

use super::models::{AuthorView, CourseView};

/// Optional query-string parameters for the author collection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorQueryParams {
    /// Exact-match filter on the author's main category
    pub main_category: Option<String>,
    /// Substring search across category, last name, and first name
    pub search_query: Option<String>,
}

/// List authors, optionally filtered and searched.
pub async fn list_authors(
    State(store): State<SharedStore>,
    Query(params): Query<AuthorQueryParams>,
) -> Result<Json<Vec<AuthorView>>, AppError> {
    let criteria = FilterCriteria::new(
        params.main_category.as_deref(),
        params.search_query.as_deref(),
    );

    let authors = store.find_authors(&criteria).await?;

    // One evaluation date per request, so every author in the response ages
    // against the same day.
    let today = OffsetDateTime::now_utc().date();
    let views = authors
        .iter()
        .map(|author| AuthorView::project(author, today))
        .collect();

    Ok(Json(views))
}

/// Fetch a single author by id.
pub async fn get_author(
    State(store): State<SharedStore>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<AuthorView>, AppError> {
    let author = store
        .find_author_by_id(author_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("author {author_id} not found")))?;

    let today = OffsetDateTime::now_utc().date();
    Ok(Json(AuthorView::project(&author, today)))
}

/// List the courses owned by an author.
pub async fn list_courses_for_author(
    State(store): State<SharedStore>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<CourseView>>, AppError> {
    if !store.author_exists(author_id).await? {
        return Err(AppError::not_found(format!("author {author_id} not found")));
    }

    let courses = store.find_courses_by_author(author_id).await?;
    Ok(Json(courses.iter().map(CourseView::project).collect()))
}

/// Fetch a single course owned by an author.
pub async fn get_course_for_author(
    State(store): State<SharedStore>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CourseView>, AppError> {
    if !store.author_exists(author_id).await? {
        return Err(AppError::not_found(format!("author {author_id} not found")));
    }

    let course = store
        .find_course(author_id, course_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("course {course_id} not found")))?;

    Ok(Json(CourseView::project(&course)))
}
