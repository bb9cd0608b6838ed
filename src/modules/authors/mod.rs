pub mod handlers;
pub mod models;

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;
use time::macros::date;

use courselib_kernel::{InitCtx, Module};
use courselib_store::{NewAuthor, NewCourse, SharedStore};

/// Authors module: the author collection with filtering/search, plus the
/// courses nested under each author.
pub struct AuthorsModule;

impl AuthorsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.store.seed_demo_data {
            let seeded = seed_demo_authors(ctx.store).await?;
            tracing::info!(module = self.name(), seeded, "demo authors seeded");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self, store: SharedStore) -> Router {
        Router::new()
            .route("/", get(handlers::list_authors))
            .route("/{author_id}", get(handlers::get_author))
            .route(
                "/{author_id}/courses",
                get(handlers::list_courses_for_author),
            )
            .route(
                "/{author_id}/courses/{course_id}",
                get(handlers::get_course_for_author),
            )
            .with_state(store)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "parameters": [
                            {
                                "name": "mainCategory",
                                "in": "query",
                                "required": false,
                                "description": "Keep only authors whose main category matches exactly",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "searchQuery",
                                "in": "query",
                                "required": false,
                                "description": "Keep only authors whose category or name contains this text",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "List of authors",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/AuthorView"
                                            }
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{authorId}": {
                    "get": {
                        "summary": "Get a single author",
                        "tags": ["Authors"],
                        "parameters": [
                            {
                                "name": "authorId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string", "format": "uuid" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The author",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/AuthorView"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Author not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{authorId}/courses": {
                    "get": {
                        "summary": "List courses for an author",
                        "tags": ["Courses"],
                        "parameters": [
                            {
                                "name": "authorId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string", "format": "uuid" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Courses owned by the author",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/CourseView"
                                            }
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Author not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{authorId}/courses/{courseId}": {
                    "get": {
                        "summary": "Get a single course for an author",
                        "tags": ["Courses"],
                        "parameters": [
                            {
                                "name": "authorId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string", "format": "uuid" }
                            },
                            {
                                "name": "courseId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string", "format": "uuid" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The course",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/CourseView"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Author or course not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "AuthorView": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "format": "uuid",
                                "description": "Unique identifier for the author"
                            },
                            "name": {
                                "type": "string",
                                "description": "Full display name"
                            },
                            "age": {
                                "type": "integer",
                                "description": "Age in whole years, derived from the date of birth"
                            },
                            "mainCategory": {
                                "type": "string",
                                "nullable": true,
                                "description": "Main category the author publishes in"
                            }
                        },
                        "required": ["id", "name", "age"]
                    },
                    "CourseView": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "format": "uuid",
                                "description": "Unique identifier for the course"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the course"
                            },
                            "description": {
                                "type": "string",
                                "nullable": true,
                                "description": "Free-form course description"
                            },
                            "authorId": {
                                "type": "string",
                                "format": "uuid",
                                "description": "Identifier of the owning author"
                            }
                        },
                        "required": ["id", "title", "authorId"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Seed the store with a handful of demo authors and their courses.
async fn seed_demo_authors(store: &SharedStore) -> anyhow::Result<usize> {
    let authors = demo_authors();
    let count = authors.len();

    for author in authors {
        store.add_author(author).await?;
    }
    store.save().await?;

    Ok(count)
}

fn demo_authors() -> Vec<NewAuthor> {
    vec![
        NewAuthor {
            first_name: "Berry".to_string(),
            last_name: "Griffin Beak Eldritch".to_string(),
            date_of_birth: date!(1650 - 07 - 23),
            main_category: Some("Ships".to_string()),
            courses: vec![NewCourse {
                title: "Commandeering a Ship Without Getting Caught".to_string(),
                description: Some("Commandeering a ship in rough waters isn't easy. Commandeering it without getting caught is even harder. In this course you'll learn how to sail away and avoid those pesky musketeers.".to_string()),
            }],
        },
        NewAuthor {
            first_name: "Nancy".to_string(),
            last_name: "Swashbuckle Rye".to_string(),
            date_of_birth: date!(1668 - 05 - 21),
            main_category: Some("Rum".to_string()),
            courses: vec![NewCourse {
                title: "Overthrowing Mutiny".to_string(),
                description: Some("In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.".to_string()),
            }],
        },
        NewAuthor {
            first_name: "Eli".to_string(),
            last_name: "Ivory Bones Sweet".to_string(),
            date_of_birth: date!(1701 - 12 - 16),
            main_category: Some("Singing".to_string()),
            courses: vec![NewCourse {
                title: "Singalong Pirate Hits".to_string(),
                description: Some("In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note.".to_string()),
            }],
        },
        NewAuthor {
            first_name: "Arnold".to_string(),
            last_name: "The Unseen Stafford".to_string(),
            date_of_birth: date!(1702 - 03 - 06),
            main_category: Some("Singing".to_string()),
            courses: Vec::new(),
        },
        NewAuthor {
            first_name: "Seabury".to_string(),
            last_name: "Toxic Reyson".to_string(),
            date_of_birth: date!(1690 - 11 - 23),
            main_category: Some("Maps".to_string()),
            courses: Vec::new(),
        },
        NewAuthor {
            first_name: "Rutherford".to_string(),
            last_name: "Fearless Cloven".to_string(),
            date_of_birth: date!(1723 - 04 - 05),
            main_category: Some("Wrecks".to_string()),
            courses: Vec::new(),
        },
    ]
}

/// Create a new instance of the authors module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use courselib_store::{FilterCriteria, InMemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn seeding_populates_authors_and_courses() {
        let store: SharedStore = Arc::new(InMemoryStore::new());
        let seeded = seed_demo_authors(&store).await.unwrap();

        let authors = store
            .find_authors(&FilterCriteria::default())
            .await
            .unwrap();
        assert_eq!(authors.len(), seeded);

        let berry = authors
            .iter()
            .find(|a| a.first_name == "Berry")
            .expect("seed data includes Berry");
        let courses = store.find_courses_by_author(berry.id).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].author_id, berry.id);
    }
}
