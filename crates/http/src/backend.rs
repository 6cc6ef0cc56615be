//! In-memory tutorials backend speaking the same REST protocol as the
//! production server. Used for local development and end-to-end tests.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tutorials_kernel::{Tutorial, TutorialId, TutorialPayload};
use uuid::{Timestamp, Uuid};

use crate::error::AppError;

/// Partial update body; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorialPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TitleQuery {
    pub title: Option<String>,
}

/// Shared collection state, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TutorialStore {
    tutorials: Arc<RwLock<Vec<Tutorial>>>,
}

impl TutorialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, or those whose title contains `title` (case-insensitive).
    pub async fn list(&self, title: Option<&str>) -> Vec<Tutorial> {
        let tutorials = self.tutorials.read().await;
        match title {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                tutorials
                    .iter()
                    .filter(|t| t.title.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            _ => tutorials.clone(),
        }
    }

    pub async fn get(&self, id: &str) -> Option<Tutorial> {
        let tutorials = self.tutorials.read().await;
        tutorials.iter().find(|t| has_id(t, id)).cloned()
    }

    /// Persist a payload under a freshly assigned id.
    pub async fn insert(&self, payload: TutorialPayload) -> Tutorial {
        let id = Uuid::new_v7(Timestamp::now(uuid::NoContext)).to_string();
        let tutorial = Tutorial {
            id: Some(TutorialId::Text(id)),
            title: payload.title,
            description: payload.description,
            published: payload.published,
        };
        self.tutorials.write().await.push(tutorial.clone());
        tutorial
    }

    pub async fn update(&self, id: &str, patch: TutorialPatch) -> Option<Tutorial> {
        let mut tutorials = self.tutorials.write().await;
        let tutorial = tutorials.iter_mut().find(|t| has_id(t, id))?;
        if let Some(title) = patch.title {
            tutorial.title = title;
        }
        if let Some(description) = patch.description {
            tutorial.description = description;
        }
        if let Some(published) = patch.published {
            tutorial.published = published;
        }
        Some(tutorial.clone())
    }

    pub async fn remove(&self, id: &str) -> bool {
        let mut tutorials = self.tutorials.write().await;
        let before = tutorials.len();
        tutorials.retain(|t| !has_id(t, id));
        tutorials.len() != before
    }

    /// Drop every record, returning how many were removed.
    pub async fn clear(&self) -> usize {
        let mut tutorials = self.tutorials.write().await;
        let removed = tutorials.len();
        tutorials.clear();
        removed
    }
}

fn has_id(tutorial: &Tutorial, id: &str) -> bool {
    tutorial
        .id
        .as_ref()
        .is_some_and(|existing| existing.to_string() == id)
}

/// Routes for the collection, meant to be mounted at `/api/tutorials`.
pub fn routes(store: TutorialStore) -> Router {
    Router::new()
        .route(
            "/",
            get(list_tutorials)
                .post(create_tutorial)
                .delete(delete_all_tutorials),
        )
        .route(
            "/{id}",
            get(get_tutorial)
                .put(update_tutorial)
                .delete(delete_tutorial),
        )
        .with_state(store)
}

async fn list_tutorials(
    State(store): State<TutorialStore>,
    Query(query): Query<TitleQuery>,
) -> Json<Vec<Tutorial>> {
    Json(store.list(query.title.as_deref()).await)
}

async fn get_tutorial(
    State(store): State<TutorialStore>,
    Path(id): Path<String>,
) -> Result<Json<Tutorial>, AppError> {
    store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Cannot find Tutorial with id={id}.")))
}

async fn create_tutorial(
    State(store): State<TutorialStore>,
    Json(payload): Json<TutorialPayload>,
) -> Result<(StatusCode, Json<Tutorial>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::validation(
            vec![json!({"field": "title", "error": "required"})],
            "Content can not be empty!",
        ));
    }

    let tutorial = store.insert(payload).await;
    tracing::info!(id = ?tutorial.id, title = %tutorial.title, "tutorial created");
    Ok((StatusCode::CREATED, Json(tutorial)))
}

async fn update_tutorial(
    State(store): State<TutorialStore>,
    Path(id): Path<String>,
    Json(patch): Json<TutorialPatch>,
) -> Result<Json<Tutorial>, AppError> {
    let tutorial = store.update(&id, patch).await.ok_or_else(|| {
        AppError::not_found(format!(
            "Cannot update Tutorial with id={id}. Maybe Tutorial was not found!"
        ))
    })?;
    tracing::info!(%id, "tutorial updated");
    Ok(Json(tutorial))
}

async fn delete_tutorial(
    State(store): State<TutorialStore>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !store.remove(&id).await {
        return Err(AppError::not_found(format!(
            "Cannot delete Tutorial with id={id}. Maybe Tutorial was not found!"
        )));
    }
    tracing::info!(%id, "tutorial deleted");
    Ok(Json(json!({"message": "Tutorial was deleted successfully!"})))
}

async fn delete_all_tutorials(State(store): State<TutorialStore>) -> Json<Vec<Tutorial>> {
    let removed = store.clear().await;
    tracing::info!(removed, "all tutorials deleted");
    Json(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Method, Request};
    use tower::ServiceExt;

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn seeded_store() -> TutorialStore {
        let store = TutorialStore::new();
        for title in ["Rust Basics", "Async Rust", "Intro to Go"] {
            store
                .insert(TutorialPayload {
                    title: title.to_string(),
                    description: format!("About {title}"),
                    published: false,
                })
                .await;
        }
        store
    }

    #[tokio::test]
    async fn create_assigns_id_and_returns_201() {
        let app = routes(TutorialStore::new());
        let (status, json) = send(
            app,
            Method::POST,
            "/",
            Some(json!({"title": "New", "description": "Fresh", "published": true})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(json["id"].is_string());
        assert_eq!(json["title"], "New");
        assert_eq!(json["published"], true);
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_id() {
        let store = TutorialStore::new();
        let (_, json) = send(
            routes(store),
            Method::POST,
            "/",
            Some(json!({"id": "forged", "title": "New"})),
        )
        .await;
        assert_ne!(json["id"], "forged");
    }

    #[tokio::test]
    async fn create_without_title_is_rejected() {
        let store = TutorialStore::new();
        let (status, json) = send(
            routes(store.clone()),
            Method::POST,
            "/",
            Some(json!({"description": "no title"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "validation_error");
        assert!(store.list(None).await.is_empty());
    }

    #[tokio::test]
    async fn title_filter_is_case_insensitive_and_keeps_order() {
        let store = seeded_store().await;
        let (status, json) = send(routes(store), Method::GET, "/?title=rust", None).await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Rust Basics", "Async Rust"]);
    }

    #[tokio::test]
    async fn missing_record_returns_404() {
        let store = seeded_store().await;
        for method in [Method::GET, Method::DELETE] {
            let (status, json) = send(routes(store.clone()), method, "/does-not-exist", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["error"]["code"], "not_found");
        }
    }

    #[tokio::test]
    async fn update_applies_partial_patch() {
        let store = seeded_store().await;
        let id = store.list(None).await[0].id.clone().unwrap();

        let (status, json) = send(
            routes(store.clone()),
            Method::PUT,
            &format!("/{id}"),
            Some(json!({"published": true})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["published"], true);
        assert_eq!(json["title"], "Rust Basics");
        assert!(store.get(&id.to_string()).await.unwrap().published);
    }

    #[tokio::test]
    async fn delete_all_empties_collection() {
        let store = seeded_store().await;
        let (status, json) = send(routes(store.clone()), Method::DELETE, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
        assert!(store.list(None).await.is_empty());
    }
}
