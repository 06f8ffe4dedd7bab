//! Generic document-collection resource.
//!
//! ```text
//! GET    /      list every document
//! POST   /      insert the JSON object, 201 with its _id
//! GET    /{id}  fetch by ObjectId, 404 when absent
//! PUT    /{id}  $set the JSON object's fields, 404 when absent
//! DELETE /{id}  204, 404 when absent
//! ```

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::http::{AppError, AppState};

#[derive(Debug, Clone, Copy)]
struct Resource {
    collection: &'static str,
}

impl Resource {
    fn collection(&self, state: &AppState) -> Result<Collection<Document>, AppError> {
        Ok(state.database()?.collection(self.collection))
    }
}

/// Router exposing `collection` as a REST resource rooted at `/`.
pub fn resource_router(collection: &'static str) -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
        .layer(Extension(Resource { collection }))
}

async fn list(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
) -> Result<Json<Vec<Document>>, AppError> {
    let cursor = resource.collection(&state)?.find(doc! {}).await?;
    let documents: Vec<Document> = cursor.try_collect().await?;
    Ok(Json(documents))
}

async fn create(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let Json(mut document) = payload?;
    let collection = resource.collection(&state)?;

    let result = collection.insert_one(&document).await?;
    document.insert("_id", result.inserted_id);
    tracing::debug!(collection = resource.collection, "Document inserted");

    Ok((StatusCode::CREATED, Json(document)))
}

async fn fetch(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let filter = id_filter(&id)?;
    let found = resource.collection(&state)?.find_one(filter).await?;
    Ok(found_or_404(found))
}

async fn update(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(mut changes) = payload?;
    let filter = id_filter(&id)?;
    changes.remove("_id");

    let updated = resource
        .collection(&state)?
        .find_one_and_update(filter, doc! { "$set": changes })
        .return_document(ReturnDocument::After)
        .await?;
    Ok(found_or_404(updated))
}

async fn remove(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let filter = id_filter(&id)?;
    let result = resource.collection(&state)?.delete_one(filter).await?;
    if result.deleted_count == 0 {
        Ok(StatusCode::NOT_FOUND)
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

fn id_filter(id: &str) -> Result<Document, AppError> {
    ObjectId::parse_str(id)
        .map(|oid| doc! { "_id": oid })
        .map_err(|_| AppError::InvalidId(id.to_string()))
}

fn found_or_404(document: Option<Document>) -> Response {
    match document {
        Some(document) => Json(document).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_accepts_object_ids() {
        let filter = id_filter("65f1a2b3c4d5e6f708192a3b").unwrap();
        assert_eq!(
            filter.get_object_id("_id").unwrap().to_hex(),
            "65f1a2b3c4d5e6f708192a3b"
        );
    }

    #[test]
    fn test_id_filter_rejects_garbage() {
        let err = id_filter("not-an-id").unwrap_err();
        assert_eq!(err.to_string(), "invalid document id 'not-an-id'");
    }
}
