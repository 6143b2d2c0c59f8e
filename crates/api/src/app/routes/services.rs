use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use velora_catalog::model::ServiceInput;
use velora_core::ServiceId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_all).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.catalog.list_all().await {
        Ok(entries) => dto::data(&entries),
        Err(err) => errors::respond(&err),
    }
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match common::parse_id::<ServiceId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.catalog.get(id).await {
        Ok(entry) => dto::data(&entry),
        Err(err) => errors::respond(&err),
    }
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ServiceInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };

    match services.catalog.create(&input).await {
        Ok(entry) => dto::created(&entry),
        Err(err) => errors::respond(&err),
    }
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ServiceInput>, JsonRejection>,
) -> Response {
    let id = match common::parse_id::<ServiceId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };

    match services.catalog.update(id, &input).await {
        Ok(entry) => dto::data(&entry),
        Err(err) => errors::respond(&err),
    }
}

async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match common::parse_id::<ServiceId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.catalog.delete(id).await {
        Ok(()) => dto::no_content(),
        Err(err) => errors::respond(&err),
    }
}
