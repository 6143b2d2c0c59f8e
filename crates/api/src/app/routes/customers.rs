use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use velora_core::CustomerId;
use velora_customers::validate::{self, CreateCustomerInput, DecisionInput, UpdateCustomerInput};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/all", get(list_all))
        .route("/pending", get(list_pending))
        .route("/", post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/validate", put(decide))
}

async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.customers.list_all().await {
        Ok(customers) => dto::data(&customers),
        Err(err) => errors::respond(&err),
    }
}

async fn list_pending(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.customers.list_pending().await {
        Ok(customers) => dto::data(&customers),
        Err(err) => errors::respond(&err),
    }
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match common::parse_id::<CustomerId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.customers.get(id).await {
        Ok(customer) => dto::data(&customer),
        Err(err) => errors::respond(&err),
    }
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateCustomerInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };

    match services.customers.create(&input).await {
        Ok(customer) => dto::created(&customer),
        Err(err) => errors::respond(&err),
    }
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateCustomerInput>, JsonRejection>,
) -> Response {
    let id = match common::parse_id::<CustomerId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };

    match services.customers.partial_update(id, &input).await {
        Ok(customer) => dto::data(&customer),
        Err(err) => errors::respond(&err),
    }
}

/// PUT /api/customers/:id/validate — the one-shot approval decision.
async fn decide(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<DecisionInput>, JsonRejection>,
) -> Response {
    let id = match common::parse_id::<CustomerId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(&rejection),
    };
    let decision = match validate::parse_decision(&input) {
        Ok(decision) => decision,
        Err(err) => return errors::respond(&err),
    };

    match services.customers.approve_or_reject(id, decision).await {
        Ok(customer) => dto::DecisionResponse {
            id: customer.id,
            email: customer.email,
            status: customer.status,
            message: "customer status updated",
        }
        .into_response(),
        Err(err) => errors::respond(&err),
    }
}

async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match common::parse_id::<CustomerId>(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.customers.delete(id).await {
        Ok(()) => dto::no_content(),
        Err(err) => errors::respond(&err),
    }
}
