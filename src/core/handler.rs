//! 通用资源处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

use super::{
    error::CoreError, resource::Resource, response::DeleteResponse, service::ResourceService,
};

pub async fn list<R: Resource>(
    State(service): State<ResourceService<R>>,
) -> Result<Json<Vec<R>>, CoreError> {
    Ok(Json(service.list().await?))
}

pub async fn create<R: Resource>(
    State(service): State<ResourceService<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>, CoreError> {
    let Json(body) = body?;
    Ok(Json(service.create(body).await?))
}

pub async fn get_one<R: Resource>(
    State(service): State<ResourceService<R>>,
    Path(id): Path<String>,
) -> Result<Json<R>, CoreError> {
    Ok(Json(service.get(&id).await?))
}

pub async fn replace<R: Resource>(
    State(service): State<ResourceService<R>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<R>, CoreError> {
    let Json(body) = body?;
    Ok(Json(service.replace(&id, body).await?))
}

pub async fn delete<R: Resource>(
    State(service): State<ResourceService<R>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, CoreError> {
    service.delete(&id).await?;
    Ok(Json(DeleteResponse::new(R::deleted_message())))
}

/// `/api/<collection>` 与 `/api/<collection>/:id` 两条路由
pub fn routes<R: Resource>(service: ResourceService<R>) -> Router {
    let collection = format!("/api/{}", R::COLLECTION);
    let item = format!("{}/:id", collection);

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(get_one::<R>).put(replace::<R>).delete(delete::<R>),
        )
        .with_state(service)
}
