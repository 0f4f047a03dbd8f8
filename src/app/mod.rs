//! 应用层：资源模型与路由装配

pub mod category;
pub mod customer;
pub mod product;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, response::Json, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::{DatabaseConfig, HttpConfig, StoreBackend};
use crate::core::{
    handler, middleware::request_logging_middleware, response::HealthResponse, ResourceService,
};
use crate::infrastructure::{MemoryStore, StoreError};
use category::Category;
use customer::Customer;
use product::Product;

#[derive(Clone)]
pub struct AppState {
    pub customers: ResourceService<Customer>,
    pub products: ResourceService<Product>,
    pub categories: ResourceService<Category>,
    /// 存储后端名称，用于健康检查
    pub store: &'static str,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self {
            customers: ResourceService::new(Arc::new(MemoryStore::new())),
            products: ResourceService::new(Arc::new(MemoryStore::new())),
            categories: ResourceService::new(Arc::new(MemoryStore::new())),
            store: "memory",
        }
    }

    #[cfg(feature = "database")]
    pub async fn postgres(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let manager = crate::infrastructure::database::DatabaseManager::new(config).await?;
        Ok(Self {
            customers: ResourceService::new(Arc::new(manager.collection::<Customer>().await?)),
            products: ResourceService::new(Arc::new(manager.collection::<Product>().await?)),
            categories: ResourceService::new(Arc::new(manager.collection::<Category>().await?)),
            store: "postgres",
        })
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let state = match config.backend {
            StoreBackend::Memory => Self::in_memory(),
            #[cfg(feature = "database")]
            StoreBackend::Postgres => Self::postgres(config).await?,
            #[cfg(not(feature = "database"))]
            StoreBackend::Postgres => {
                return Err(StoreError::Backend(
                    "postgres 存储需要启用 database 特性".to_string(),
                ))
            }
        };
        info!("使用 {} 存储", state.store);
        Ok(state)
    }
}

pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let store = state.store;

    Router::new()
        .route(
            "/health",
            get(move || async move { Json(HealthResponse::healthy(store)) }),
        )
        .merge(handler::routes(state.customers))
        .merge(handler::routes(state.products))
        .merge(handler::routes(state.categories))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
