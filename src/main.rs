use stock::app::{build_router, AppState};
use stock::config::load_config;
use stock::infrastructure::logger::Logger;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("启动库存管理 API 服务器...");

    let state = AppState::from_config(&config.database).await?;
    let app = build_router(state, &config.http);

    let listener = TcpListener::bind(config.http.socket_address()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    for resource in ["customer", "product", "category"] {
        info!("   GET|POST            /api/{}", resource);
        info!("   GET|PUT|DELETE      /api/{}/:id", resource);
    }
    info!("   GET                 /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", err);
        std::future::pending::<()>().await;
    }
}
