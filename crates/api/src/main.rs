#[tokio::main]
async fn main() -> anyhow::Result<()> {
    velora_observability::init();

    let app = velora_api::app::build_app().await?;

    let addr = std::env::var("VELORA_ADDR").unwrap_or_else(|_| {
        tracing::warn!("VELORA_ADDR not set; using 0.0.0.0:3000");
        "0.0.0.0:3000".to_string()
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
