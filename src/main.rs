use std::sync::Arc;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt().with_ansi(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    tracing::info!("Starting");

    runtime.block_on(async move {
        let config = match std::env::args().nth(1) {
            Some(path) => {
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Reading config {path}"))?;
                eshop_list::Config::from_yaml(&content)
                    .with_context(|| format!("Parsing config {path}"))?
            }
            None => eshop_list::Config::default(),
        };
        tracing::info!("Config {:?}", config);

        let registry = prometheus::Registry::new();
        let metrics = eshop_list::Metrics::new(&registry)?;

        let client = eshop_list::eshop::Client::new(config.upstream.clone())?;
        let aggregator = eshop_list::Aggregator::new(Arc::new(client), metrics)
            .with_max_pages(config.max_pages);

        let app = eshop_list::server::router(eshop_list::server::AppState {
            aggregator,
            registry,
        });

        tracing::info!("Listening on {}", config.listen);

        axum::Server::try_bind(&config.listen)?
            .serve(app.into_make_service())
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Waiting for Ctrl-C {:?}", e);
                    std::future::pending::<()>().await;
                }
                tracing::info!("Shutting down");
            })
            .await?;

        Ok(())
    })
}
