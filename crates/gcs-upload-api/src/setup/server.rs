//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use gcs_upload_core::Config;
use gcs_upload_storage::Storage;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Start the server with graceful shutdown
///
/// Returns once the server has drained after SIGINT/SIGTERM, or once the
/// shutdown deadline has passed; the storage handle is closed last.
pub async fn start_server(config: &Config, app: Router, storage: Arc<dyn Storage>) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        port = config.server_port(),
        backend = %config.storage_backend(),
        bucket = config.bucket_name().unwrap_or("-"),
        project_id = config.project_id().unwrap_or("-"),
        request_timeout_seconds = config.request_timeout_seconds(),
        "Server ready and accepting connections"
    );

    let drain = Duration::from_secs(config.shutdown_timeout_seconds());
    serve_until(listener, app, shutdown_signal(), drain).await?;

    if let Err(e) = storage.close().await {
        tracing::warn!(error = %e, "Failed to close storage backend");
    }

    tracing::info!("Server exited");
    Ok(())
}

/// Serve `app` until `shutdown` resolves, then give in-flight requests
/// `drain` to finish.
///
/// Returns `false` if the deadline passed with requests still running;
/// those requests are abandoned.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain: Duration,
) -> Result<bool>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        biased;
        result = &mut server => {
            result?;
            return Ok(true);
        }
        _ = signalled_rx => {}
    }

    match tokio::time::timeout(drain, &mut server).await {
        Ok(result) => {
            result?;
            Ok(true)
        }
        Err(_) => {
            tracing::warn!(
                drain_seconds = drain.as_secs_f64(),
                "Shutdown deadline passed with requests still in flight"
            );
            Ok(false)
        }
    }
}

/// Signal handler for graceful shutdown
///
/// # Panics
/// - Panics if the Ctrl+C handler cannot be installed
/// - On Unix systems, panics if the SIGTERM handler cannot be installed
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::Notify;

    async fn local_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").await.unwrap()
    }

    #[tokio::test]
    async fn test_idle_server_drains_immediately() {
        let listener = local_listener().await;
        let app = Router::new().route("/", get(|| async { "ok" }));

        let drained = serve_until(listener, app, async {}, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(drained);
    }

    #[tokio::test]
    async fn test_drain_deadline_abandons_stalled_request() {
        let entered = Arc::new(Notify::new());
        let app = Router::new().route(
            "/slow",
            get({
                let entered = entered.clone();
                move || {
                    let entered = entered.clone();
                    async move {
                        entered.notify_one();
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        "done"
                    }
                }
            }),
        );

        let listener = local_listener().await;
        let addr = listener.local_addr().unwrap();

        // Keeps the connection open until the server closes it.
        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /slow HTTP/1.1\r\nhost: localhost\r\n\r\n")
                .await
                .unwrap();
            let mut buf = Vec::new();
            let _ = stream.read_to_end(&mut buf).await;
        });

        let started = Instant::now();
        let drained = serve_until(
            listener,
            app,
            async move { entered.notified().await },
            Duration::from_millis(200),
        )
        .await
        .unwrap();

        assert!(!drained);
        assert!(started.elapsed() < Duration::from_secs(10));
        client.abort();
    }
}
