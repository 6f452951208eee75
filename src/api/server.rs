use super::router::router;
use super::state::AppState;
use crate::errors::ServiceError;

/// Bind `bind` and serve until Ctrl-C.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind: &str, state: AppState) -> Result<(), ServiceError> {
    let listener = tokio::net::TcpListener::bind(bind).await.inspect_err(|e| {
        log::error!("cannot bind {bind}: {e}");
    })?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn occupied_address_is_an_io_error() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let state = AppState::new(Arc::new(MemoryStore::sample().unwrap()));
        let err = serve(&addr, state).await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)), "{err:?}");
    }
}
