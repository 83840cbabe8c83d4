//! Web front-end for contactbook.
//!
//! Server-rendered HTML pages over the contact store. Each request opens the
//! store file, does its work and closes it again; nothing is shared between
//! requests except the store path and the compiled templates.

pub mod handlers;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::storage::ContactStore;
use views::Views;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The contact store.
    pub store: ContactStore,
    /// Compiled page templates.
    pub views: Arc<Views>,
}

impl AppState {
    /// Build the state for a store, compiling the templates.
    ///
    /// # Errors
    ///
    /// Returns a template error if any template fails to compile.
    pub fn new(store: ContactStore) -> Result<Self> {
        Ok(Self {
            store,
            views: Arc::new(Views::new()?),
        })
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/contacts", get(handlers::list_contacts))
        .route(
            "/contacts/new",
            get(handlers::new_contact_form).post(handlers::create_contact),
        )
        .route("/contacts/:id", get(handlers::show_contact))
        .route(
            "/contacts/:id/edit",
            get(handlers::edit_contact_form).post(handlers::update_contact),
        )
        .route("/contacts/:id/delete", post(handlers::delete_contact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the application on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        store = %state.store.path().display(),
        "Listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(ContactStore::new(dir.path().join("c.csv"))).unwrap();
        assert_eq!(state.store.path(), dir.path().join("c.csv"));
    }

    #[test]
    fn test_create_router() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(ContactStore::new(dir.path().join("c.csv"))).unwrap();
        // Overlapping routes would panic here
        let _router = create_router(state);
    }
}
