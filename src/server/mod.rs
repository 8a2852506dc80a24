//! HTTP surface of the registry: the page itself, the add-student form
//! target and a liveness probe.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use tower_http::trace::TraceLayer;

use crate::core::form::StudentForm;
use crate::core::registry::RegistryPage;
use crate::utils::error::{RegistryError, Result};

pub const PAGE_PATH: &str = "/";
pub const ADD_STUDENT_PATH: &str = "/add_student";

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    page: RegistryPage,
}

impl Server {
    pub fn new(addr: SocketAddr, page: RegistryPage) -> Self {
        Self { addr, page }
    }

    /// Creates the router.
    pub fn router(&self) -> Router {
        Router::new()
            .route(PAGE_PATH, get(registry_page))
            .route(ADD_STUDENT_PATH, post(add_student))
            .route("/health", get(health))
            .with_state(self.page.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!(addr = %self.addr, "Student registry listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// A connection failure replaces the whole response with the localized
/// fatal line. Everything else goes through `RegistryError`'s own mapping.
fn failure_response(page: &RegistryPage, err: RegistryError) -> Response {
    match page.fatal_line(&err) {
        Some(line) => {
            tracing::error!("{}", err);
            (
                err.status_code(),
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                line,
            )
                .into_response()
        }
        None => err.into_response(),
    }
}

async fn registry_page(State(page): State<RegistryPage>) -> Response {
    match page.render().await {
        Ok(html) => Html(html).into_response(),
        Err(e) => failure_response(&page, e),
    }
}

async fn add_student(
    State(page): State<RegistryPage>,
    Form(form): Form<StudentForm>,
) -> Response {
    match page.add_student(form).await {
        Ok(_) => Redirect::to(PAGE_PATH).into_response(),
        Err(e) => failure_response(&page, e),
    }
}

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
