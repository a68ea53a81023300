//! Web server rendering the site on request

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::{CmsClient, PostRepository};
use crate::generator::{Generator, Page, PageStatus};
use crate::Blog;

/// Server state
pub struct ServerState {
    repository: PostRepository,
    generator: Generator,
}

impl ServerState {
    pub fn new(repository: PostRepository, generator: Generator) -> Self {
        Self {
            repository,
            generator,
        }
    }
}

/// Query of the listing page
#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    /// Slug of the post opened in the overlay
    post: Option<String>,
}

/// Start the server
///
/// The repository is activated once; every request renders from the
/// snapshot that cycle produced.
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let client = CmsClient::new(&blog.config.cms)?;
    let repository = PostRepository::new(Arc::new(client));
    repository.activate();

    let state = Arc::new(ServerState::new(repository, Generator::new(&blog.config)?));
    let app = router(state, &blog.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the site router
pub fn router(state: Arc<ServerState>, static_dir: &FsPath) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/:slug", get(post_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    respond(state.generator.home(&state.repository.state()))
}

async fn blog_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<BlogQuery>,
) -> Response {
    let posts = state.repository.state();
    respond(state.generator.blog(&posts, query.post.as_deref()))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let posts = state.repository.state();
    respond(state.generator.post(&posts, &slug))
}

/// Turn a rendered page into a response
fn respond(page: Result<Page>) -> Response {
    match page {
        Ok(page) => {
            let status = match page.status {
                PageStatus::Ok | PageStatus::Loading => StatusCode::OK,
                PageStatus::NotFound => StatusCode::NOT_FOUND,
                PageStatus::Error => StatusCode::BAD_GATEWAY,
            };
            (status, Html(page.html)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
