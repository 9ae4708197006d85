pub mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use color_eyre::Result;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::TaskService;

pub struct AppState {
    pub service: TaskService,
}

/// Assemble the application router. `latency` adds a fixed artificial
/// delay to every response, for exercising loading states during UI
/// development; it sits outside the endpoint contract entirely.
pub fn router(state: Arc<AppState>, latency: Option<Duration>) -> Router {
    let mut router = Router::new()
        .nest("/tasks", tasks::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    if let Some(delay) = latency {
        router = router.layer(middleware::from_fn(move |req: Request, next: Next| async move {
            tokio::time::sleep(delay).await;
            next.run(req).await
        }));
    }

    router
}

pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
