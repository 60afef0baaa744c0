pub mod root;
pub mod song;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::controllers::SongController;
use crate::middleware::{cors, handle_panic};

pub use root::{health_check_route, not_found_route};
pub use song::song_url_route;

/// Build the complete router: `/health`, `/song` and the JSON 404 fallback.
pub fn create_router(songs: SongController) -> Router {
    let router = Router::new()
        .route("/health", get(health_check_route))
        .route("/song", get(song_url_route))
        .fallback(not_found_route)
        .with_state(songs);
    with_middleware(router)
}

/// Panic guard innermost, CORS around it, tracing outermost.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(cors))
        .layer(TraceLayer::new_for_http())
}
