//! Default responses for requests no route serves.
//!
//! # Responsibilities
//! - 404 when no route's path matches
//! - 405 when a path matches but the method does not
//! - 204 for automatic OPTIONS handling
//!
//! # Design Decisions
//! - Bodies are the canonical reason phrase only; anything richer belongs
//!   to an application override
//! - The `Allow` header is added by the dispatcher, not here

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;

use crate::http::handler::BoxHandler;

/// 404 with the reason phrase as body.
pub fn not_found() -> BoxHandler {
    BoxHandler::new(|_req: Request<Body>| async { status_text(StatusCode::NOT_FOUND) })
}

/// 405 with the reason phrase as body.
pub fn method_not_allowed() -> BoxHandler {
    BoxHandler::new(|_req: Request<Body>| async {
        status_text(StatusCode::METHOD_NOT_ALLOWED)
    })
}

/// 204, empty body.
pub fn options() -> BoxHandler {
    BoxHandler::new(|_req: Request<Body>| async { StatusCode::NO_CONTENT })
}

fn status_text(status: StatusCode) -> impl IntoResponse {
    (status, status.canonical_reason().unwrap_or_default())
}
