//! Request ID middleware.
//!
//! # Responsibilities
//! - Reuse an inbound `x-request-id` header or generate a UUID v4
//! - Expose the ID to handlers as a request extension
//! - Echo the ID on the response
//!
//! # Design Decisions
//! - Registered like any other middleware, so routes registered before it
//!   is added are not stamped

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use uuid::Uuid;

use crate::http::handler::BoxHandler;
use crate::http::middleware::from_fn;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation ID attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Access the request ID from a request.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions().get::<RequestId>().map(|id| id.0.as_str())
    }
}

/// Middleware stamping every request and response with an `x-request-id`.
pub fn request_id() -> impl Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static {
    from_fn(|mut req: Request<Body>, next: BoxHandler| async move {
        let id = req
            .headers()
            .get(&X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let header = HeaderValue::from_str(&id).ok();
        if let Some(value) = &header {
            req.headers_mut().insert(X_REQUEST_ID, value.clone());
        }
        req.extensions_mut().insert(RequestId(id));

        let mut res = next.call(req).await;
        if let Some(value) = header {
            res.headers_mut().insert(X_REQUEST_ID, value);
        }
        res
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn echo_id() -> BoxHandler {
        BoxHandler::new(|req: Request<Body>| async move {
            let id = req.request_id().unwrap_or_default().to_string();
            (StatusCode::OK, id)
        })
    }

    #[tokio::test]
    async fn test_generates_id() {
        let handler = request_id()(echo_id());
        let res = handler.call(Request::new(Body::empty())).await;

        let id = res.headers().get(&X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_preserves_inbound_id() {
        let handler = request_id()(echo_id());
        let req = Request::builder()
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let res = handler.call(req).await;
        assert_eq!(res.headers().get(&X_REQUEST_ID).unwrap(), "abc-123");

        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"abc-123");
    }
}
