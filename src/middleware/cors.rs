//! Permissive CORS handling.
//!
//! Pre-flight `OPTIONS` requests are answered here with the allowed headers
//! and methods and an empty body, so they never reach authentication.
//! Every other response gets `Access-Control-Allow-Origin: *`.

use axum::{
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

const ALLOW_ORIGIN: &str = "*";
const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, X-API-Key";
const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

pub async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (
            StatusCode::OK,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
                (ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
                (ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
            ],
        )
            .into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    response
}
