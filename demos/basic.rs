//! Request logging in front of a few CRUD-style endpoints.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/health
//!   curl http://localhost:3000/users/42
//!   curl -X POST http://localhost:3000/users -H 'x-forwarded-for: 10.0.0.5'
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'
//!   curl -X DELETE http://localhost:3000/users/42
//!   curl http://localhost:3000/nowhere

use hooklog::{HttpError, Logger, Method, Request, Response, Router, Server, StatusCode};

#[tokio::main]
async fn main() -> Result<(), hooklog::Error> {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .with(Logger::new())
        .on(Method::GET,    "/health",     health)
        .on(Method::GET,    "/users/{id}", get_user)
        .on(Method::POST,   "/users",      create_user)
        .on(Method::DELETE, "/users/{id}", delete_user);

    Server::bind("0.0.0.0:3000")?.serve(app).await
}

async fn health(_req: Request) -> &'static str {
    "ok"
}

async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#))
}

// Empty body → logged as `✗ POST /users Error 400 validation failed`.
async fn create_user(req: Request) -> Result<Response, HttpError> {
    if req.body().is_empty() {
        return Err(HttpError::with_status(StatusCode::BAD_REQUEST, "validation failed"));
    }

    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#))
}

async fn delete_user(_req: Request) -> StatusCode {
    StatusCode::NO_CONTENT
}
