#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown
)]

//! Blog server on SQLite with session cookies.
//!
//! Run with: `cargo run --example blog_server`
//!
//! Environment variables (all optional):
//!   DATABASE_URL=sqlite://quill.db?mode=rwc   (defaults to in-memory)
//!   QUILL_BIND_ADDR=127.0.0.1:8080
//!   QUILL_ADMIN_USER_ID=1
//!   QUILL_SESSION_HOURS=24
//!   QUILL_COOKIE_SECURE=false
//!   QUILL_STORE_TIMEOUT_MS=5000
//!   RUST_LOG=quill=debug,info
//!
//! Try it:
//!   curl -i -c jar -X POST http://localhost:8080/register \
//!     -H "Content-Type: application/json" \
//!     -d '{"username": "alice", "password": "secret1", "confirm_password": "secret1"}'
//!
//!   curl -b jar -X POST http://localhost:8080/api/posts \
//!     -H "Content-Type: application/json" \
//!     -d '{"title": "Hello", "content": "First post", "author_id": 1}'
//!
//!   curl http://localhost:8080/api/posts

use quill::api::axum::{AppState, router};
use quill::events::listeners::LoggingListener;
use quill::{BlogConfig, register_event_listeners, sqlite};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quill=info,info")),
        )
        .init();

    register_event_listeners(|registry| {
        registry.listen(LoggingListener::new());
    });

    let config = BlogConfig::from_env().expect("Invalid configuration");

    let pool = sqlite::connect(&config.database_url)
        .await
        .expect("Failed to open database");
    sqlite::migrations::run(&pool)
        .await
        .expect("Failed to run migrations");

    let (users, sessions, posts, registration) = sqlite::create_repositories(pool);
    let bind_addr = config.bind_addr.clone();
    let app = router(AppState::new(users, posts, sessions, registration, config));

    println!("Starting blog server on http://{bind_addr}");
    println!("Endpoints:");
    println!("  POST /register              - Create account (sets session cookie)");
    println!("  POST /login                 - Login (sets session cookie)");
    println!("  POST /logout                - Logout (clears session cookie)");
    println!("  GET  /api/current-user      - Current identity");
    println!("  GET  /api/users/{{id}}        - User profile (admin or self)");
    println!("  GET  /api/users/{{id}}/posts  - Posts by user");
    println!("  GET  /api/posts             - All posts");
    println!("  GET  /api/posts/{{id}}        - One post");
    println!("  POST /api/posts             - Create post as yourself");

    let listener = TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
