use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use dotenvy::dotenv;
use http::Method;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use pawsconnect::database::schema;
use pawsconnect::web::middleware::auth as auth_middleware;
use pawsconnect::web::routes::{feed, friendships, pet_transfers, pets, posts, search, users};

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Verbind met de Database
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL moet in .env staan");
    println!("Verbinden met database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Kan niet verbinden met DB");

    schema::ensure_schema(&pool)
        .await
        .expect("Kan schema niet aanmaken");

    // 3. Protected routes onder één middleware layer
    let protected_routes = Router::new()
        .route(
            "/api/users/:user_id",
            get(users::get_user_handler).put(users::update_user_handler),
        )
        .route("/api/users/:user_id/pets", get(users::user_pets_handler))
        .route("/api/users/:user_id/posts", get(users::user_posts_handler))
        .route("/api/search/users", get(search::search_users_handler))
        .route("/api/search/pets", get(search::search_pets_handler))
        .route("/api/feed", get(feed::feed_handler))
        .route("/api/posts", post(posts::create_post_handler))
        .route(
            "/api/posts/:post_id",
            get(posts::get_post_handler).delete(posts::delete_post_handler),
        )
        .route(
            "/api/posts/:post_id/comments",
            get(posts::list_comments_handler).post(posts::add_comment_handler),
        )
        .route(
            "/api/posts/:post_id/like",
            put(posts::like_post_handler).delete(posts::unlike_post_handler),
        )
        .route("/api/pets", post(pets::create_pet_handler))
        .route(
            "/api/pets/:pet_id",
            get(pets::get_pet_handler)
                .put(pets::update_pet_handler)
                .delete(pets::delete_pet_handler),
        )
        .route(
            "/api/pets/:pet_id/transfer",
            post(pets::request_transfer_handler),
        )
        .route(
            "/api/friendships",
            post(friendships::request_friendship_handler)
                .get(friendships::list_requests_handler),
        )
        .route(
            "/api/friendships/:friendship_id/accept",
            post(friendships::accept_friendship_handler),
        )
        .route(
            "/api/friendships/:friendship_id/reject",
            post(friendships::reject_friendship_handler),
        )
        .route(
            "/api/friendships/:friendship_id",
            axum::routing::delete(friendships::remove_friendship_handler),
        )
        .route("/api/friends", get(friendships::list_friends_handler))
        .route(
            "/api/pet-transfers",
            get(pet_transfers::list_transfers_handler),
        )
        .route(
            "/api/pet-transfers/:transfer_id/approve",
            post(pet_transfers::approve_transfer_handler),
        )
        .route(
            "/api/pet-transfers/:transfer_id/reject",
            post(pet_transfers::reject_transfer_handler),
        )
        .route(
            "/api/pet-transfers/:transfer_id/cancel",
            post(pet_transfers::cancel_transfer_handler),
        )
        .layer(middleware::from_fn(auth_middleware::require_auth));

    // CORS voor de SPA front end
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // 4. Bouw de hele applicatie
    let app = Router::new()
        // Public routes
        .route("/api/users", post(users::register_handler))
        // Protected routes
        .merge(protected_routes)
        // Layers
        .layer(cors)
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool);

    // 5. Start de server (met fallback poort)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Kan host/port niet parsen");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Kon niet binden op {}: {}. Probeer fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Kan fallback niet parsen");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Kan niet binden op fallback poort")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server draait op http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
