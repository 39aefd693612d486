mod announcements;
mod auth;
mod blogs;
mod contacts;
mod db;
mod error;
mod news;
mod products;
mod query;
mod validation;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use announcements::AnnouncementRepository;
use auth::{AuthService, TokenService, UserRepository};
use blogs::BlogRepository;
use contacts::ContactRepository;
use news::NewsRepository;
use products::{Product, CreateProduct, ProductRepository, UpdateProduct};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        products::handlers::list_products_handler,
        products::handlers::get_product_handler,
        products::handlers::create_product_handler,
        products::handlers::update_product_handler,
        products::handlers::delete_product_handler,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct)
    ),
    tags(
        (name = "products", description = "Product catalog management endpoints")
    ),
    info(
        title = "Stable API",
        version = "1.0.0",
        description = "RESTful backend for the equestrian store catalog and content pages",
        contact(
            name = "API Support",
            email = "support@stable-api.example"
        )
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: Arc<AuthService>,
    pub products: ProductRepository,
    pub blogs: BlogRepository,
    pub announcements: AnnouncementRepository,
    pub news: NewsRepository,
    pub contacts: ContactRepository,
}

impl AppState {
    fn new(db: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db.clone());
        let auth = Arc::new(AuthService::new(user_repo, TokenService::new(jwt_secret)));

        Self {
            products: ProductRepository::new(db.clone()),
            blogs: BlogRepository::new(db.clone()),
            announcements: AnnouncementRepository::new(db.clone()),
            news: NewsRepository::new(db.clone()),
            contacts: ContactRepository::new(db.clone()),
            auth,
            db,
        }
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(db: PgPool, jwt_secret: String) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState::new(db, jwt_secret);

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Authentication
        .route("/api/auth/register", post(auth::handlers::register_handler))
        .route("/api/auth/verify", post(auth::handlers::verify_email_handler))
        .route("/api/auth/login", post(auth::handlers::login_handler))
        .route("/api/auth/me", get(auth::handlers::me_handler))
        // Product catalog
        .route("/api/products", get(products::list_products_handler))
        .route("/api/products", post(products::create_product_handler))
        .route("/api/products/:id", get(products::get_product_handler))
        .route("/api/products/:id", put(products::update_product_handler))
        .route("/api/products/:id", delete(products::delete_product_handler))
        // Blog posts
        .route("/api/blogs", get(blogs::list_blogs_handler))
        .route("/api/blogs", post(blogs::create_blog_handler))
        .route("/api/blogs/:id", get(blogs::get_blog_handler))
        .route("/api/blogs/:id", put(blogs::update_blog_handler))
        .route("/api/blogs/:id", delete(blogs::delete_blog_handler))
        // Announcements
        .route("/api/announcements", get(announcements::list_announcements_handler))
        .route("/api/announcements", post(announcements::create_announcement_handler))
        .route("/api/announcements/:id", put(announcements::update_announcement_handler))
        .route("/api/announcements/:id", delete(announcements::delete_announcement_handler))
        // News
        .route("/api/news", get(news::list_news_handler))
        .route("/api/news", post(news::create_news_handler))
        .route("/api/news/:id", get(news::get_news_handler))
        .route("/api/news/:id", put(news::update_news_handler))
        .route("/api/news/:id", delete(news::delete_news_handler))
        // Contact form and triage
        .route("/api/contacts", post(contacts::create_contact_handler))
        .route("/api/contacts", get(contacts::list_contacts_handler))
        .route("/api/contacts/:id", get(contacts::get_contact_handler))
        .route("/api/contacts/:id/status", put(contacts::update_contact_status_handler))
        .route("/api/contacts/:id", delete(contacts::delete_contact_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Stable API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool, jwt_secret);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Stable API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
