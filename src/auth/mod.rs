// Authentication module
// JWT-based authentication with OTP email verification and role/permission
// authorization

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod otp;
pub mod password;
pub mod permissions;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, me_handler, register_handler, verify_email_handler};
pub use middleware::CurrentUser;
pub use models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse, VerifyEmailRequest};
pub use permissions::{has_permission, Action, Permission, Resource};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenService;
