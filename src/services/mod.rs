pub mod auth;
pub mod subscription;

pub use auth::AuthService;
pub use subscription::SubscriptionService;
