pub mod guard;
pub mod password;
pub mod token;

pub use guard::{require_auth, CurrentUser};
pub use password::PasswordHasher;
pub use token::TokenKeys;
