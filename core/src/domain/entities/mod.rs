//! Domain entities.

pub mod token;
pub mod user;

pub use token::{AuthTokens, Claims, IssuedToken, TokenKind, TokenRecord};
pub use user::{NewUser, User, UserProfile, UserRole};
