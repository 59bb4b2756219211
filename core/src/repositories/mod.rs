//! Repository traits abstracting persistence from the domain layer.

pub mod token;
pub mod user;

pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use token::InMemoryTokenRepository;
#[cfg(test)]
pub use user::InMemoryUserRepository;
