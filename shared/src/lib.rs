//! # Shared Module
//!
//! Configuration types shared across the taskhub backend crates.
//! Kept free of business logic so both the core and infrastructure
//! layers can depend on it without cycles.

pub mod config;

pub use config::{AppConfig, DatabaseConfig, EmailConfig, Environment, JwtConfig};
