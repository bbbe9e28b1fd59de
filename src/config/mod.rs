/// Database configuration and connection management
pub mod database;

/// Application configuration loading from config.toml
pub mod app;

/// External web links (Q&A, contact form) from the `[links]` table
pub mod links;
