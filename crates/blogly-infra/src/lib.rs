//! # Blogly Infrastructure
//!
//! Concrete implementations of the ports defined in `blogly-core`, backed by SeaORM.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL support
//! - `sqlite` (default) - SQLite support, used for local runs and tests

pub mod database;

pub use database::{
    DatabaseConfig, DatabaseHandle, SqlPostRepository, SqlTagRepository, SqlUserRepository,
};
