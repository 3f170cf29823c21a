//! Database connection management and SeaORM repositories.

mod base;
mod connections;
pub mod entity;
mod repositories;

pub use base::SqlRepository;
pub use connections::{DatabaseConfig, DatabaseHandle};
pub use repositories::{SqlPostRepository, SqlTagRepository, SqlUserRepository};

#[cfg(test)]
mod tests;
