//! # Blogly Core
//!
//! The domain layer of Blogly: users, posts, tags and the post/tag join.
//! This crate contains pure model types and repository ports with zero infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
