//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! business rules. Row structs and table definitions stay private to this
//! module. Connections come from a `bb8` pool through `diesel-async`.
//!
//! ```ignore
//! use bloglist_backend::outbound::persistence::{DbPool, DieselBlogRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bloglist")).await?;
//! let blogs = DieselBlogRepository::new(pool);
//! ```

mod diesel_blog_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_blog_repository::DieselBlogRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
