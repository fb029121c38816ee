//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: in-process repositories for development and tests.
//! - **security**: argon2 password hashing and HS256 bearer tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
