//! In-process repositories used when no database is configured and by tests.
//!
//! State sits behind `std::sync::RwLock`; guards never cross an `.await`.

mod blog_repository;
mod user_repository;

pub use blog_repository::InMemoryBlogRepository;
pub use user_repository::InMemoryUserRepository;

fn poisoned(store: &str) -> String {
    format!("{store} store lock poisoned")
}
