//! Aggregations over lists of blog-like records.
//!
//! Every helper is pure and accepts anything implementing [`LikedEntry`], so
//! the same code runs over persisted [`Blog`] values and lightweight test
//! records. Ties always resolve to the first record (or author group) seen.

use super::Blog;

/// A record with an author and a like count.
pub trait LikedEntry {
    /// Author name used for grouping.
    fn author(&self) -> &str;
    /// Number of likes.
    fn likes(&self) -> u32;
}

impl LikedEntry for Blog {
    fn author(&self) -> &str {
        Blog::author(self)
    }

    fn likes(&self) -> u32 {
        Blog::likes(self)
    }
}

/// Author with the number of blogs attributed to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorBlogCount {
    /// Author name.
    pub author: String,
    /// Number of blogs.
    pub blogs: usize,
}

/// Author with the sum of likes across their blogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLikes {
    /// Author name.
    pub author: String,
    /// Total likes.
    pub likes: u64,
}

/// Sum of likes across `blogs`; zero for an empty slice.
///
/// # Examples
/// ```
/// use bloglist_backend::domain::blog_stats::total_likes;
/// use bloglist_backend::domain::Blog;
///
/// let none: [Blog; 0] = [];
/// assert_eq!(total_likes(&none), 0);
/// ```
pub fn total_likes<B: LikedEntry>(blogs: &[B]) -> u64 {
    blogs.iter().map(|blog| u64::from(blog.likes())).sum()
}

/// Record with the most likes, or `None` for an empty slice.
pub fn favourite_blog<B: LikedEntry>(blogs: &[B]) -> Option<&B> {
    blogs.iter().fold(None, |best: Option<&B>, blog| match best {
        Some(current) if current.likes() >= blog.likes() => Some(current),
        _ => Some(blog),
    })
}

/// Blog counts per author in first-encounter order.
pub fn blog_counts_by_author<B: LikedEntry>(blogs: &[B]) -> Vec<AuthorBlogCount> {
    let mut groups: Vec<AuthorBlogCount> = Vec::new();
    for blog in blogs {
        match groups.iter_mut().find(|group| group.author == blog.author()) {
            Some(group) => group.blogs += 1,
            None => groups.push(AuthorBlogCount {
                author: blog.author().to_owned(),
                blogs: 1,
            }),
        }
    }
    groups
}

/// Like totals per author in first-encounter order.
pub fn likes_by_author<B: LikedEntry>(blogs: &[B]) -> Vec<AuthorLikes> {
    let mut groups: Vec<AuthorLikes> = Vec::new();
    for blog in blogs {
        let likes = u64::from(blog.likes());
        match groups.iter_mut().find(|group| group.author == blog.author()) {
            Some(group) => group.likes += likes,
            None => groups.push(AuthorLikes {
                author: blog.author().to_owned(),
                likes,
            }),
        }
    }
    groups
}

/// Author with the most blogs, or `None` for an empty slice.
pub fn most_blogs<B: LikedEntry>(blogs: &[B]) -> Option<AuthorBlogCount> {
    first_max_by_key(blog_counts_by_author(blogs), |group| {
        u64::try_from(group.blogs).unwrap_or(u64::MAX)
    })
}

/// Author with the highest like total, or `None` for an empty slice.
pub fn most_likes<B: LikedEntry>(blogs: &[B]) -> Option<AuthorLikes> {
    first_max_by_key(likes_by_author(blogs), |group| group.likes)
}

// `Iterator::max_by_key` keeps the last maximum; ties must keep the first.
fn first_max_by_key<T>(items: Vec<T>, key: impl Fn(&T) -> u64) -> Option<T> {
    items.into_iter().fold(None, |best, item| match best {
        Some(current) if key(&current) >= key(&item) => Some(current),
        _ => Some(item),
    })
}
