//! Blog entries and the validated drafts used to create or replace them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Largest like count a blog may hold.
pub const LIKES_MAX: u32 = i32::MAX.unsigned_abs();

/// Stable blog identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(Uuid);

impl BlogId {
    /// Parse a [`BlogId`] from a path segment or stored value.
    ///
    /// # Errors
    /// Returns [`BlogValidationError::InvalidId`] when `id` is not a UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BlogValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| BlogValidationError::InvalidId)
    }

    /// Generate a new random [`BlogId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BlogId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Blog field names used in validation details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogField {
    /// `title`
    Title,
    /// `url`
    Url,
    /// `likes`
    Likes,
}

impl BlogField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Url => "url",
            Self::Likes => "likes",
        }
    }
}

/// Validation errors raised while building a [`BlogDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogValidationError {
    /// The identifier is not a UUID.
    #[error("blog id must be a valid UUID")]
    InvalidId,
    /// A required text field was absent or blank.
    #[error("title and url are required")]
    MissingField(BlogField),
    /// `likes` was below zero.
    #[error("likes must not be negative")]
    NegativeLikes,
    /// `likes` exceeded [`LIKES_MAX`].
    #[error("likes must be at most {max}")]
    LikesOutOfRange {
        /// Accepted maximum.
        max: u32,
    },
}

/// Validated blog content without identity or ownership.
///
/// ## Invariants
/// - `title` and `url` are non-empty once trimmed.
/// - `likes` lies within `0..=LIKES_MAX` and defaults to zero.
///
/// # Examples
/// ```
/// use bloglist_backend::domain::BlogDraft;
///
/// let draft = BlogDraft::new(
///     Some("Go To Statement Considered Harmful".to_owned()),
///     Some("Edsger W. Dijkstra".to_owned()),
///     Some("https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf".to_owned()),
///     None,
/// )
/// .expect("title and url are present");
/// assert_eq!(draft.likes(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    title: String,
    author: String,
    url: String,
    likes: u32,
}

impl BlogDraft {
    /// Validate raw request fields.
    ///
    /// A missing author becomes the empty string.
    ///
    /// # Errors
    /// Returns a [`BlogValidationError`] naming the first invalid field.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> Result<Self, BlogValidationError> {
        let title = required(title, BlogField::Title)?;
        let url = required(url, BlogField::Url)?;
        let likes = match likes {
            None => 0,
            Some(value) if value < 0 => return Err(BlogValidationError::NegativeLikes),
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|likes| *likes <= LIKES_MAX)
                .ok_or(BlogValidationError::LikesOutOfRange { max: LIKES_MAX })?,
        };
        Ok(Self {
            title,
            author: author.unwrap_or_default(),
            url,
            likes,
        })
    }

    /// Blog title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name; may be empty.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Link to the post.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Like count.
    #[must_use]
    pub fn likes(&self) -> u32 {
        self.likes
    }
}

fn required(value: Option<String>, field: BlogField) -> Result<String, BlogValidationError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or(BlogValidationError::MissingField(field))
}

/// Persisted blog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id: BlogId,
    draft: BlogDraft,
    owner: Option<UserId>,
}

impl Blog {
    /// Combine an identifier, validated content and an optional owner.
    #[must_use]
    pub fn new(id: BlogId, draft: BlogDraft, owner: Option<UserId>) -> Self {
        Self { id, draft, owner }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> BlogId {
        self.id
    }

    /// Blog title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.draft.title()
    }

    /// Author name; may be empty.
    #[must_use]
    pub fn author(&self) -> &str {
        self.draft.author()
    }

    /// Link to the post.
    #[must_use]
    pub fn url(&self) -> &str {
        self.draft.url()
    }

    /// Like count.
    #[must_use]
    pub fn likes(&self) -> u32 {
        self.draft.likes()
    }

    /// Validated content.
    #[must_use]
    pub fn draft(&self) -> &BlogDraft {
        &self.draft
    }

    /// User who created the blog, if recorded.
    #[must_use]
    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// Whether `user` may update or delete this blog.
    ///
    /// Unowned blogs are editable by any authenticated user.
    #[must_use]
    pub fn is_editable_by(&self, user: UserId) -> bool {
        self.owner.is_none_or(|owner| owner == user)
    }

    /// Swap the content while keeping identity and ownership.
    #[must_use]
    pub fn replaced_with(self, draft: BlogDraft) -> Self {
        Self { draft, ..self }
    }
}

#[cfg(test)]
mod tests {
    //! Draft validation and ownership rules.
    use super::*;
    use rstest::{fixture, rstest};

    fn text(value: &str) -> Option<String> {
        Some(value.to_owned())
    }

    #[fixture]
    fn draft() -> BlogDraft {
        BlogDraft::new(
            text("React patterns"),
            text("Michael Chan"),
            text("https://reactpatterns.com/"),
            Some(7),
        )
        .expect("valid draft")
    }

    #[rstest]
    #[case(None, text("https://a.example"), BlogField::Title)]
    #[case(text("   "), text("https://a.example"), BlogField::Title)]
    #[case(text("Title"), None, BlogField::Url)]
    #[case(text("Title"), text(""), BlogField::Url)]
    fn missing_required_fields_are_reported(
        #[case] title: Option<String>,
        #[case] url: Option<String>,
        #[case] field: BlogField,
    ) {
        let err = BlogDraft::new(title, None, url, None).expect_err("draft must fail");
        assert_eq!(err, BlogValidationError::MissingField(field));
        assert_eq!(err.to_string(), "title and url are required");
    }

    #[rstest]
    fn likes_default_to_zero_and_author_to_empty() {
        let draft = BlogDraft::new(text("t"), None, text("u"), None).expect("valid draft");
        assert_eq!(draft.likes(), 0);
        assert_eq!(draft.author(), "");
    }

    #[rstest]
    #[case(-1, BlogValidationError::NegativeLikes)]
    #[case(i64::from(i32::MAX) + 1, BlogValidationError::LikesOutOfRange { max: LIKES_MAX })]
    fn likes_outside_range_are_rejected(#[case] likes: i64, #[case] expected: BlogValidationError) {
        let err = BlogDraft::new(text("t"), None, text("u"), Some(likes)).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn blog_id_rejects_malformed_input() {
        assert_eq!(
            BlogId::new("5a3d5da59070081a82a3445"),
            Err(BlogValidationError::InvalidId)
        );
    }

    #[rstest]
    fn unowned_blogs_are_editable_by_anyone(draft: BlogDraft) {
        let blog = Blog::new(BlogId::random(), draft, None);
        assert!(blog.is_editable_by(UserId::random()));
    }

    #[rstest]
    fn owned_blogs_are_editable_only_by_owner(draft: BlogDraft) {
        let owner = UserId::random();
        let blog = Blog::new(BlogId::random(), draft, Some(owner));
        assert!(blog.is_editable_by(owner));
        assert!(!blog.is_editable_by(UserId::random()));
    }

    #[rstest]
    fn replacement_keeps_identity_and_owner(draft: BlogDraft) {
        let owner = UserId::random();
        let blog = Blog::new(BlogId::random(), draft, Some(owner));
        let id = blog.id();
        let updated = blog.replaced_with(
            BlogDraft::new(text("New"), None, text("https://new.example"), Some(1)).expect("valid"),
        );
        assert_eq!(updated.id(), id);
        assert_eq!(updated.owner(), Some(owner));
        assert_eq!(updated.title(), "New");
        assert_eq!(updated.likes(), 1);
    }
}
