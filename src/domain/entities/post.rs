//! Post entity and its publication status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters kept in [`Post::excerpt`].
pub const EXCERPT_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("Unknown post status: {}", other)),
        }
    }
}

/// Author fields embedded in post responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: i64,
    pub display_name: String,
}

/// Category fields embedded in post responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: AuthorRef,
    pub category: Option<CategoryRef>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// First [`EXCERPT_CHARS`] characters of the body, with `...` appended
    /// when the body was cut.
    pub fn excerpt(&self) -> String {
        excerpt(&self.body)
    }
}

pub(crate) fn excerpt(body: &str) -> String {
    match body.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Input data for creating a post.
///
/// `slug: None` derives the slug from the title. Call
/// [`NewPost::apply_defaults`] before persisting.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
}

impl NewPost {
    pub fn draft(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            slug: None,
            body: body.into(),
            author_id,
            category_id: None,
            status: PostStatus::Draft,
            published_at: None,
            views: 0,
        }
    }

    /// A published post without an explicit `published_at` is published `now`.
    /// Drafts keep whatever was given, normally `None`.
    pub fn apply_defaults(&mut self, now: DateTime<Utc>) {
        if self.status == PostStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_round_trip_through_str() {
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!(PostStatus::Published.to_string(), "published");
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_published_without_date_gets_now() {
        let now = Utc::now();
        let mut post = NewPost::draft("Hello", "Body", 1);
        post.status = PostStatus::Published;

        post.apply_defaults(now);

        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn test_published_keeps_explicit_date() {
        let earlier = Utc::now() - Duration::days(3);
        let mut post = NewPost::draft("Hello", "Body", 1);
        post.status = PostStatus::Published;
        post.published_at = Some(earlier);

        post.apply_defaults(Utc::now());

        assert_eq!(post.published_at, Some(earlier));
    }

    #[test]
    fn test_draft_stays_unpublished() {
        let mut post = NewPost::draft("Hello", "Body", 1);
        post.apply_defaults(Utc::now());
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_excerpt_short_body_is_unchanged() {
        assert_eq!(excerpt("short"), "short");
        assert_eq!(excerpt(&"a".repeat(150)), "a".repeat(150));
    }

    #[test]
    fn test_excerpt_cuts_on_characters() {
        let body = "é".repeat(151);
        let cut = excerpt(&body);

        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
    }
}
