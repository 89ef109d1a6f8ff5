//! PostgreSQL implementation of the post repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{AuthorRef, CategoryRef, NewPost, Post, PostStatus};
use crate::domain::repositories::{PostFilter, PostRepository};
use crate::error::AppError;

/// Columns selected for a post, with its author and optional category.
/// Expects the post relation aliased as `p`.
const POST_COLUMNS: &str = r#"
    p.id, p.title, p.slug, p.body, p.status, p.published_at, p.views,
    p.created_at, p.updated_at,
    a.id AS author_id, a.display_name AS author_name,
    c.id AS category_id, c.name AS category_name
"#;

const POST_JOINS: &str = r#"
    JOIN authors a ON a.id = p.author_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Predicates for the published listing; binds `$1`..`$7`.
const PUBLISHED_FILTER: &str = r#"
    p.status = 'published'
    AND ($1::text IS NULL OR p.title ILIKE $1 OR p.body ILIKE $1)
    AND ($2::bigint IS NULL OR p.category_id = $2)
    AND ($3::bigint IS NULL OR p.author_id = $3)
    AND ($4::timestamptz IS NULL OR p.published_at >= $4)
    AND ($5::timestamptz IS NULL OR p.published_at < $5)
    AND ($6::timestamptz IS NULL OR p.created_at >= $6)
    AND ($7::timestamptz IS NULL OR p.created_at < $7)
"#;

const POST_ORDER: &str = "p.published_at DESC NULLS LAST, p.created_at DESC, p.id DESC";

pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    status: String,
    published_at: Option<DateTime<Utc>>,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: i64,
    author_name: String,
    category_id: Option<i64>,
    category_name: Option<String>,
}

impl TryFrom<PostRow> for Post {
    type Error = AppError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<PostStatus>().map_err(|reason| {
            AppError::internal("Corrupt post row", json!({ "id": row.id, "reason": reason }))
        })?;

        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };

        Ok(Post {
            id: row.id,
            title: row.title,
            slug: row.slug,
            body: row.body,
            author: AuthorRef {
                id: row.author_id,
                display_name: row.author_name,
            },
            category,
            status,
            published_at: row.published_at,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// [`PostFilter`] lowered to SQL bind values.
struct FilterBinds {
    search: Option<String>,
    category_id: Option<i64>,
    author_id: Option<i64>,
    published_from: Option<DateTime<Utc>>,
    published_until: Option<DateTime<Utc>>,
    created_from: Option<DateTime<Utc>>,
    created_until: Option<DateTime<Utc>>,
}

impl FilterBinds {
    fn new(filter: &PostFilter) -> Self {
        Self {
            search: filter.search.as_deref().map(like_pattern),
            category_id: filter.category_id,
            author_id: filter.author_id,
            published_from: filter.published_after.map(start_of_day),
            published_until: filter.published_before.and_then(end_of_day),
            created_from: filter.created_after.map(start_of_day),
            created_until: filter.created_before.and_then(end_of_day),
        }
    }

    fn bind<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        query
            .bind(self.search)
            .bind(self.category_id)
            .bind(self.author_id)
            .bind(self.published_from)
            .bind(self.published_until)
            .bind(self.created_from)
            .bind(self.created_until)
    }
}

/// `%term%` with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Exclusive upper bound making `date` inclusive.
fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.succ_opt().map(start_of_day)
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list_published(
        &self,
        filter: &PostFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p {POST_JOINS} WHERE {PUBLISHED_FILTER} \
             ORDER BY {POST_ORDER} LIMIT $8 OFFSET $9"
        );

        let rows = FilterBinds::new(filter)
            .bind(sqlx::query_as::<_, PostRow>(&sql))
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn count_published(&self, filter: &PostFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM posts p WHERE {PUBLISHED_FILTER}");

        let (count,): (i64,) = FilterBinds::new(filter)
            .bind(sqlx::query_as(&sql))
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_published_and_increment_views(
        &self,
        id: i64,
    ) -> Result<Option<Post>, AppError> {
        let sql = format!(
            "WITH p AS ( \
                 UPDATE posts SET views = views + 1 \
                 WHERE id = $1 AND status = 'published' \
                 RETURNING * \
             ) \
             SELECT {POST_COLUMNS} FROM p {POST_JOINS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Post::try_from).transpose()
    }

    async fn create(&self, new: NewPost) -> Result<Post, AppError> {
        let sql = format!(
            "WITH p AS ( \
                 INSERT INTO posts \
                     (title, slug, body, author_id, category_id, status, published_at, views) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 RETURNING * \
             ) \
             SELECT {POST_COLUMNS} FROM p {POST_JOINS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&new.title)
            .bind(new.slug.as_deref().unwrap_or_default())
            .bind(&new.body)
            .bind(new.author_id)
            .bind(new.category_id)
            .bind(new.status.as_str())
            .bind(new.published_at)
            .bind(new.views)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn count_by_status(&self, status: PostStatus) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
