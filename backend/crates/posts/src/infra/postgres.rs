//! PostgreSQL Repository Implementation
//!
//! Each post is one row. Likes are a uuid array appended through a
//! containment-guarded update; comments are a jsonb array, stored in the
//! same field shape the API exposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::{Comment, FeedPost, LikeEntry, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::PostsResult;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "post_id, author_id, content, image, likes, comments, created_at, updated_at";

/// Feed query: author display data joined in; a LEFT JOIN keeps posts
/// whose author has since been deleted (weak reference semantics).
const FEED_SELECT: &str = r#"
    SELECT p.post_id, p.author_id, p.content, p.image, p.likes, p.comments,
           p.created_at, p.updated_at,
           COALESCE(u.name, '') AS author_name,
           COALESCE(u.profile_picture, '') AS author_profile_picture
    FROM posts p
    LEFT JOIN users u ON u.user_id = p.author_id
"#;

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> PostsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                content,
                image,
                likes,
                comments,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(&post.content)
        .bind(&post.image)
        .bind(like_uuids(post))
        .bind(Json(comment_records(post)))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: PostId) -> PostsResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update(&self, post: &Post) -> PostsResult<()> {
        sqlx::query(
            r#"
            UPDATE posts SET
                content = $2,
                image = $3,
                updated_at = $4
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.content)
        .bind(&post.image)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, post_id: PostId) -> PostsResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_by_author(&self, author_id: UserId) -> PostsResult<Vec<FeedPost>> {
        let rows = sqlx::query_as::<_, FeedRow>(&format!(
            "{FEED_SELECT} WHERE p.author_id = $1 ORDER BY p.created_at DESC"
        ))
        .bind(author_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FeedRow::into_feed_post).collect())
    }

    async fn list_all(&self) -> PostsResult<Vec<FeedPost>> {
        let rows =
            sqlx::query_as::<_, FeedRow>(&format!("{FEED_SELECT} ORDER BY p.created_at DESC"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(FeedRow::into_feed_post).collect())
    }

    async fn append_like(&self, post_id: PostId, user_id: UserId) -> PostsResult<bool> {
        // Conditional append: the containment predicate runs in the same
        // statement, so concurrent duplicates collapse into one entry.
        let updated = sqlx::query(
            r#"
            UPDATE posts
            SET likes = array_append(likes, $2), updated_at = now()
            WHERE post_id = $1 AND NOT (likes @> ARRAY[$2])
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn append_comment(&self, post_id: PostId, comment: &Comment) -> PostsResult<bool> {
        let record = CommentRecord::from(comment);

        let updated = sqlx::query(
            r#"
            UPDATE posts
            SET comments = comments || $2, updated_at = now()
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(Json(record))
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn likes_with_names(&self, post_id: PostId) -> PostsResult<Option<Vec<LikeEntry>>> {
        let likes: Option<Vec<Uuid>> =
            sqlx::query_scalar("SELECT likes FROM posts WHERE post_id = $1")
                .bind(post_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        let Some(likes) = likes else {
            return Ok(None);
        };

        if likes.is_empty() {
            return Ok(Some(Vec::new()));
        }

        // Likes by since-deleted users drop out of the listing here
        let rows = sqlx::query_as::<_, LikeRow>(
            "SELECT user_id, name FROM users WHERE user_id = ANY($1)",
        )
        .bind(&likes)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(
            rows.into_iter()
                .map(|row| LikeEntry {
                    user_id: UserId::from_uuid(row.user_id),
                    name: row.name,
                })
                .collect(),
        ))
    }
}

// ============================================================================
// Row mapping
// ============================================================================

/// Comment as stored inside the jsonb array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentRecord {
    user_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            user_id: *comment.author_id.as_uuid(),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

impl CommentRecord {
    fn into_comment(self) -> Comment {
        Comment {
            author_id: UserId::from_uuid(self.user_id),
            text: self.text,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    content: String,
    image: String,
    likes: Vec<Uuid>,
    comments: Json<Vec<CommentRecord>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            content: self.content,
            image: self.image,
            likes: self.likes.into_iter().map(UserId::from_uuid).collect(),
            comments: self
                .comments
                .0
                .into_iter()
                .map(CommentRecord::into_comment)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FeedRow {
    post_id: Uuid,
    author_id: Uuid,
    content: String,
    image: String,
    likes: Vec<Uuid>,
    comments: Json<Vec<CommentRecord>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
    author_profile_picture: String,
}

impl FeedRow {
    fn into_feed_post(self) -> FeedPost {
        let post = PostRow {
            post_id: self.post_id,
            author_id: self.author_id,
            content: self.content,
            image: self.image,
            likes: self.likes,
            comments: self.comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_post();

        FeedPost {
            post,
            author_name: self.author_name,
            author_profile_picture: self.author_profile_picture,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LikeRow {
    user_id: Uuid,
    name: String,
}

fn like_uuids(post: &Post) -> Vec<Uuid> {
    post.likes.iter().map(|id| *id.as_uuid()).collect()
}

fn comment_records(post: &Post) -> Vec<CommentRecord> {
    post.comments.iter().map(CommentRecord::from).collect()
}
