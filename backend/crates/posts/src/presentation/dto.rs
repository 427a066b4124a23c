//! API DTOs (Data Transfer Objects)

use accounts::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::post::{Comment, FeedPost, LikeEntry, Post, PostEdit};
use crate::domain::value_object::post_id::PostId;

// ============================================================================
// Create / Edit
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    pub image: Option<String>,
}

/// Allow-listed edit request; author and engagement fields are not here
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPostRequest {
    pub content: Option<String>,
    pub image: Option<String>,
}

impl EditPostRequest {
    pub fn into_edit(self) -> PostEdit {
        PostEdit {
            content: self.content,
            image: self.image,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

/// Comment request
///
/// The route is public, so the commenting user is part of the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub user_id: UserId,
    pub text: String,
}

/// Comment payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            user_id: comment.author_id,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Post payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub image: String,
    pub likes: Vec<UserId>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id,
            user_id: post.author_id,
            content: post.content,
            image: post.image,
            likes: post.likes,
            comments: post.comments.into_iter().map(CommentResponse::from).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Author display data joined into feed responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub name: String,
    pub profile_picture: String,
}

/// Feed entry: a post plus its author's display data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostResponse {
    pub id: PostId,
    pub user_id: UserId,
    pub author: AuthorResponse,
    pub content: String,
    pub image: String,
    pub likes: Vec<UserId>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FeedPost> for FeedPostResponse {
    fn from(feed_post: FeedPost) -> Self {
        let post = PostResponse::from(feed_post.post);
        Self {
            id: post.id,
            user_id: post.user_id,
            author: AuthorResponse {
                name: feed_post.author_name,
                profile_picture: feed_post.author_profile_picture,
            },
            content: post.content,
            image: post.image,
            likes: post.likes,
            comments: post.comments,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Likes
// ============================================================================

/// One like, resolved to a display name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEntryResponse {
    pub id: UserId,
    pub name: String,
}

/// Like listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub post_id: PostId,
    pub likes: Vec<LikeEntryResponse>,
}

impl LikesResponse {
    pub fn new(post_id: PostId, likes: Vec<LikeEntry>) -> Self {
        Self {
            post_id,
            likes: likes
                .into_iter()
                .map(|entry| LikeEntryResponse {
                    id: entry.user_id,
                    name: entry.name,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_response_camel_case() {
        let post = Post::new(UserId::new(), "hello".to_string(), String::new());
        let json = serde_json::to_string(&PostResponse::from(post)).unwrap();

        assert!(json.contains("userId"));
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
    }

    #[test]
    fn test_comment_request_deserialization() {
        let json = r#"{"userId":"00000000-0000-0000-0000-000000000000","text":"nice"}"#;
        let request: CommentRequest = serde_json::from_str(json).unwrap();

        assert!(request.user_id.as_uuid().is_nil());
        assert_eq!(request.text, "nice");
    }

    #[test]
    fn test_edit_request_defaults_to_noop() {
        let request: EditPostRequest = serde_json::from_str("{}").unwrap();
        let edit = request.into_edit();

        assert!(edit.content.is_none());
        assert!(edit.image.is_none());
    }

    #[test]
    fn test_feed_response_includes_author() {
        let feed_post = FeedPost {
            post: Post::new(UserId::new(), "hello".to_string(), String::new()),
            author_name: "Alice".to_string(),
            author_profile_picture: "https://example.com/alice.png".to_string(),
        };

        let json = serde_json::to_string(&FeedPostResponse::from(feed_post)).unwrap();
        assert!(json.contains(r#""author":{"name":"Alice""#));
    }
}
