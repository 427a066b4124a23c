//! Post Entity

use accounts::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::post_id::PostId;

/// A single comment on a post
#[derive(Debug, Clone)]
pub struct Comment {
    /// Commenting user (weak reference, may point at a deleted user)
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: UserId, text: String) -> Self {
        Self {
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Post entity
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    /// Owning user; immutable after creation
    pub author_id: UserId,
    pub content: String,
    /// Image URL ("" when unset)
    pub image: String,
    /// Users who liked this post; a given id appears at most once
    pub likes: Vec<UserId>,
    /// Append-only, ordered by insertion
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post
    pub fn new(author_id: UserId, content: String, image: String) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            author_id,
            content,
            image,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` already likes this post
    pub fn has_like(&self, user: UserId) -> bool {
        self.likes.contains(&user)
    }

    /// Whether `user` owns this post
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author_id == user
    }

    /// Apply an allow-listed edit (content and image only)
    pub fn apply_edit(&mut self, edit: PostEdit) {
        if let Some(content) = edit.content {
            self.content = content;
        }
        if let Some(image) = edit.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

/// Allow-listed post edit
///
/// The author and engagement fields (likes, comments) are not editable
/// through this path.
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub content: Option<String>,
    pub image: Option<String>,
}

/// A post joined with its author's display data, for feed responses
#[derive(Debug, Clone)]
pub struct FeedPost {
    pub post: Post,
    pub author_name: String,
    pub author_profile_picture: String,
}

/// One entry of a post's like list, resolved to a display name
#[derive(Debug, Clone)]
pub struct LikeEntry {
    pub user_id: UserId,
    pub name: String,
}
