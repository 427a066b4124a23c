//! Unit tests for the posts crate
//!
//! Use cases run against an in-memory repository; no database needed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use accounts::domain::value_object::user_id::UserId;

use crate::domain::entity::post::{Comment, FeedPost, LikeEntry, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{PostsError, PostsResult};

/// In-memory post repository for use case tests
///
/// Carries a small author table so the feed queries can resolve names
/// the way the SQL join does.
#[derive(Clone, Default)]
pub struct MemoryPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
    authors: Arc<RwLock<HashMap<Uuid, (String, String)>>>,
}

impl MemoryPostRepository {
    pub fn register_author(&self, user_id: UserId, name: &str, profile_picture: &str) {
        self.authors.write().unwrap().insert(
            *user_id.as_uuid(),
            (name.to_string(), profile_picture.to_string()),
        );
    }

    fn feed_post(&self, post: &Post) -> FeedPost {
        let authors = self.authors.read().unwrap();
        let (name, picture) = authors
            .get(post.author_id.as_uuid())
            .cloned()
            .unwrap_or_default();

        FeedPost {
            post: post.clone(),
            author_name: name,
            author_profile_picture: picture,
        }
    }
}

impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: &Post) -> PostsResult<()> {
        self.posts
            .write()
            .unwrap()
            .insert(*post.post_id.as_uuid(), post.clone());
        Ok(())
    }

    async fn find_by_id(&self, post_id: PostId) -> PostsResult<Option<Post>> {
        Ok(self.posts.read().unwrap().get(post_id.as_uuid()).cloned())
    }

    async fn update(&self, post: &Post) -> PostsResult<()> {
        self.posts
            .write()
            .unwrap()
            .insert(*post.post_id.as_uuid(), post.clone());
        Ok(())
    }

    async fn delete(&self, post_id: PostId) -> PostsResult<bool> {
        Ok(self
            .posts
            .write()
            .unwrap()
            .remove(post_id.as_uuid())
            .is_some())
    }

    async fn list_by_author(&self, author_id: UserId) -> PostsResult<Vec<FeedPost>> {
        let posts = self.posts.read().unwrap();
        let mut result: Vec<FeedPost> = posts
            .values()
            .filter(|p| p.author_id == author_id)
            .map(|p| self.feed_post(p))
            .collect();
        result.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(result)
    }

    async fn list_all(&self) -> PostsResult<Vec<FeedPost>> {
        let posts = self.posts.read().unwrap();
        let mut result: Vec<FeedPost> = posts.values().map(|p| self.feed_post(p)).collect();
        result.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(result)
    }

    async fn append_like(&self, post_id: PostId, user_id: UserId) -> PostsResult<bool> {
        let mut posts = self.posts.write().unwrap();
        match posts.get_mut(post_id.as_uuid()) {
            None => Ok(false),
            Some(post) => {
                if post.has_like(user_id) {
                    return Ok(false);
                }
                post.likes.push(user_id);
                post.updated_at = Utc::now();
                Ok(true)
            }
        }
    }

    async fn append_comment(&self, post_id: PostId, comment: &Comment) -> PostsResult<bool> {
        let mut posts = self.posts.write().unwrap();
        match posts.get_mut(post_id.as_uuid()) {
            None => Ok(false),
            Some(post) => {
                post.comments.push(comment.clone());
                post.updated_at = Utc::now();
                Ok(true)
            }
        }
    }

    async fn likes_with_names(&self, post_id: PostId) -> PostsResult<Option<Vec<LikeEntry>>> {
        let posts = self.posts.read().unwrap();
        let Some(post) = posts.get(post_id.as_uuid()) else {
            return Ok(None);
        };

        let authors = self.authors.read().unwrap();
        Ok(Some(
            post.likes
                .iter()
                .filter_map(|user_id| {
                    authors.get(user_id.as_uuid()).map(|(name, _)| LikeEntry {
                        user_id: *user_id,
                        name: name.clone(),
                    })
                })
                .collect(),
        ))
    }
}

mod like_tests {
    use super::*;
    use crate::application::{CreatePostInput, CreatePostUseCase, LikePostUseCase};

    async fn post_by(repo: &Arc<MemoryPostRepository>, author: UserId) -> Post {
        CreatePostUseCase::new(repo.clone())
            .execute(
                author,
                CreatePostInput {
                    content: "hello world".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn like_records_exactly_once() {
        let repo = Arc::new(MemoryPostRepository::default());
        let author = UserId::new();
        let fan = UserId::new();
        let post = post_by(&repo, author).await;

        let use_case = LikePostUseCase::new(repo.clone());
        use_case.execute(fan, post.post_id).await.unwrap();

        let err = use_case.execute(fan, post.post_id).await.unwrap_err();
        assert!(matches!(err, PostsError::AlreadyLiked));

        let stored = repo.find_by_id(post.post_id).await.unwrap().unwrap();
        assert_eq!(stored.likes.iter().filter(|id| **id == fan).count(), 1);
    }

    #[tokio::test]
    async fn like_missing_post_fails() {
        let repo = Arc::new(MemoryPostRepository::default());
        let use_case = LikePostUseCase::new(repo);

        let err = use_case
            .execute(UserId::new(), PostId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, PostsError::PostNotFound));
    }
}

mod comment_tests {
    use super::*;
    use crate::application::{CommentPostUseCase, CreatePostInput, CreatePostUseCase};

    #[tokio::test]
    async fn duplicate_comments_both_append() {
        let repo = Arc::new(MemoryPostRepository::default());
        let post = CreatePostUseCase::new(repo.clone())
            .execute(
                UserId::new(),
                CreatePostInput {
                    content: "hello".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap();

        let commenter = UserId::new();
        let use_case = CommentPostUseCase::new(repo.clone());

        use_case
            .execute(commenter, post.post_id, "hi".to_string())
            .await
            .unwrap();
        let after_second = use_case
            .execute(commenter, post.post_id, "hi".to_string())
            .await
            .unwrap();

        // Not idempotent by design: same text, two entries
        assert_eq!(after_second.comments.len(), 2);

        let stored = repo.find_by_id(post.post_id).await.unwrap().unwrap();
        assert_eq!(stored.comments.len(), 2);
        assert!(stored.comments.iter().all(|c| c.text == "hi"));
    }

    #[tokio::test]
    async fn comment_missing_post_fails() {
        let repo = Arc::new(MemoryPostRepository::default());
        let use_case = CommentPostUseCase::new(repo);

        let err = use_case
            .execute(UserId::new(), PostId::new(), "hi".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, PostsError::PostNotFound));
    }

    #[tokio::test]
    async fn empty_comment_rejected() {
        let repo = Arc::new(MemoryPostRepository::default());
        let use_case = CommentPostUseCase::new(repo);

        let err = use_case
            .execute(UserId::new(), PostId::new(), "   ".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, PostsError::Validation(_)));
    }
}

mod ownership_tests {
    use super::*;
    use crate::application::{
        CreatePostInput, CreatePostUseCase, DeletePostUseCase, EditPostUseCase, LikePostUseCase,
    };
    use crate::domain::entity::post::PostEdit;

    async fn one_post(repo: &Arc<MemoryPostRepository>, author: UserId) -> Post {
        CreatePostUseCase::new(repo.clone())
            .execute(
                author,
                CreatePostInput {
                    content: "mine".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn only_the_author_may_delete() {
        let repo = Arc::new(MemoryPostRepository::default());
        let author = UserId::new();
        let stranger = UserId::new();
        let post = one_post(&repo, author).await;

        let use_case = DeletePostUseCase::new(repo.clone());

        let err = use_case.execute(stranger, post.post_id).await.unwrap_err();
        assert!(matches!(err, PostsError::NotPostAuthor));
        assert!(repo.find_by_id(post.post_id).await.unwrap().is_some());

        use_case.execute(author, post.post_id).await.unwrap();
        assert!(repo.find_by_id(post.post_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn edit_applies_allow_listed_changes() {
        let repo = Arc::new(MemoryPostRepository::default());
        let author = UserId::new();
        let post = one_post(&repo, author).await;

        let edited = EditPostUseCase::new(repo.clone())
            .execute(
                author,
                post.post_id,
                PostEdit {
                    content: Some("updated".to_string()),
                    image: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.content, "updated");
        assert_eq!(edited.author_id, author);
    }

    #[tokio::test]
    async fn edit_is_refused_after_liking() {
        let repo = Arc::new(MemoryPostRepository::default());
        let author = UserId::new();
        let editor = UserId::new();
        let post = one_post(&repo, author).await;

        LikePostUseCase::new(repo.clone())
            .execute(editor, post.post_id)
            .await
            .unwrap();

        let err = EditPostUseCase::new(repo)
            .execute(
                editor,
                post.post_id,
                PostEdit {
                    content: Some("sneaky".to_string()),
                    image: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PostsError::AlreadyLiked));
    }
}

mod feed_tests {
    use super::*;
    use crate::application::{CreatePostInput, CreatePostUseCase, FeedUseCase, LikePostUseCase};

    #[tokio::test]
    async fn my_posts_is_scoped_to_the_actor() {
        let repo = Arc::new(MemoryPostRepository::default());
        let alice = UserId::new();
        let bob = UserId::new();
        repo.register_author(alice, "Alice", "");
        repo.register_author(bob, "Bob", "");

        let create = CreatePostUseCase::new(repo.clone());
        create
            .execute(
                alice,
                CreatePostInput {
                    content: "from alice".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap();
        create
            .execute(
                bob,
                CreatePostInput {
                    content: "from bob".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap();

        let feed = FeedUseCase::new(repo);
        let mine = feed.my_posts(alice).await.unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].post.content, "from alice");
        assert_eq!(mine[0].author_name, "Alice");

        assert_eq!(feed.all_posts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_feeds_report_no_posts() {
        let repo = Arc::new(MemoryPostRepository::default());
        let feed = FeedUseCase::new(repo);

        assert!(matches!(
            feed.my_posts(UserId::new()).await.unwrap_err(),
            PostsError::NoPosts
        ));
        assert!(matches!(
            feed.all_posts().await.unwrap_err(),
            PostsError::NoPosts
        ));
    }

    #[tokio::test]
    async fn likes_listing_resolves_names() {
        let repo = Arc::new(MemoryPostRepository::default());
        let author = UserId::new();
        let fan = UserId::new();
        repo.register_author(fan, "Bob", "");

        let post = CreatePostUseCase::new(repo.clone())
            .execute(
                author,
                CreatePostInput {
                    content: "hello".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap();

        LikePostUseCase::new(repo.clone())
            .execute(fan, post.post_id)
            .await
            .unwrap();

        let likes = FeedUseCase::new(repo.clone()).likes(post.post_id).await.unwrap();
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].name, "Bob");

        let err = FeedUseCase::new(repo).likes(PostId::new()).await.unwrap_err();
        assert!(matches!(err, PostsError::PostNotFound));
    }
}

mod end_to_end_tests {
    use super::*;
    use crate::application::{CreatePostInput, CreatePostUseCase, LikePostUseCase};

    use accounts::application::access_token::verify_access_token;
    use accounts::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
    use accounts::domain::entity::user::User;
    use accounts::domain::repository::UserRepository;
    use accounts::domain::value_object::email::Email;
    use accounts::error::{AccountsError, AccountsResult};
    use accounts::AccountsConfig;
    use chrono::NaiveDate;

    /// Just enough of a user store to drive the accounts use cases
    #[derive(Clone, Default)]
    struct MemoryUserRepository {
        users: Arc<RwLock<HashMap<Uuid, User>>>,
    }

    impl UserRepository for MemoryUserRepository {
        async fn create(&self, user: &User) -> AccountsResult<()> {
            self.users
                .write()
                .unwrap()
                .insert(*user.user_id.as_uuid(), user.clone());
            Ok(())
        }

        async fn find_by_id(&self, user_id: UserId) -> AccountsResult<Option<User>> {
            Ok(self.users.read().unwrap().get(user_id.as_uuid()).cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .values()
                .find(|u| &u.email == email)
                .cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool> {
            Ok(self
                .users
                .read()
                .unwrap()
                .values()
                .any(|u| &u.email == email))
        }

        async fn update(&self, user: &User) -> AccountsResult<()> {
            self.users
                .write()
                .unwrap()
                .insert(*user.user_id.as_uuid(), user.clone());
            Ok(())
        }

        async fn delete(&self, user_id: UserId) -> AccountsResult<bool> {
            Ok(self
                .users
                .write()
                .unwrap()
                .remove(user_id.as_uuid())
                .is_some())
        }

        async fn list_all(&self) -> AccountsResult<Vec<User>> {
            Ok(self.users.read().unwrap().values().cloned().collect())
        }

        async fn add_follow_edge(&self, _: UserId, _: UserId) -> AccountsResult<bool> {
            Err(AccountsError::Internal("not needed here".to_string()))
        }

        async fn remove_follow_edge(&self, _: UserId, _: UserId) -> AccountsResult<bool> {
            Err(AccountsError::Internal("not needed here".to_string()))
        }
    }

    fn register_input(name: &str, email: &str) -> RegisterInput {
        RegisterInput {
            name: name.to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            email: email.to_string(),
            password: "Sturdy#Pass9".to_string(),
            profile_picture: None,
            bio: None,
            location: None,
        }
    }

    #[tokio::test]
    async fn register_login_post_like_then_duplicate_like_fails() {
        let user_repo = Arc::new(MemoryUserRepository::default());
        let post_repo = Arc::new(MemoryPostRepository::default());
        let config = Arc::new(AccountsConfig::with_random_secret());

        // alice and bob register
        let register = RegisterUseCase::new(user_repo.clone(), config.clone());
        let alice = register
            .execute(register_input("Alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = register
            .execute(register_input("Bob", "bob@example.com"))
            .await
            .unwrap();

        // alice logs in; the returned token authenticates her
        let login = LoginUseCase::new(user_repo, config.clone())
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "Sturdy#Pass9".to_string(),
            })
            .await
            .unwrap();
        let claims = verify_access_token(&login.token, &config).unwrap();
        assert_eq!(claims.user_id, alice.user_id);

        // alice creates a post under her authenticated identity
        let post = CreatePostUseCase::new(post_repo.clone())
            .execute(
                claims.user_id,
                CreatePostInput {
                    content: "first post".to_string(),
                    image: None,
                },
            )
            .await
            .unwrap();

        // bob likes it once (ok), twice (already liked)
        let like = LikePostUseCase::new(post_repo.clone());
        like.execute(bob.user_id, post.post_id).await.unwrap();

        let err = like.execute(bob.user_id, post.post_id).await.unwrap_err();
        assert!(matches!(err, PostsError::AlreadyLiked));

        let stored = post_repo.find_by_id(post.post_id).await.unwrap().unwrap();
        assert_eq!(
            stored
                .likes
                .iter()
                .filter(|id| **id == bob.user_id)
                .count(),
            1
        );
    }
}

mod error_tests {
    use crate::error::PostsError;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases: Vec<(PostsError, StatusCode)> = vec![
            (PostsError::PostNotFound, StatusCode::NOT_FOUND),
            (PostsError::NoPosts, StatusCode::NOT_FOUND),
            (PostsError::AlreadyLiked, StatusCode::BAD_REQUEST),
            (PostsError::NotPostAuthor, StatusCode::FORBIDDEN),
            (
                PostsError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                PostsError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }

    #[test]
    fn test_error_messages_match_api_contract() {
        assert_eq!(PostsError::PostNotFound.to_string(), "Post not found");
        assert_eq!(
            PostsError::AlreadyLiked.to_string(),
            "You have already liked this post"
        );
        assert_eq!(
            PostsError::NotPostAuthor.to_string(),
            "You are not authorized to delete this post"
        );
    }
}
