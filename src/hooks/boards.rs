use crate::api::{boards, comments, posts};
use crate::error::ClientError;
use crate::models::{Board, Comment, CommentRequest, CreateBoardRequest, CreatePostRequest, Post, UpdatePostRequest};
use crate::query::{Invalidate, QueryKey, QueryState};

use super::{keys, HookContext};

/// Boards, their posts and the comments under each post.
#[derive(Clone)]
pub struct BoardHooks {
    ctx: HookContext,
}

impl BoardHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn boards(&self, group_id: i64) -> QueryState<Vec<Board>> {
        self.ctx
            .read_list(keys::boards(group_id), move |client| async move { boards::list(&client, group_id).await })
            .await
    }

    pub async fn board(&self, group_id: i64, board_id: i64) -> QueryState<Board> {
        self.ctx
            .read(keys::board(group_id, board_id), move |client| async move {
                boards::get(&client, group_id, board_id).await
            })
            .await
    }

    pub async fn create_board(&self, group_id: i64, request: &CreateBoardRequest) -> Result<Board, ClientError> {
        self.ctx
            .write(
                QueryKey::new("create-board").with(group_id),
                &[Invalidate::Key(keys::boards(group_id))],
                |client| async move { boards::create(&client, group_id, request).await },
            )
            .await
    }

    pub async fn delete_board(&self, group_id: i64, board_id: i64) -> Result<(), ClientError> {
        let invalidates = [
            Invalidate::Key(keys::boards(group_id)),
            Invalidate::Key(keys::board(group_id, board_id)),
            Invalidate::Key(keys::posts(board_id)),
        ];
        self.ctx
            .write(
                QueryKey::new("delete-board").with(group_id).with(board_id),
                &invalidates,
                |client| async move { boards::delete(&client, group_id, board_id).await },
            )
            .await
            .map(|_| ())
    }

    pub async fn posts(&self, board_id: i64) -> QueryState<Vec<Post>> {
        self.ctx
            .read_list(keys::posts(board_id), move |client| async move { posts::list(&client, board_id).await })
            .await
    }

    pub async fn post(&self, board_id: i64, post_id: i64) -> QueryState<Post> {
        self.ctx
            .read(keys::post(board_id, post_id), move |client| async move {
                posts::get(&client, board_id, post_id).await
            })
            .await
    }

    pub async fn create_post(&self, board_id: i64, request: &CreatePostRequest) -> Result<Post, ClientError> {
        self.ctx
            .write(
                QueryKey::new("create-post").with(board_id),
                &[Invalidate::Key(keys::posts(board_id))],
                |client| async move { posts::create(&client, board_id, request).await },
            )
            .await
    }

    pub async fn update_post(&self, board_id: i64, post_id: i64, request: &UpdatePostRequest) -> Result<Post, ClientError> {
        self.ctx
            .write(
                QueryKey::new("update-post").with(board_id).with(post_id),
                &post_changed(board_id, post_id),
                |client| async move { posts::update(&client, board_id, post_id, request).await },
            )
            .await
    }

    pub async fn delete_post(&self, board_id: i64, post_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("delete-post").with(board_id).with(post_id),
                &post_changed(board_id, post_id),
                |client| async move { posts::delete(&client, board_id, post_id).await },
            )
            .await
            .map(|_| ())
    }

    pub async fn comments(&self, board_id: i64, post_id: i64) -> QueryState<Vec<Comment>> {
        self.ctx
            .read_list(keys::comments(board_id, post_id), move |client| async move {
                comments::list(&client, board_id, post_id).await
            })
            .await
    }

    pub async fn create_comment(&self, board_id: i64, post_id: i64, content: &str) -> Result<Comment, ClientError> {
        let request = CommentRequest {
            content: content.to_string(),
        };
        self.ctx
            .write(
                QueryKey::new("create-comment").with(board_id).with(post_id),
                &[Invalidate::Key(keys::comments(board_id, post_id))],
                |client| async move { comments::create(&client, board_id, post_id, &request).await },
            )
            .await
    }

    pub async fn update_comment(
        &self,
        board_id: i64,
        post_id: i64,
        comment_id: i64,
        content: &str,
    ) -> Result<Comment, ClientError> {
        let request = CommentRequest {
            content: content.to_string(),
        };
        self.ctx
            .write(
                QueryKey::new("update-comment").with(comment_id),
                &[Invalidate::Key(keys::comments(board_id, post_id))],
                |client| async move { comments::update(&client, board_id, post_id, comment_id, &request).await },
            )
            .await
    }

    pub async fn delete_comment(&self, board_id: i64, post_id: i64, comment_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("delete-comment").with(comment_id),
                &[Invalidate::Key(keys::comments(board_id, post_id))],
                |client| async move { comments::delete(&client, board_id, post_id, comment_id).await },
            )
            .await
            .map(|_| ())
    }
}

fn post_changed(board_id: i64, post_id: i64) -> [Invalidate; 2] {
    [
        Invalidate::Key(keys::posts(board_id)),
        Invalidate::Key(keys::post(board_id, post_id)),
    ]
}
