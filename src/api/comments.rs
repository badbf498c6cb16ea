use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{Comment, CommentRequest};

fn comments_path(board_id: i64, post_id: i64) -> String {
    format!("/boards/{}/posts/{}/comments", board_id, post_id)
}

pub async fn list(client: &HttpClient, board_id: i64, post_id: i64) -> ListResult<Comment> {
    client.get(&comments_path(board_id, post_id)).await
}

pub async fn create(client: &HttpClient, board_id: i64, post_id: i64, request: &CommentRequest) -> ApiResult<Comment> {
    client.post(&comments_path(board_id, post_id), request).await
}

pub async fn update(
    client: &HttpClient,
    board_id: i64,
    post_id: i64,
    comment_id: i64,
    request: &CommentRequest,
) -> ApiResult<Comment> {
    client
        .put(&format!("{}/{}", comments_path(board_id, post_id), comment_id), request)
        .await
}

pub async fn delete(client: &HttpClient, board_id: i64, post_id: i64, comment_id: i64) -> ApiResult<Ack> {
    client
        .delete(&format!("{}/{}", comments_path(board_id, post_id), comment_id))
        .await
}
