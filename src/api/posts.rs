use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{CreatePostRequest, Post, UpdatePostRequest};

fn posts_path(board_id: i64) -> String {
    format!("/boards/{}/posts", board_id)
}

pub async fn list(client: &HttpClient, board_id: i64) -> ListResult<Post> {
    client.get(&posts_path(board_id)).await
}

pub async fn get(client: &HttpClient, board_id: i64, post_id: i64) -> ApiResult<Post> {
    client.get(&format!("{}/{}", posts_path(board_id), post_id)).await
}

pub async fn create(client: &HttpClient, board_id: i64, request: &CreatePostRequest) -> ApiResult<Post> {
    client.post(&posts_path(board_id), request).await
}

pub async fn update(client: &HttpClient, board_id: i64, post_id: i64, request: &UpdatePostRequest) -> ApiResult<Post> {
    client.put(&format!("{}/{}", posts_path(board_id), post_id), request).await
}

pub async fn delete(client: &HttpClient, board_id: i64, post_id: i64) -> ApiResult<Ack> {
    client.delete(&format!("{}/{}", posts_path(board_id), post_id)).await
}
