use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{Board, CreateBoardRequest};

pub async fn list(client: &HttpClient, group_id: i64) -> ListResult<Board> {
    client.get(&format!("/groups/{}/boards", group_id)).await
}

pub async fn get(client: &HttpClient, group_id: i64, board_id: i64) -> ApiResult<Board> {
    client.get(&format!("/groups/{}/boards/{}", group_id, board_id)).await
}

pub async fn create(client: &HttpClient, group_id: i64, request: &CreateBoardRequest) -> ApiResult<Board> {
    client.post(&format!("/groups/{}/boards", group_id), request).await
}

pub async fn delete(client: &HttpClient, group_id: i64, board_id: i64) -> ApiResult<Ack> {
    client.delete(&format!("/groups/{}/boards/{}", group_id, board_id)).await
}
