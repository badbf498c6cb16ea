use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{Notification, UnreadCount};

pub async fn list(client: &HttpClient) -> ListResult<Notification> {
    client.get("/notifications").await
}

pub async fn unread_count(client: &HttpClient) -> ApiResult<UnreadCount> {
    client.get("/notifications/unread-count").await
}

pub async fn mark_read(client: &HttpClient, notification_id: i64) -> ApiResult<Ack> {
    client
        .put_empty(&format!("/notifications/{}/read", notification_id))
        .await
}

pub async fn mark_all_read(client: &HttpClient) -> ApiResult<Ack> {
    client.put_empty("/notifications/read-all").await
}
