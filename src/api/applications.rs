use super::{Ack, ApiResult};
use crate::http::HttpClient;
use crate::models::{Application, ReviewRequest};

pub async fn get(client: &HttpClient, application_id: i64) -> ApiResult<Application> {
    client.get(&format!("/applications/{}", application_id)).await
}

pub async fn cancel(client: &HttpClient, application_id: i64) -> ApiResult<Ack> {
    client.delete(&format!("/applications/{}", application_id)).await
}

pub async fn review(client: &HttpClient, application_id: i64, request: &ReviewRequest) -> ApiResult<Application> {
    client
        .put(&format!("/applications/{}/review", application_id), request)
        .await
}
