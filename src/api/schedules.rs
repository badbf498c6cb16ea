use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{Schedule, ScheduleRangeParams, ScheduleRequest};

fn schedules_path(group_id: i64) -> String {
    format!("/groups/{}/schedules", group_id)
}

pub async fn list(client: &HttpClient, group_id: i64, range: &ScheduleRangeParams) -> ListResult<Schedule> {
    client.get_query(&schedules_path(group_id), range).await
}

pub async fn create(client: &HttpClient, group_id: i64, request: &ScheduleRequest) -> ApiResult<Schedule> {
    client.post(&schedules_path(group_id), request).await
}

pub async fn update(
    client: &HttpClient,
    group_id: i64,
    schedule_id: i64,
    request: &ScheduleRequest,
) -> ApiResult<Schedule> {
    client
        .put(&format!("{}/{}", schedules_path(group_id), schedule_id), request)
        .await
}

pub async fn delete(client: &HttpClient, group_id: i64, schedule_id: i64) -> ApiResult<Ack> {
    client
        .delete(&format!("{}/{}", schedules_path(group_id), schedule_id))
        .await
}
