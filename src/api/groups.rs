use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{
    AddMemberRequest, Application, Club, ClubSearchParams, CreateClubRequest, CreateLeaveRequest,
    LeaveDecisionRequest, LeaveRequest, Member, Recruitment, UpdateClubRequest,
};

/// `GET /groups/search`.
///
/// Precondition: the backend orders results most recent first. The `Latest`
/// listing sort keeps this order as-is. Some deployments answer with a bare
/// array instead of an envelope; both decode to the same list.
pub async fn search(client: &HttpClient, params: &ClubSearchParams) -> ListResult<Club> {
    client.get_query("/groups/search", params).await
}

pub async fn get(client: &HttpClient, group_id: i64) -> ApiResult<Club> {
    client.get(&format!("/groups/{}", group_id)).await
}

pub async fn create(client: &HttpClient, request: &CreateClubRequest) -> ApiResult<Club> {
    client.post("/groups", request).await
}

pub async fn update(client: &HttpClient, group_id: i64, request: &UpdateClubRequest) -> ApiResult<Club> {
    client.put(&format!("/groups/{}", group_id), request).await
}

pub async fn delete(client: &HttpClient, group_id: i64) -> ApiResult<Ack> {
    client.delete(&format!("/groups/{}", group_id)).await
}

pub async fn members(client: &HttpClient, group_id: i64) -> ListResult<Member> {
    client.get(&format!("/groups/{}/members", group_id)).await
}

pub async fn add_member(client: &HttpClient, group_id: i64, request: &AddMemberRequest) -> ApiResult<Member> {
    client.post(&format!("/groups/{}/members", group_id), request).await
}

pub async fn remove_member(client: &HttpClient, group_id: i64, user_id: i64) -> ApiResult<Ack> {
    client.delete(&format!("/groups/{}/members/{}", group_id, user_id)).await
}

pub async fn applications(client: &HttpClient, group_id: i64) -> ListResult<Application> {
    client.get(&format!("/groups/{}/applications", group_id)).await
}

pub async fn recruitments(client: &HttpClient, group_id: i64) -> ListResult<Recruitment> {
    client.get(&format!("/groups/{}/recruitments", group_id)).await
}

pub async fn leave_requests(client: &HttpClient, group_id: i64) -> ListResult<LeaveRequest> {
    client.get(&format!("/groups/{}/leave-requests", group_id)).await
}

pub async fn request_leave(client: &HttpClient, group_id: i64, request: &CreateLeaveRequest) -> ApiResult<LeaveRequest> {
    client.post(&format!("/groups/{}/leave-requests", group_id), request).await
}

/// Approve or reject a pending leave request (club managers only).
pub async fn decide_leave(
    client: &HttpClient,
    group_id: i64,
    request_id: i64,
    decision: &LeaveDecisionRequest,
) -> ApiResult<LeaveRequest> {
    client
        .put(&format!("/groups/{}/leave-requests/{}", group_id, request_id), decision)
        .await
}

/// Withdraw one's own pending leave request.
pub async fn cancel_leave(client: &HttpClient, group_id: i64, request_id: i64) -> ApiResult<Ack> {
    client
        .delete(&format!("/groups/{}/leave-requests/{}", group_id, request_id))
        .await
}
