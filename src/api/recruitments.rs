use super::{ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{
    Application, ApplyRequest, CreateRecruitmentRequest, Recruitment, RecruitmentSearchParams,
    UpdateRecruitmentRequest,
};

pub async fn search(client: &HttpClient, params: &RecruitmentSearchParams) -> ListResult<Recruitment> {
    client.get_query("/recruitments/search", params).await
}

pub async fn get(client: &HttpClient, recruitment_id: i64) -> ApiResult<Recruitment> {
    client.get(&format!("/recruitments/{}", recruitment_id)).await
}

pub async fn create(client: &HttpClient, request: &CreateRecruitmentRequest) -> ApiResult<Recruitment> {
    client.post("/recruitments", request).await
}

pub async fn update(
    client: &HttpClient,
    recruitment_id: i64,
    request: &UpdateRecruitmentRequest,
) -> ApiResult<Recruitment> {
    client.put(&format!("/recruitments/{}", recruitment_id), request).await
}

pub async fn apply(client: &HttpClient, recruitment_id: i64, request: &ApplyRequest) -> ApiResult<Application> {
    client
        .post(&format!("/recruitments/{}/apply", recruitment_id), request)
        .await
}
