use super::{ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{Club, School, SchoolSearchParams};

pub async fn search(client: &HttpClient, params: &SchoolSearchParams) -> ListResult<School> {
    client.get_query("/schools", params).await
}

pub async fn get(client: &HttpClient, school_id: i64) -> ApiResult<School> {
    client.get(&format!("/schools/{}", school_id)).await
}

/// Clubs of one school, expected most recent first.
pub async fn groups(client: &HttpClient, school_id: i64) -> ListResult<Club> {
    client.get(&format!("/schools/{}/groups", school_id)).await
}
