use super::{Ack, ApiResult, ListResult};
use crate::http::HttpClient;
use crate::models::{Application, ChangePasswordRequest, Club, UpdateProfileRequest, User};

pub async fn me(client: &HttpClient) -> ApiResult<User> {
    client.get("/users/me").await
}

pub async fn update_me(client: &HttpClient, request: &UpdateProfileRequest) -> ApiResult<User> {
    client.put("/users/me", request).await
}

pub async fn change_password(client: &HttpClient, request: &ChangePasswordRequest) -> ApiResult<Ack> {
    request.validate()?;
    client.put("/users/me/password", request).await
}

pub async fn my_groups(client: &HttpClient) -> ListResult<Club> {
    client.get("/users/me/groups").await
}

pub async fn my_applications(client: &HttpClient) -> ListResult<Application> {
    client.get("/users/me/applications").await
}
