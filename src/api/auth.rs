use super::{Ack, ApiResult};
use crate::http::HttpClient;
use crate::models::{LoginRequest, LoginResponse, PasswordResetRequest, PasswordResetVerifyRequest, SignupRequest, User};

/// `POST /auth/login`. Bad credentials come back as a failure envelope, never
/// as a session revocation.
pub async fn login(client: &HttpClient, email: &str, password: &str) -> ApiResult<LoginResponse> {
    let body = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    client.post("/auth/login", &body).await
}

/// `POST /auth/signup`, after client-side validation.
pub async fn signup(client: &HttpClient, request: &SignupRequest) -> ApiResult<User> {
    request.validate()?;
    client.post("/auth/signup", request).await
}

pub async fn logout(client: &HttpClient) -> ApiResult<Ack> {
    client.post_empty("/auth/logout").await
}

pub async fn request_password_reset(client: &HttpClient, email: &str) -> ApiResult<Ack> {
    let body = PasswordResetRequest {
        email: email.trim().to_string(),
    };
    client.post("/auth/password-reset", &body).await
}

pub async fn verify_password_reset(client: &HttpClient, request: &PasswordResetVerifyRequest) -> ApiResult<Ack> {
    request.validate()?;
    client.post("/auth/password-reset/verify", request).await
}
