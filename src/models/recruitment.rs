use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecruitmentStatus {
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recruitment {
    pub recruitment_id: i64,
    pub group_id: i64,
    #[serde(default)]
    pub group_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub status: RecruitmentStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub max_applicants: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecruitmentRequest {
    pub group_id: i64,
    pub title: String,
    pub content: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_applicants: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecruitmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecruitmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecruitmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: i64,
    pub recruitment_id: i64,
    #[serde(default)]
    pub recruitment_title: Option<String>,
    #[serde(default)]
    pub group_id: Option<i64>,
    pub user_id: i64,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub review_comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub status: ReviewDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
