use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::school::SchoolSummary;

/// A club, called a "group" by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub school: Option<SchoolSummary>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Leader,
    Manager,
    Member,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: MemberRole,
    #[serde(default)]
    pub joined_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub request_id: i64,
    pub group_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub school_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: i64,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDecisionRequest {
    pub status: LeaveStatus,
}

/// Query parameters for `GET /groups/search`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubSort {
    /// Backend order, assumed most recent first
    #[default]
    Latest,
    Popular,
    Members,
}

impl std::str::FromStr for ClubSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latest" => Ok(ClubSort::Latest),
            "popular" => Ok(ClubSort::Popular),
            "members" => Ok(ClubSort::Members),
            other => Err(format!("unknown sort '{}', expected latest, popular or members", other)),
        }
    }
}

/// Client-side listing options applied on top of a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClubListParams {
    pub search: ClubListSearch,
    pub category: Option<String>,
    pub sort: ClubSort,
    pub page: usize,
    pub size: usize,
}

/// Parts of the listing that go to the backend, and therefore the cache key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClubListSearch {
    pub keyword: Option<String>,
    pub school_id: Option<i64>,
}

impl ClubListSearch {
    /// Trimmed keyword; blank counts as none.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

impl ClubListParams {
    pub fn to_search_params(&self) -> ClubSearchParams {
        ClubSearchParams {
            keyword: self.search.keyword().map(str::to_string),
            school_id: self.search.school_id,
            category: None,
        }
    }
}

/// One page of the derived club listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubPage {
    pub content: Vec<Club>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub size: usize,
    pub has_next: bool,
    pub has_previous: bool,
}
