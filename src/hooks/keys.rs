//! Cache keys shared by reads and the invalidation sets of writes.

use crate::models::{ClubListSearch, RecruitmentSearchParams, ScheduleRangeParams, SchoolSearchParams};
use crate::query::QueryKey;

pub fn me() -> QueryKey {
    QueryKey::new("me")
}

pub fn club(group_id: i64) -> QueryKey {
    QueryKey::new("club").with(group_id)
}

pub fn clubs_root() -> QueryKey {
    QueryKey::new("clubs")
}

pub fn clubs(search: &ClubListSearch) -> QueryKey {
    clubs_root()
        .with_opt(search.keyword())
        .with_opt(search.school_id)
}

pub fn my_groups() -> QueryKey {
    QueryKey::new("my-groups")
}

pub fn club_members(group_id: i64) -> QueryKey {
    QueryKey::new("club-members").with(group_id)
}

pub fn club_applications_root() -> QueryKey {
    QueryKey::new("club-applications")
}

pub fn club_applications(group_id: i64) -> QueryKey {
    club_applications_root().with(group_id)
}

pub fn club_recruitments(group_id: i64) -> QueryKey {
    QueryKey::new("club-recruitments").with(group_id)
}

pub fn leave_requests(group_id: i64) -> QueryKey {
    QueryKey::new("leave-requests").with(group_id)
}

pub fn recruitment(recruitment_id: i64) -> QueryKey {
    QueryKey::new("recruitment").with(recruitment_id)
}

pub fn recruitments_root() -> QueryKey {
    QueryKey::new("recruitments")
}

pub fn recruitments(params: &RecruitmentSearchParams) -> QueryKey {
    recruitments_root()
        .with_opt(params.keyword.as_deref())
        .with_opt(params.status.map(|s| format!("{:?}", s)))
        .with_opt(params.school_id)
}

pub fn application(application_id: i64) -> QueryKey {
    QueryKey::new("application").with(application_id)
}

pub fn my_applications() -> QueryKey {
    QueryKey::new("my-applications")
}

pub fn schools(params: &SchoolSearchParams) -> QueryKey {
    QueryKey::new("schools").with_opt(params.keyword.as_deref())
}

pub fn school(school_id: i64) -> QueryKey {
    QueryKey::new("school").with(school_id)
}

pub fn school_clubs_root() -> QueryKey {
    QueryKey::new("school-clubs")
}

pub fn school_clubs(school_id: i64) -> QueryKey {
    school_clubs_root().with(school_id)
}

pub fn boards(group_id: i64) -> QueryKey {
    QueryKey::new("boards").with(group_id)
}

pub fn board(group_id: i64, board_id: i64) -> QueryKey {
    QueryKey::new("board").with(group_id).with(board_id)
}

pub fn posts(board_id: i64) -> QueryKey {
    QueryKey::new("posts").with(board_id)
}

pub fn post(board_id: i64, post_id: i64) -> QueryKey {
    QueryKey::new("post").with(board_id).with(post_id)
}

pub fn comments(board_id: i64, post_id: i64) -> QueryKey {
    QueryKey::new("comments").with(board_id).with(post_id)
}

pub fn schedules_root(group_id: i64) -> QueryKey {
    QueryKey::new("schedules").with(group_id)
}

pub fn schedules(group_id: i64, range: &ScheduleRangeParams) -> QueryKey {
    schedules_root(group_id).with_opt(range.from).with_opt(range.to)
}

pub fn notifications() -> QueryKey {
    QueryKey::new("notifications")
}

pub fn unread_count() -> QueryKey {
    QueryKey::new("unread-count")
}
