//! Typed entities, request bodies and query parameters for the UNICLUB API.
//!
//! Field names follow the backend's camelCase JSON. Status-like enums carry an
//! `Unknown` variant so values added server-side never break decoding.

pub mod board;
pub mod club;
pub mod notification;
pub mod recruitment;
pub mod schedule;
pub mod school;
pub mod user;

pub use board::{Board, Comment, CommentRequest, CreateBoardRequest, CreatePostRequest, Post, UpdatePostRequest};
pub use club::{
    AddMemberRequest, Club, ClubListParams, ClubListSearch, ClubPage, ClubSearchParams, ClubSort,
    CreateClubRequest, CreateLeaveRequest, LeaveDecisionRequest, LeaveRequest, LeaveStatus, Member,
    MemberRole, UpdateClubRequest,
};
pub use notification::{Notification, UnreadCount};
pub use recruitment::{
    Application, ApplicationStatus, ApplyRequest, CreateRecruitmentRequest, Recruitment,
    RecruitmentSearchParams, RecruitmentStatus, ReviewDecision, ReviewRequest, UpdateRecruitmentRequest,
};
pub use schedule::{Schedule, ScheduleRangeParams, ScheduleRequest};
pub use school::{School, SchoolSearchParams, SchoolSummary};
pub use user::{
    ChangePasswordRequest, LoginRequest, LoginResponse, PasswordResetRequest, PasswordResetVerifyRequest,
    SignupRequest, UpdateProfileRequest, User, UserRole,
};
