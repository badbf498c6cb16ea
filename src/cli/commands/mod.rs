pub mod application;
pub mod auth;
pub mod club;
pub mod notification;
pub mod recruitment;
