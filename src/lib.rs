pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod http;
pub mod models;
pub mod query;
pub mod session;
pub mod storage;

pub use client::UniClub;
pub use error::ClientError;
