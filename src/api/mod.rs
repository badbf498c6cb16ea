//! Domain API modules, one per backend resource family.
//!
//! Every function resolves to an [`Envelope`]: backend-reported failures come
//! back as `Envelope::Failure`, and only transport or decoding problems are
//! returned as `Err`. List endpoints are normalized to [`ListResponse`].

pub mod applications;
pub mod auth;
pub mod boards;
pub mod comments;
pub mod envelope;
pub mod groups;
pub mod notifications;
pub mod posts;
pub mod recruitments;
pub mod schedules;
pub mod schools;
pub mod users;

pub use envelope::{Envelope, ListResponse, ListShape};

use crate::error::ClientError;

pub type ApiResult<T> = Result<Envelope<T>, ClientError>;
pub type ListResult<T> = ApiResult<ListResponse<T>>;

/// Payload of endpoints whose data callers never read (deletes, acknowledgements).
pub type Ack = serde::de::IgnoredAny;
