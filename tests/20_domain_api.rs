mod common;

use anyhow::Result;
use serde_json::json;

use common::{club_json, ok, MockBackend};
use uniclub_client::api::{applications, auth, groups, notifications, schools, ListShape};
use uniclub_client::error::{ClientError, ValidationError};
use uniclub_client::models::{
    ClubSearchParams, LeaveDecisionRequest, LeaveStatus, ReviewDecision, ReviewRequest, SchoolSearchParams,
    SignupRequest,
};

#[tokio::test]
async fn club_search_accepts_array_and_page_shapes() -> Result<()> {
    let backend = MockBackend::start().await?;
    let (client, _) = backend.client()?;
    let params = ClubSearchParams {
        keyword: Some("chess".into()),
        ..Default::default()
    };

    backend.respond("GET", "/groups/search", 200, json!([club_json(1, 3, "games")]));
    let bare = groups::search(client.http(), &params).await?.into_result()?;
    assert_eq!(bare.shape, ListShape::Array);
    assert_eq!(bare.len(), 1);

    backend.respond(
        "GET",
        "/groups/search",
        200,
        ok(json!({ "content": [club_json(1, 3, "games"), club_json(2, 5, "games")], "totalElements": 2 })),
    );
    let paged = groups::search(client.http(), &params).await?.into_result()?;
    assert_eq!(paged.shape, ListShape::Page);
    assert_eq!(paged.into_items().len(), 2);

    let request = backend.last("GET", "/groups/search").expect("request recorded");
    assert_eq!(request.query.as_deref(), Some("keyword=chess"));
    Ok(())
}

#[tokio::test]
async fn empty_page_is_an_empty_list() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/schools/3/groups", 200, ok(json!({ "content": null })));
    let (client, _) = backend.client()?;

    let clubs = schools::groups(client.http(), 3).await?.into_result()?;
    assert!(clubs.is_empty());
    Ok(())
}

#[tokio::test]
async fn school_search_sends_keyword() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "GET",
        "/schools",
        200,
        ok(json!([{ "schoolId": 1, "name": "Hanbit University", "domain": "hanbit.ac.kr" }])),
    );
    let (client, _) = backend.client()?;

    let found = schools::search(
        client.http(),
        &SchoolSearchParams {
            keyword: Some("Hanbit".into()),
        },
    )
    .await?
    .into_result()?
    .into_items();

    assert_eq!(found[0].domain.as_deref(), Some("hanbit.ac.kr"));
    assert_eq!(
        backend.last("GET", "/schools").and_then(|r| r.query).as_deref(),
        Some("keyword=Hanbit")
    );
    Ok(())
}

#[tokio::test]
async fn invalid_signup_never_reaches_the_backend() -> Result<()> {
    let backend = MockBackend::start().await?;
    let (client, _) = backend.client()?;
    let request = SignupRequest {
        email: "kim@hanbit.ac.kr".into(),
        password: "longenough".into(),
        password_confirm: "different".into(),
        name: "Kim".into(),
        school_id: Some(1),
    };

    let err = auth::signup(client.http(), &request).await.expect_err("validation fails");

    assert!(matches!(err, ClientError::Validation(ValidationError::PasswordMismatch)));
    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn signup_body_omits_confirmation() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "POST",
        "/auth/signup",
        201,
        ok(common::user_json(11, "park@hanbit.ac.kr")),
    );
    let (client, _) = backend.client()?;
    let request = SignupRequest {
        email: "park@hanbit.ac.kr".into(),
        password: "longenough".into(),
        password_confirm: "longenough".into(),
        name: "Park".into(),
        school_id: Some(1),
    };

    let user = auth::signup(client.http(), &request).await?.into_result()?;

    assert_eq!(user.user_id, 11);
    let body = backend.last("POST", "/auth/signup").and_then(|r| r.body).expect("json body");
    assert!(body.get("passwordConfirm").is_none());
    assert_eq!(body["schoolId"], 1);
    Ok(())
}

#[tokio::test]
async fn leave_decision_is_a_put_with_status() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "PUT",
        "/groups/4/leave-requests/8",
        200,
        ok(json!({ "requestId": 8, "groupId": 4, "userId": 2, "status": "APPROVED" })),
    );
    let (client, _) = backend.client()?;

    let decided = groups::decide_leave(
        client.http(),
        4,
        8,
        &LeaveDecisionRequest {
            status: LeaveStatus::Approved,
        },
    )
    .await?
    .into_result()?;

    assert_eq!(decided.status, LeaveStatus::Approved);
    let body = backend.last("PUT", "/groups/4/leave-requests/8").and_then(|r| r.body);
    assert_eq!(body, Some(json!({ "status": "APPROVED" })));
    Ok(())
}

#[tokio::test]
async fn review_sends_decision_and_comment() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "PUT",
        "/applications/5/review",
        200,
        ok(json!({ "applicationId": 5, "recruitmentId": 2, "userId": 3, "status": "REJECTED" })),
    );
    let (client, _) = backend.client()?;

    applications::review(
        client.http(),
        5,
        &ReviewRequest {
            status: ReviewDecision::Rejected,
            comment: Some("Roster is full".into()),
        },
    )
    .await?
    .into_result()?;

    let body = backend.last("PUT", "/applications/5/review").and_then(|r| r.body);
    assert_eq!(body, Some(json!({ "status": "REJECTED", "comment": "Roster is full" })));
    Ok(())
}

#[tokio::test]
async fn unread_count_accepts_both_shapes() -> Result<()> {
    let backend = MockBackend::start().await?;
    let (client, _) = backend.client()?;

    backend.respond("GET", "/notifications/unread-count", 200, ok(json!({ "count": 4 })));
    let wrapped = notifications::unread_count(client.http()).await?.into_result()?;
    assert_eq!(wrapped.value(), 4);

    backend.respond("GET", "/notifications/unread-count", 200, ok(json!(2)));
    let bare = notifications::unread_count(client.http()).await?.into_result()?;
    assert_eq!(bare.value(), 2);
    Ok(())
}

#[tokio::test]
async fn delete_acknowledgement_ignores_payload() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("DELETE", "/applications/9", 200, ok(json!(null)));
    let (client, _) = backend.client()?;

    let envelope = applications::cancel(client.http(), 9).await?;
    assert!(envelope.is_success());
    Ok(())
}
