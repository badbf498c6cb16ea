mod common;

use anyhow::Result;
use serde_json::json;

use common::{failure, ok, user_json, MockBackend};
use uniclub_client::api::{users, Envelope};
use uniclub_client::events::AuthSignal;
use uniclub_client::models::User;

#[tokio::test]
async fn bearer_token_is_attached_when_stored() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/users/me", 200, ok(user_json(7, "kim@hanbit.ac.kr")));
    let (client, _) = backend.client()?;

    client.http().tokens().store("abc123", true, None).await?;
    let envelope = users::me(client.http()).await?;

    assert!(envelope.is_success());
    let request = backend.last("GET", "/users/me").expect("request recorded");
    assert_eq!(request.authorization.as_deref(), Some("Bearer abc123"));
    Ok(())
}

#[tokio::test]
async fn no_token_means_no_authorization_header() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/users/me", 200, ok(user_json(7, "kim@hanbit.ac.kr")));
    let (client, _) = backend.client()?;

    users::me(client.http()).await?;

    let request = backend.last("GET", "/users/me").expect("request recorded");
    assert!(request.authorization.is_none());
    Ok(())
}

#[tokio::test]
async fn unauthorized_on_regular_path_revokes_credentials() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/users/me/applications", 401, failure("Token expired"));
    let (client, _) = backend.client()?;
    client.http().tokens().store("stale", true, None).await?;
    let mut signals = client.http().events().subscribe();

    let envelope = users::my_applications(client.http()).await?;

    assert!(!envelope.is_success());
    assert_eq!(envelope.error().map(|e| e.status), Some(401));
    assert!(client.http().tokens().resolve_token().await?.is_none());
    assert_eq!(
        signals.try_recv()?,
        AuthSignal::Unauthorized {
            path: "/users/me/applications".into()
        }
    );
    Ok(())
}

#[tokio::test]
async fn unauthorized_login_is_a_plain_failure() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("POST", "/auth/login", 401, failure("Invalid email or password"));
    let (client, _) = backend.client()?;
    client.http().tokens().store("existing", true, None).await?;
    let mut signals = client.http().events().subscribe();

    let envelope = uniclub_client::api::auth::login(client.http(), "kim@hanbit.ac.kr", "wrong-pass").await?;

    match envelope {
        Envelope::Failure(failure) => assert_eq!(failure.message, "Invalid email or password"),
        Envelope::Success(_) => panic!("login should have failed"),
    }
    assert_eq!(client.http().tokens().resolve_token().await?.as_deref(), Some("existing"));
    assert!(signals.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn server_error_message_is_surfaced() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/users/me", 500, json!({ "message": "database unavailable" }));
    let (client, _) = backend.client()?;

    let envelope = users::me(client.http()).await?;

    let failure = envelope.error().expect("failure envelope");
    assert_eq!(failure.status, 500);
    assert_eq!(failure.message, "database unavailable");
    Ok(())
}

#[tokio::test]
async fn bare_success_body_is_data() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/users/me", 200, user_json(9, "lee@hanbit.ac.kr"));
    let (client, _) = backend.client()?;

    let user: User = users::me(client.http()).await?.into_result()?;
    assert_eq!(user.user_id, 9);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let config = uniclub_client::config::ClientConfig::for_base_url(format!("http://127.0.0.1:{}/api", port));
    let client = uniclub_client::UniClub::ephemeral(config)?;

    let err = users::me(client.http()).await.expect_err("nothing is listening");
    assert_eq!(err.user_message(), uniclub_client::error::GENERIC_NETWORK_MESSAGE);
    Ok(())
}
