mod common;

use std::time::Duration;

use anyhow::Result;
use serde_json::json;

use common::{club_json, failure, ok, user_json, MockBackend};
use uniclub_client::error::ClientError;
use uniclub_client::hooks::keys;
use uniclub_client::models::{ClubListParams, ClubListSearch, ClubSort, UpdateClubRequest};

#[tokio::test]
async fn updating_a_club_refetches_its_detail_once() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/groups/42", 200, ok(club_json(42, 10, "music")));
    backend.respond("PUT", "/groups/42", 200, ok(club_json(42, 10, "music")));
    backend.respond("GET", "/users/me/groups", 200, ok(json!([club_json(42, 10, "music")])));
    let (client, _) = backend.client()?;
    let clubs = client.clubs();

    assert!(clubs.club(42).await.is_success());
    assert!(clubs.club(42).await.is_success());
    client.users().my_groups().await;
    assert_eq!(backend.hits("GET", "/groups/42"), 1);
    assert_eq!(backend.hits("GET", "/users/me/groups"), 1);

    let request = UpdateClubRequest {
        description: Some("now meeting twice a week".into()),
        ..Default::default()
    };
    clubs.update(42, &request).await?;

    assert!(client.cache().is_stale(&keys::club(42)).await);
    assert!(client.cache().is_stale(&keys::my_groups()).await);

    clubs.club(42).await;
    clubs.club(42).await;
    client.users().my_groups().await;
    assert_eq!(backend.hits("GET", "/groups/42"), 2);
    assert_eq!(backend.hits("GET", "/users/me/groups"), 2);
    Ok(())
}

#[tokio::test]
async fn concurrent_reads_share_one_request() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond_slow(
        "GET",
        "/groups/search",
        200,
        ok(json!([club_json(1, 2, "sports"), club_json(2, 9, "sports")])),
        Duration::from_millis(150),
    );
    let (client, _) = backend.client()?;
    let clubs = client.clubs();
    let params = ClubListParams::default();

    let (a, b, c) = tokio::join!(clubs.clubs(&params), clubs.clubs(&params), clubs.clubs(&params));

    assert_eq!(backend.hits("GET", "/groups/search"), 1);
    for state in [a, b, c] {
        assert_eq!(state.data.map(|page| page.total_elements), Some(2));
    }
    Ok(())
}

#[tokio::test]
async fn paging_and_sorting_reuse_the_cached_search() -> Result<()> {
    let backend = MockBackend::start().await?;
    let listing: Vec<_> = (1..=25).map(|i| club_json(i, (i % 7) as u32, "music")).collect();
    backend.respond("GET", "/groups/search", 200, ok(json!(listing)));
    let (client, _) = backend.client()?;
    let clubs = client.clubs();

    let first = clubs
        .clubs(&ClubListParams {
            size: 20,
            ..Default::default()
        })
        .await
        .into_result()?;
    let second = clubs
        .clubs(&ClubListParams {
            page: 1,
            size: 20,
            sort: ClubSort::Popular,
            ..Default::default()
        })
        .await
        .into_result()?;

    assert_eq!(first.content.len(), 20);
    assert_eq!(second.content.len(), 5);
    assert!(second.has_previous && !second.has_next);
    assert_eq!(backend.hits("GET", "/groups/search"), 1);

    clubs
        .clubs(&ClubListParams {
            search: ClubListSearch {
                keyword: Some("jazz".into()),
                school_id: None,
            },
            ..Default::default()
        })
        .await;
    assert_eq!(backend.hits("GET", "/groups/search"), 2);

    // Padding around the keyword neither changes the query nor misses the cache
    clubs
        .clubs(&ClubListParams {
            search: ClubListSearch {
                keyword: Some("  jazz ".into()),
                school_id: None,
            },
            ..Default::default()
        })
        .await;
    assert_eq!(backend.hits("GET", "/groups/search"), 2);
    let sent = backend.last("GET", "/groups/search").expect("keyword search");
    assert_eq!(sent.query.as_deref(), Some("keyword=jazz"));
    Ok(())
}

#[tokio::test]
async fn failed_refetch_keeps_previous_data() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/users/me", 200, ok(user_json(3, "choi@hanbit.ac.kr")));
    let (client, _) = backend.client()?;

    let first = client.users().me().await;
    assert_eq!(first.data.as_ref().map(|u| u.user_id), Some(3));

    backend.respond("GET", "/users/me", 500, failure("Temporarily unavailable"));
    client.cache().invalidate(&keys::me()).await;
    let second = client.users().me().await;

    assert!(second.is_error());
    assert_eq!(second.data.map(|u| u.user_id), Some(3));
    assert_eq!(
        second.error.as_ref().map(ClientError::user_message).as_deref(),
        Some("Temporarily unavailable")
    );
    Ok(())
}

#[tokio::test]
async fn failed_mutation_leaves_cache_fresh() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/groups/42", 200, ok(club_json(42, 10, "music")));
    backend.respond("PUT", "/groups/42", 403, failure("Only club managers can edit"));
    let (client, _) = backend.client()?;
    let clubs = client.clubs();

    clubs.club(42).await;
    let err = clubs
        .update(42, &UpdateClubRequest::default())
        .await
        .expect_err("forbidden");

    assert_eq!(err.api_failure().map(|f| f.status), Some(403));
    assert!(!client.cache().is_stale(&keys::club(42)).await);
    Ok(())
}

#[tokio::test]
async fn double_submit_is_rejected_while_pending() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond_slow(
        "PUT",
        "/notifications/read-all",
        200,
        ok(json!(null)),
        Duration::from_millis(200),
    );
    let (client, _) = backend.client()?;
    let notifications = client.notifications();

    let first = notifications.mark_all_read();
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        notifications.mark_all_read().await
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(ClientError::AlreadyPending(_))));
    assert_eq!(backend.hits("PUT", "/notifications/read-all"), 1);
    Ok(())
}

#[tokio::test]
async fn reading_a_notification_refreshes_the_unread_count() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/notifications/unread-count", 200, ok(json!({ "count": 3 })));
    backend.respond("PUT", "/notifications/17/read", 200, ok(json!(null)));
    let (client, _) = backend.client()?;
    let notifications = client.notifications();

    assert_eq!(notifications.unread_count().await.data, Some(3));

    backend.respond("GET", "/notifications/unread-count", 200, ok(json!({ "count": 2 })));
    notifications.mark_read(17).await?;

    assert_eq!(notifications.unread_count().await.data, Some(2));
    assert_eq!(backend.hits("GET", "/notifications/unread-count"), 2);
    Ok(())
}

#[tokio::test]
async fn deleting_a_club_refreshes_school_listings() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "GET",
        "/schools/1/groups",
        200,
        ok(json!([club_json(42, 5, "music"), club_json(7, 3, "sports")])),
    );
    backend.respond("DELETE", "/groups/42", 200, ok(json!(null)));
    let (client, _) = backend.client()?;

    let before = client.schools().clubs(1).await;
    assert_eq!(before.data.map(|clubs| clubs.len()), Some(2));

    client.clubs().delete(42).await?;
    backend.respond("GET", "/schools/1/groups", 200, ok(json!([club_json(7, 3, "sports")])));

    let after = client.schools().clubs(1).await;
    let ids: Vec<i64> = after.data.unwrap_or_default().iter().map(|c| c.group_id).collect();
    assert_eq!(ids, vec![7]);
    assert_eq!(backend.hits("GET", "/schools/1/groups"), 2);
    Ok(())
}

#[tokio::test]
async fn membership_changes_refresh_member_sorted_listings() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "GET",
        "/groups/search",
        200,
        ok(json!([club_json(1, 4, "music"), club_json(2, 3, "music")])),
    );
    backend.respond("DELETE", "/groups/1/members/8", 200, ok(json!(null)));
    let (client, _) = backend.client()?;
    let clubs = client.clubs();
    let params = ClubListParams {
        sort: ClubSort::Members,
        ..Default::default()
    };

    let first = clubs.clubs(&params).await.data.expect("first listing");
    assert_eq!(first.content.iter().map(|c| c.group_id).collect::<Vec<_>>(), vec![1, 2]);

    clubs.remove_member(1, 8).await?;
    assert!(client.cache().is_stale(&keys::clubs(&ClubListSearch::default())).await);

    backend.respond(
        "GET",
        "/groups/search",
        200,
        ok(json!([club_json(1, 2, "music"), club_json(2, 3, "music")])),
    );
    let second = clubs.clubs(&params).await.data.expect("refetched listing");
    assert_eq!(second.content.iter().map(|c| c.group_id).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(backend.hits("GET", "/groups/search"), 2);
    Ok(())
}
