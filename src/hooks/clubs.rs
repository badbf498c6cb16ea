use crate::api::groups;
use crate::config::ListingConfig;
use crate::error::ClientError;
use crate::models::{
    AddMemberRequest, Application, Club, ClubListParams, ClubPage, ClubSort, CreateClubRequest, CreateLeaveRequest,
    LeaveDecisionRequest, LeaveRequest, LeaveStatus, Member, Recruitment, UpdateClubRequest,
};
use crate::query::{Invalidate, QueryKey, QueryState};

use super::{keys, HookContext};

/// Builds one page of the club listing from the raw search results.
///
/// Steps run in a fixed order: category filter, sort, then slice. `Popular`
/// and `Members` both order by member count, descending and stable;
/// `Latest` keeps the backend order.
pub fn derive_club_page(clubs: Vec<Club>, params: &ClubListParams, listing: &ListingConfig) -> ClubPage {
    let size = match params.size {
        0 => listing.default_page_size,
        n => n.min(listing.max_page_size),
    }
    .max(1);

    let mut filtered: Vec<Club> = match params.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => clubs
            .into_iter()
            .filter(|club| club.category.as_deref() == Some(category))
            .collect(),
        None => clubs,
    };

    match params.sort {
        ClubSort::Popular | ClubSort::Members => {
            filtered.sort_by(|a, b| b.member_count.cmp(&a.member_count));
        }
        ClubSort::Latest => {}
    }

    let total_elements = filtered.len();
    let total_pages = total_elements.div_ceil(size);
    let start = params.page.saturating_mul(size).min(total_elements);
    let end = start.saturating_add(size).min(total_elements);
    let content = filtered.drain(start..end).collect();

    ClubPage {
        content,
        total_elements,
        total_pages,
        current_page: params.page,
        size,
        has_next: params.page + 1 < total_pages,
        has_previous: params.page > 0,
    }
}

#[derive(Clone)]
pub struct ClubHooks {
    ctx: HookContext,
    listing: ListingConfig,
}

impl ClubHooks {
    pub fn new(ctx: HookContext, listing: ListingConfig) -> Self {
        Self { ctx, listing }
    }

    pub async fn club(&self, group_id: i64) -> QueryState<Club> {
        self.ctx
            .read(keys::club(group_id), move |client| async move { groups::get(&client, group_id).await })
            .await
    }

    /// Club listing with client-side filter, sort and pagination.
    ///
    /// Only the search part of `params` reaches the backend, so paging or
    /// re-sorting reuses the cached result.
    pub async fn clubs(&self, params: &ClubListParams) -> QueryState<ClubPage> {
        let search = params.to_search_params();
        let state = self
            .ctx
            .read_list(keys::clubs(&params.search), move |client| async move {
                groups::search(&client, &search).await
            })
            .await;
        state.map(|clubs| derive_club_page(clubs, params, &self.listing))
    }

    pub async fn members(&self, group_id: i64) -> QueryState<Vec<Member>> {
        self.ctx
            .read_list(keys::club_members(group_id), move |client| async move {
                groups::members(&client, group_id).await
            })
            .await
    }

    pub async fn applications(&self, group_id: i64) -> QueryState<Vec<Application>> {
        self.ctx
            .read_list(keys::club_applications(group_id), move |client| async move {
                groups::applications(&client, group_id).await
            })
            .await
    }

    pub async fn recruitments(&self, group_id: i64) -> QueryState<Vec<Recruitment>> {
        self.ctx
            .read_list(keys::club_recruitments(group_id), move |client| async move {
                groups::recruitments(&client, group_id).await
            })
            .await
    }

    pub async fn leave_requests(&self, group_id: i64) -> QueryState<Vec<LeaveRequest>> {
        self.ctx
            .read_list(keys::leave_requests(group_id), move |client| async move {
                groups::leave_requests(&client, group_id).await
            })
            .await
    }

    pub async fn create(&self, request: &CreateClubRequest) -> Result<Club, ClientError> {
        let invalidates = [Invalidate::Prefix(keys::clubs_root()), Invalidate::Key(keys::my_groups())];
        self.ctx
            .write(QueryKey::new("create-club"), &invalidates, |client| async move {
                groups::create(&client, request).await
            })
            .await
    }

    /// Updating a club makes its detail, the caller's club list and every
    /// cached listing stale, school listings included.
    pub async fn update(&self, group_id: i64, request: &UpdateClubRequest) -> Result<Club, ClientError> {
        let invalidates = [
            Invalidate::Key(keys::club(group_id)),
            Invalidate::Key(keys::my_groups()),
            Invalidate::Prefix(keys::clubs_root()),
            Invalidate::Prefix(keys::school_clubs_root()),
        ];
        self.ctx
            .write(QueryKey::new("update-club").with(group_id), &invalidates, |client| async move {
                groups::update(&client, group_id, request).await
            })
            .await
    }

    pub async fn delete(&self, group_id: i64) -> Result<(), ClientError> {
        let invalidates = [
            Invalidate::Key(keys::club(group_id)),
            Invalidate::Key(keys::club_members(group_id)),
            Invalidate::Key(keys::my_groups()),
            Invalidate::Prefix(keys::clubs_root()),
            Invalidate::Prefix(keys::school_clubs_root()),
        ];
        self.ctx
            .write(QueryKey::new("delete-club").with(group_id), &invalidates, |client| async move {
                groups::delete(&client, group_id).await
            })
            .await
            .map(|_| ())
    }

    pub async fn add_member(&self, group_id: i64, request: &AddMemberRequest) -> Result<Member, ClientError> {
        self.ctx
            .write(
                QueryKey::new("add-member").with(group_id).with(request.user_id),
                &membership_changed(group_id),
                |client| async move { groups::add_member(&client, group_id, request).await },
            )
            .await
    }

    pub async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("remove-member").with(group_id).with(user_id),
                &membership_changed(group_id),
                |client| async move { groups::remove_member(&client, group_id, user_id).await },
            )
            .await
            .map(|_| ())
    }

    pub async fn request_leave(&self, group_id: i64, request: &CreateLeaveRequest) -> Result<LeaveRequest, ClientError> {
        self.ctx
            .write(
                QueryKey::new("request-leave").with(group_id),
                &[Invalidate::Key(keys::leave_requests(group_id))],
                |client| async move { groups::request_leave(&client, group_id, request).await },
            )
            .await
    }

    /// An approved leave also changes membership.
    pub async fn decide_leave(
        &self,
        group_id: i64,
        request_id: i64,
        status: LeaveStatus,
    ) -> Result<LeaveRequest, ClientError> {
        let mut invalidates = vec![Invalidate::Key(keys::leave_requests(group_id))];
        if status == LeaveStatus::Approved {
            invalidates.extend(membership_changed(group_id));
            invalidates.push(Invalidate::Key(keys::my_groups()));
        }
        let decision = LeaveDecisionRequest { status };
        self.ctx
            .write(
                QueryKey::new("decide-leave").with(group_id).with(request_id),
                &invalidates,
                |client| async move { groups::decide_leave(&client, group_id, request_id, &decision).await },
            )
            .await
    }

    pub async fn cancel_leave(&self, group_id: i64, request_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("cancel-leave").with(group_id).with(request_id),
                &[Invalidate::Key(keys::leave_requests(group_id))],
                |client| async move { groups::cancel_leave(&client, group_id, request_id).await },
            )
            .await
            .map(|_| ())
    }
}

/// Member counts show up in every listing, so those go stale too.
fn membership_changed(group_id: i64) -> [Invalidate; 4] {
    [
        Invalidate::Key(keys::club_members(group_id)),
        Invalidate::Key(keys::club(group_id)),
        Invalidate::Prefix(keys::clubs_root()),
        Invalidate::Prefix(keys::school_clubs_root()),
    ]
}
