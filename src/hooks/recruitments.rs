use crate::api::{applications, recruitments};
use crate::error::ClientError;
use crate::models::{
    Application, ApplyRequest, CreateRecruitmentRequest, Recruitment, RecruitmentSearchParams, ReviewDecision,
    ReviewRequest, UpdateRecruitmentRequest,
};
use crate::query::{Invalidate, QueryKey, QueryState};

use super::{keys, HookContext};

#[derive(Clone)]
pub struct RecruitmentHooks {
    ctx: HookContext,
}

impl RecruitmentHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn recruitment(&self, recruitment_id: i64) -> QueryState<Recruitment> {
        self.ctx
            .read(keys::recruitment(recruitment_id), move |client| async move {
                recruitments::get(&client, recruitment_id).await
            })
            .await
    }

    pub async fn search(&self, params: &RecruitmentSearchParams) -> QueryState<Vec<Recruitment>> {
        let query = params.clone();
        self.ctx
            .read_list(keys::recruitments(params), move |client| async move {
                recruitments::search(&client, &query).await
            })
            .await
    }

    pub async fn create(&self, request: &CreateRecruitmentRequest) -> Result<Recruitment, ClientError> {
        let invalidates = [
            Invalidate::Prefix(keys::recruitments_root()),
            Invalidate::Key(keys::club_recruitments(request.group_id)),
        ];
        self.ctx
            .write(
                QueryKey::new("create-recruitment").with(request.group_id),
                &invalidates,
                |client| async move { recruitments::create(&client, request).await },
            )
            .await
    }

    pub async fn update(
        &self,
        recruitment_id: i64,
        request: &UpdateRecruitmentRequest,
    ) -> Result<Recruitment, ClientError> {
        let invalidates = [
            Invalidate::Key(keys::recruitment(recruitment_id)),
            Invalidate::Prefix(keys::recruitments_root()),
            Invalidate::Prefix(QueryKey::new("club-recruitments")),
        ];
        self.ctx
            .write(
                QueryKey::new("update-recruitment").with(recruitment_id),
                &invalidates,
                |client| async move { recruitments::update(&client, recruitment_id, request).await },
            )
            .await
    }

    pub async fn apply(&self, recruitment_id: i64, request: &ApplyRequest) -> Result<Application, ClientError> {
        let invalidates = [
            Invalidate::Key(keys::my_applications()),
            Invalidate::Prefix(keys::club_applications_root()),
        ];
        self.ctx
            .write(
                QueryKey::new("apply").with(recruitment_id),
                &invalidates,
                |client| async move { recruitments::apply(&client, recruitment_id, request).await },
            )
            .await
    }
}

#[derive(Clone)]
pub struct ApplicationHooks {
    ctx: HookContext,
}

impl ApplicationHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn application(&self, application_id: i64) -> QueryState<Application> {
        self.ctx
            .read(keys::application(application_id), move |client| async move {
                applications::get(&client, application_id).await
            })
            .await
    }

    pub async fn cancel(&self, application_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("cancel-application").with(application_id),
                &application_changed(application_id),
                |client| async move { applications::cancel(&client, application_id).await },
            )
            .await
            .map(|_| ())
    }

    /// Approving an applicant also changes club membership.
    pub async fn review(
        &self,
        application_id: i64,
        decision: ReviewDecision,
        comment: Option<String>,
    ) -> Result<Application, ClientError> {
        let mut invalidates = application_changed(application_id).to_vec();
        if decision == ReviewDecision::Approved {
            invalidates.push(Invalidate::Prefix(QueryKey::new("club-members")));
            invalidates.push(Invalidate::Prefix(QueryKey::new("club")));
            invalidates.push(Invalidate::Prefix(keys::clubs_root()));
            invalidates.push(Invalidate::Prefix(keys::school_clubs_root()));
        }
        let request = ReviewRequest {
            status: decision,
            comment,
        };
        self.ctx
            .write(
                QueryKey::new("review-application").with(application_id),
                &invalidates,
                |client| async move { applications::review(&client, application_id, &request).await },
            )
            .await
    }
}

fn application_changed(application_id: i64) -> [Invalidate; 3] {
    [
        Invalidate::Key(keys::application(application_id)),
        Invalidate::Key(keys::my_applications()),
        Invalidate::Prefix(keys::club_applications_root()),
    ]
}
