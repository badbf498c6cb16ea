use crate::api::schedules;
use crate::error::ClientError;
use crate::models::{Schedule, ScheduleRangeParams, ScheduleRequest};
use crate::query::{Invalidate, QueryKey, QueryState};

use super::{keys, HookContext};

#[derive(Clone)]
pub struct ScheduleHooks {
    ctx: HookContext,
}

impl ScheduleHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn schedules(&self, group_id: i64, range: &ScheduleRangeParams) -> QueryState<Vec<Schedule>> {
        let query = range.clone();
        self.ctx
            .read_list(keys::schedules(group_id, range), move |client| async move {
                schedules::list(&client, group_id, &query).await
            })
            .await
    }

    pub async fn create(&self, group_id: i64, request: &ScheduleRequest) -> Result<Schedule, ClientError> {
        self.ctx
            .write(
                QueryKey::new("create-schedule").with(group_id),
                &[Invalidate::Prefix(keys::schedules_root(group_id))],
                |client| async move { schedules::create(&client, group_id, request).await },
            )
            .await
    }

    pub async fn update(&self, group_id: i64, schedule_id: i64, request: &ScheduleRequest) -> Result<Schedule, ClientError> {
        self.ctx
            .write(
                QueryKey::new("update-schedule").with(schedule_id),
                &[Invalidate::Prefix(keys::schedules_root(group_id))],
                |client| async move { schedules::update(&client, group_id, schedule_id, request).await },
            )
            .await
    }

    pub async fn delete(&self, group_id: i64, schedule_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("delete-schedule").with(schedule_id),
                &[Invalidate::Prefix(keys::schedules_root(group_id))],
                |client| async move { schedules::delete(&client, group_id, schedule_id).await },
            )
            .await
            .map(|_| ())
    }
}
