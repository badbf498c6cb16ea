use crate::api::notifications;
use crate::error::ClientError;
use crate::models::Notification;
use crate::query::{Invalidate, QueryKey, QueryState};

use super::{keys, HookContext};

#[derive(Clone)]
pub struct NotificationHooks {
    ctx: HookContext,
}

impl NotificationHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn notifications(&self) -> QueryState<Vec<Notification>> {
        self.ctx
            .read_list(keys::notifications(), |client| async move { notifications::list(&client).await })
            .await
    }

    pub async fn unread_count(&self) -> QueryState<u64> {
        self.ctx
            .read(keys::unread_count(), |client| async move {
                notifications::unread_count(&client).await.map(|env| env.map(|count| count.value()))
            })
            .await
    }

    pub async fn mark_read(&self, notification_id: i64) -> Result<(), ClientError> {
        self.ctx
            .write(
                QueryKey::new("mark-read").with(notification_id),
                &notifications_changed(),
                |client| async move { notifications::mark_read(&client, notification_id).await },
            )
            .await
            .map(|_| ())
    }

    pub async fn mark_all_read(&self) -> Result<(), ClientError> {
        self.ctx
            .write(QueryKey::new("mark-all-read"), &notifications_changed(), |client| async move {
                notifications::mark_all_read(&client).await
            })
            .await
            .map(|_| ())
    }
}

fn notifications_changed() -> [Invalidate; 2] {
    [
        Invalidate::Key(keys::notifications()),
        Invalidate::Key(keys::unread_count()),
    ]
}
