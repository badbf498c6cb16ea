use crate::api::schools;
use crate::models::{Club, School, SchoolSearchParams};
use crate::query::QueryState;

use super::{keys, HookContext};

#[derive(Clone)]
pub struct SchoolHooks {
    ctx: HookContext,
}

impl SchoolHooks {
    pub fn new(ctx: HookContext) -> Self {
        Self { ctx }
    }

    pub async fn schools(&self, params: &SchoolSearchParams) -> QueryState<Vec<School>> {
        let query = params.clone();
        self.ctx
            .read_list(keys::schools(params), move |client| async move { schools::search(&client, &query).await })
            .await
    }

    pub async fn school(&self, school_id: i64) -> QueryState<School> {
        self.ctx
            .read(keys::school(school_id), move |client| async move { schools::get(&client, school_id).await })
            .await
    }

    pub async fn clubs(&self, school_id: i64) -> QueryState<Vec<Club>> {
        self.ctx
            .read_list(keys::school_clubs(school_id), move |client| async move {
                schools::groups(&client, school_id).await
            })
            .await
    }
}
