use crate::client::{ClientError, FinanceClient, RequestContext};
use crate::models::ActivityDto;

/// `/api/activities`
pub struct ActivitiesApi<'a> {
    client: &'a FinanceClient,
}

impl<'a> ActivitiesApi<'a> {
    pub fn new(client: &'a FinanceClient) -> Self {
        Self { client }
    }

    pub fn recent_request(&self, limit: Option<usize>) -> RequestContext {
        let ctx = RequestContext::get("/api/activities/recent");
        match limit {
            Some(limit) => ctx.with_param("limit", limit),
            None => ctx,
        }
    }

    /// Newest entries of the caller's feed
    pub async fn recent(&self, limit: Option<usize>) -> Result<Vec<ActivityDto>, ClientError> {
        self.client.execute(self.recent_request(limit)).await
    }
}
