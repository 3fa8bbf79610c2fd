use crate::client::{ClientError, FinanceClient, RequestContext};
use crate::models::{UserDto, UserId};

use super::USERS_PATH;

/// `/api/v1/users`
pub struct UsersApi<'a> {
    client: &'a FinanceClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a FinanceClient) -> Self {
        Self { client }
    }

    pub fn by_email_request(&self, email: &str) -> RequestContext {
        RequestContext::get(format!("{}/by-email", USERS_PATH)).with_param("email", email)
    }

    pub async fn list(&self) -> Result<Vec<UserDto>, ClientError> {
        self.client.execute(RequestContext::get(USERS_PATH)).await
    }

    pub async fn get(&self, id: UserId) -> Result<UserDto, ClientError> {
        self.client
            .execute(RequestContext::get(format!("{}/{}", USERS_PATH, id)))
            .await
    }

    /// Look a user up by email (only the caller's own account is visible)
    pub async fn by_email(&self, email: &str) -> Result<UserDto, ClientError> {
        self.client.execute(self.by_email_request(email)).await
    }

    pub async fn create(&self, dto: &UserDto) -> Result<UserDto, ClientError> {
        self.client
            .execute(RequestContext::post(USERS_PATH).with_json(dto)?)
            .await
    }

    pub async fn update(&self, id: UserId, dto: &UserDto) -> Result<UserDto, ClientError> {
        let ctx = RequestContext::put(format!("{}/{}", USERS_PATH, id)).with_json(dto)?;
        self.client.execute(ctx).await
    }

    pub async fn delete(&self, id: UserId) -> Result<(), ClientError> {
        self.client
            .execute_empty(RequestContext::delete(format!("{}/{}", USERS_PATH, id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_email_request() {
        let client = FinanceClient::new("http://localhost").unwrap();
        let ctx = client.users().by_email_request("ana@example.com");
        assert_eq!(ctx.path, "/api/v1/users/by-email");
        assert_eq!(ctx.query, vec![("email".to_string(), "ana@example.com".to_string())]);
    }
}
