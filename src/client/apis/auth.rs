use crate::client::{ClientError, FinanceClient, RequestContext};
use crate::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};

/// `/api/auth`
pub struct AuthApi<'a> {
    client: &'a FinanceClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a FinanceClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        let ctx = RequestContext::post("/api/auth/register").with_json(request)?;
        self.client.execute(ctx).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let ctx = RequestContext::post("/api/auth/login").with_json(request)?;
        self.client.execute(ctx).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.client
            .execute_empty(RequestContext::post("/api/auth/logout"))
            .await
    }
}
