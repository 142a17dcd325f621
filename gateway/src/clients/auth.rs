use super::{DownstreamClient, ForwardedResponse};
use crate::api::models::administrators::AdministratorRequest;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the authentication service.
///
/// Responses are handed back whole so that the tokens and cookies the service issues
/// reach the caller untouched.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn login(&self, request: &AdministratorRequest) -> Result<ForwardedResponse>;
    async fn register(&self, request: &AdministratorRequest) -> Result<ForwardedResponse>;
}

pub struct AuthClientReqwest {
    client: DownstreamClient,
}

impl AuthClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthClient for AuthClientReqwest {
    async fn login(&self, request: &AdministratorRequest) -> Result<ForwardedResponse> {
        self.client.forward(Method::POST, &["auth", "login"], Some(request)).await
    }

    async fn register(&self, request: &AdministratorRequest) -> Result<ForwardedResponse> {
        self.client.forward(Method::POST, &["auth", "register"], Some(request)).await
    }
}
