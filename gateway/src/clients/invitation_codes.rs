use super::DownstreamClient;
use crate::api::models::invitation_codes::InvitationCode;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the invitation codes service.
#[async_trait]
pub trait InvitationCodeClient: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<InvitationCode>;
    async fn generate_invitation_code(&self) -> Result<InvitationCode>;
    async fn delete_by_code(&self, code: &str) -> Result<()>;
    async fn mark_as_used(&self, code: &str) -> Result<InvitationCode>;
}

pub struct InvitationCodeClientReqwest {
    client: DownstreamClient,
}

impl InvitationCodeClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InvitationCodeClient for InvitationCodeClientReqwest {
    async fn find_by_code(&self, code: &str) -> Result<InvitationCode> {
        self.client.fetch(Method::GET, &["code", "get", code]).await
    }

    async fn generate_invitation_code(&self) -> Result<InvitationCode> {
        self.client.fetch(Method::GET, &["code", "generate"]).await
    }

    async fn delete_by_code(&self, code: &str) -> Result<()> {
        self.client.execute(Method::DELETE, &["code", "delete", code]).await
    }

    async fn mark_as_used(&self, code: &str) -> Result<InvitationCode> {
        self.client.fetch(Method::POST, &["code", "use", code]).await
    }
}
