use super::DownstreamClient;
use crate::api::models::administrators::{AdministratorRequest, AdministratorResponse};
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the administrators service.
#[async_trait]
pub trait AdministratorClient: Send + Sync {
    async fn create_administrator(&self, request: &AdministratorRequest) -> Result<AdministratorResponse>;
    async fn sign_in_administrator(&self, request: &AdministratorRequest) -> Result<AdministratorResponse>;
    async fn find_administrator_by_email(&self, email: &str) -> Result<AdministratorResponse>;
    async fn delete_administrator_by_email(&self, email: &str) -> Result<()>;
    async fn update_administrator(&self, request: &AdministratorRequest) -> Result<AdministratorResponse>;
    async fn get_administrator_list(&self) -> Result<Vec<AdministratorResponse>>;
}

pub struct AdministratorClientReqwest {
    client: DownstreamClient,
}

impl AdministratorClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdministratorClient for AdministratorClientReqwest {
    async fn create_administrator(&self, request: &AdministratorRequest) -> Result<AdministratorResponse> {
        self.client.send(Method::POST, &["admin", "register"], request).await
    }

    async fn sign_in_administrator(&self, request: &AdministratorRequest) -> Result<AdministratorResponse> {
        self.client.send(Method::POST, &["admin", "login"], request).await
    }

    async fn find_administrator_by_email(&self, email: &str) -> Result<AdministratorResponse> {
        self.client.fetch(Method::POST, &["admin", "get", email]).await
    }

    async fn delete_administrator_by_email(&self, email: &str) -> Result<()> {
        self.client.execute(Method::DELETE, &["admin", "delete", email]).await
    }

    async fn update_administrator(&self, request: &AdministratorRequest) -> Result<AdministratorResponse> {
        self.client.send(Method::PUT, &["admin", "update"], request).await
    }

    async fn get_administrator_list(&self) -> Result<Vec<AdministratorResponse>> {
        self.client.fetch(Method::GET, &["admin", "getall"]).await
    }
}
