use super::DownstreamClient;
use crate::api::models::routes::Problem;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the problems service.
#[async_trait]
pub trait ProblemClient: Send + Sync {
    async fn assign_problem(&self, problem: &Problem) -> Result<Problem>;
    async fn update_problem(&self, problem: &Problem) -> Result<Problem>;
    async fn delete_problem(&self, vin: &str) -> Result<()>;
    async fn get_problem(&self, vin: &str) -> Result<Problem>;
}

pub struct ProblemClientReqwest {
    client: DownstreamClient,
}

impl ProblemClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProblemClient for ProblemClientReqwest {
    async fn assign_problem(&self, problem: &Problem) -> Result<Problem> {
        self.client.send(Method::POST, &["route", "problem", "assign"], problem).await
    }

    async fn update_problem(&self, problem: &Problem) -> Result<Problem> {
        self.client.send(Method::PUT, &["route", "problem", "update"], problem).await
    }

    async fn delete_problem(&self, vin: &str) -> Result<()> {
        self.client.execute(Method::DELETE, &["route", "problem", "delete", vin]).await
    }

    async fn get_problem(&self, vin: &str) -> Result<Problem> {
        self.client.fetch(Method::GET, &["route", "problem", "get", vin]).await
    }
}
