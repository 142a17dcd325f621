use super::DownstreamClient;
use crate::api::models::drivers::Driver;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the drivers service.
#[async_trait]
pub trait DriverClient: Send + Sync {
    async fn create_driver(&self, driver: &Driver) -> Result<Driver>;
    async fn update_driver(&self, driver: &Driver) -> Result<Driver>;
    async fn delete_driver(&self, curp: &str) -> Result<()>;
    async fn get_driver_by_curp(&self, curp: &str) -> Result<Driver>;
    async fn get_all_drivers(&self) -> Result<Vec<Driver>>;
}

pub struct DriverClientReqwest {
    client: DownstreamClient,
}

impl DriverClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DriverClient for DriverClientReqwest {
    async fn create_driver(&self, driver: &Driver) -> Result<Driver> {
        self.client.send(Method::POST, &["driver", "create"], driver).await
    }

    async fn update_driver(&self, driver: &Driver) -> Result<Driver> {
        self.client.send(Method::PUT, &["driver", "update"], driver).await
    }

    async fn delete_driver(&self, curp: &str) -> Result<()> {
        self.client.execute(Method::DELETE, &["driver", "delete", curp]).await
    }

    async fn get_driver_by_curp(&self, curp: &str) -> Result<Driver> {
        self.client.fetch(Method::GET, &["driver", "get", curp]).await
    }

    async fn get_all_drivers(&self) -> Result<Vec<Driver>> {
        self.client.fetch(Method::GET, &["driver", "getall"]).await
    }
}
