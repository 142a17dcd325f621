use super::DownstreamClient;
use crate::api::models::routes::Route;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the routes service.
#[async_trait]
pub trait RouteClient: Send + Sync {
    async fn create_route(&self, route: &Route) -> Result<Route>;
    async fn update_route(&self, route: &Route) -> Result<Route>;
    /// Returns the route as it was before deletion.
    async fn delete_route(&self, vin: &str) -> Result<Route>;
    async fn get_all_routes(&self) -> Result<Vec<Route>>;
    async fn get_route_by_vin(&self, vin: &str) -> Result<Route>;
}

pub struct RouteClientReqwest {
    client: DownstreamClient,
}

impl RouteClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RouteClient for RouteClientReqwest {
    async fn create_route(&self, route: &Route) -> Result<Route> {
        self.client.send(Method::POST, &["route", "create"], route).await
    }

    async fn update_route(&self, route: &Route) -> Result<Route> {
        self.client.send(Method::PUT, &["route", "update"], route).await
    }

    async fn delete_route(&self, vin: &str) -> Result<Route> {
        self.client.fetch(Method::DELETE, &["route", "delete", vin]).await
    }

    async fn get_all_routes(&self) -> Result<Vec<Route>> {
        self.client.fetch(Method::GET, &["route", "getall"]).await
    }

    async fn get_route_by_vin(&self, vin: &str) -> Result<Route> {
        self.client.fetch(Method::GET, &["route", "get", vin]).await
    }
}
