use super::DownstreamClient;
use crate::api::models::assignments::VehicleAssignment;
use crate::errors::Result;
use async_trait::async_trait;
use axum::http::Method;

/// Operations of the vehicle assignments service.
#[async_trait]
pub trait VehicleAssignmentClient: Send + Sync {
    async fn find_by_status(&self, status: &str) -> Result<Vec<VehicleAssignment>>;
    async fn assignments_history(&self) -> Result<Vec<VehicleAssignment>>;
    async fn find_by_vin(&self, vin: &str) -> Result<VehicleAssignment>;
    async fn assign_vehicle_to_driver(&self, assignment: &VehicleAssignment) -> Result<VehicleAssignment>;
    async fn release_vehicle_from_driver(&self, assignment: &VehicleAssignment) -> Result<VehicleAssignment>;
    async fn change_driver(&self, assignment: &VehicleAssignment) -> Result<VehicleAssignment>;
}

pub struct VehicleAssignmentClientReqwest {
    client: DownstreamClient,
}

impl VehicleAssignmentClientReqwest {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VehicleAssignmentClient for VehicleAssignmentClientReqwest {
    async fn find_by_status(&self, status: &str) -> Result<Vec<VehicleAssignment>> {
        self.client
            .fetch(Method::GET, &["vehicle", "assignment", "status", status])
            .await
    }

    async fn assignments_history(&self) -> Result<Vec<VehicleAssignment>> {
        self.client.fetch(Method::GET, &["vehicle", "assignment", "history"]).await
    }

    async fn find_by_vin(&self, vin: &str) -> Result<VehicleAssignment> {
        self.client.fetch(Method::GET, &["vehicle", "assignment", "vin", vin]).await
    }

    async fn assign_vehicle_to_driver(&self, assignment: &VehicleAssignment) -> Result<VehicleAssignment> {
        self.client
            .send(Method::POST, &["vehicle", "assignment", "assign"], assignment)
            .await
    }

    async fn release_vehicle_from_driver(&self, assignment: &VehicleAssignment) -> Result<VehicleAssignment> {
        self.client
            .send(Method::POST, &["vehicle", "assignment", "release"], assignment)
            .await
    }

    async fn change_driver(&self, assignment: &VehicleAssignment) -> Result<VehicleAssignment> {
        self.client
            .send(Method::PUT, &["vehicle", "assignment", "change"], assignment)
            .await
    }
}
