use async_trait::async_trait;
use reqwest::Method;
use std::marker::PhantomData;
use tracing::{info, instrument};
use uuid::Uuid;

use super::api_client::ApiClient;
use super::resource::Resource;
use crate::errors::ServiceError;
use crate::models::{Downtime, Preventive, WorkOrder};

/// CRUD operations a screen needs from a collection.
#[async_trait]
pub trait CrudApi<R: Resource>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<R>, ServiceError>;
    async fn get_by_id(&self, id: Uuid) -> Result<R, ServiceError>;
    async fn create(&self, record: &R) -> Result<R, ServiceError>;
    async fn update(&self, record: &R) -> Result<R, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// HTTP-backed service for one resource type.
pub struct ResourceService<R> {
    client: ApiClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get_all(&self) -> Result<Vec<R>, ServiceError> {
        self.client.get_json(&[R::PATH], &[]).await
    }

    /// `get_all` narrowed by query parameters understood by the backend.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn search(&self, params: &[(&str, &str)]) -> Result<Vec<R>, ServiceError> {
        self.client.get_json(&[R::PATH], params).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<R, ServiceError> {
        let id = id.to_string();
        self.client.get_json(&[R::PATH, id.as_str()], &[]).await
    }

    #[instrument(skip(self, record), fields(resource = R::PATH, id = %record.id()))]
    pub async fn create(&self, record: &R) -> Result<R, ServiceError> {
        record.validate()?;
        let created: R = self
            .client
            .send_json(Method::POST, &[R::PATH], record)
            .await?;
        info!(id = %created.id(), "{} created", R::LABEL);
        Ok(created)
    }

    #[instrument(skip(self, record), fields(resource = R::PATH, id = %record.id()))]
    pub async fn update(&self, record: &R) -> Result<R, ServiceError> {
        record.validate()?;
        let id = record.id().to_string();
        let updated: R = self
            .client
            .send_json(Method::PUT, &[R::PATH, id.as_str()], record)
            .await?;
        info!("{} updated", R::LABEL);
        Ok(updated)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let id_segment = id.to_string();
        self.client.delete(&[R::PATH, id_segment.as_str()]).await?;
        info!(%id, "{} deleted", R::LABEL);
        Ok(())
    }
}

#[async_trait]
impl<R: Resource> CrudApi<R> for ResourceService<R> {
    async fn get_all(&self) -> Result<Vec<R>, ServiceError> {
        ResourceService::<R>::get_all(self).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<R, ServiceError> {
        ResourceService::<R>::get_by_id(self, id).await
    }

    async fn create(&self, record: &R) -> Result<R, ServiceError> {
        ResourceService::<R>::create(self, record).await
    }

    async fn update(&self, record: &R) -> Result<R, ServiceError> {
        ResourceService::<R>::update(self, record).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        ResourceService::<R>::delete(self, id).await
    }
}

impl ResourceService<WorkOrder> {
    pub async fn for_machine(&self, machine_id: Uuid) -> Result<Vec<WorkOrder>, ServiceError> {
        let machine_id = machine_id.to_string();
        self.search(&[("machineId", machine_id.as_str())]).await
    }
}

impl ResourceService<Preventive> {
    pub async fn for_machine(&self, machine_id: Uuid) -> Result<Vec<Preventive>, ServiceError> {
        let machine_id = machine_id.to_string();
        self.search(&[("machineId", machine_id.as_str())]).await
    }
}

impl ResourceService<Downtime> {
    pub async fn for_machine(&self, machine_id: Uuid) -> Result<Vec<Downtime>, ServiceError> {
        let machine_id = machine_id.to_string();
        self.search(&[("machineId", machine_id.as_str())]).await
    }
}
