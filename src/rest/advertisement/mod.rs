//! Advertisement and source material endpoints.
//!
//! Media is first submitted as source materials, which the platform reviews.
//! Approved materials are combined into advertisements, which are then bound
//! to machines and switched on or off.

mod status;
mod types;

pub use status::*;
pub use types::*;

use std::future::Future;

use reqwest::Method;
use tracing::debug;

use crate::error::AinfinitError;
use crate::rest::client::{AinfinitClient, NO_QUERY, with_segment};
use crate::rest::endpoints::advertisement;
use crate::types::{Ack, DataResponse, OptionalDataResponse, Page};

/// Advertisement operations.
pub trait AdvertisementApi: Send + Sync {
    /// Submit source materials for review.
    fn apply_materials(
        &self,
        materials: &[NewSourceMaterial],
    ) -> impl Future<Output = Result<MaterialApplyResult, AinfinitError>> + Send;

    /// List source materials.
    fn list_materials(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<Page<SourceMaterial>, AinfinitError>> + Send;

    /// Get a source material by id.
    fn material_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<SourceMaterial, AinfinitError>> + Send;

    /// Remove a source material.
    fn delete_material(&self, id: i64) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Create an advertisement from approved materials.
    fn create_ad(
        &self,
        request: &NewAdRequest,
    ) -> impl Future<Output = Result<AdSummary, AinfinitError>> + Send;

    /// Change an advertisement.
    fn update_ad(
        &self,
        request: &AdUpdateRequest,
    ) -> impl Future<Output = Result<AdSummary, AinfinitError>> + Send;

    /// Remove an advertisement.
    fn delete_ad(&self, id: i64) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// List advertisements.
    fn list_ads(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<Page<Ad>, AinfinitError>> + Send;

    /// Get an advertisement by id.
    fn ad_detail(&self, id: i64) -> impl Future<Output = Result<Option<Ad>, AinfinitError>> + Send;

    /// Get the advertisement bound to a machine.
    fn ad_detail_by_machine(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Ad>, AinfinitError>> + Send;

    /// Bind an advertisement to machines.
    fn bind_ad_to_machines(
        &self,
        id: i64,
        request: &AdBindRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Switch a promotion on or off.
    fn set_promotion_status(
        &self,
        promotion_id: i64,
        status: PromotionStatus,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Get the promotion currently playing on a machine.
    fn machine_promotion(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Ad>, AinfinitError>> + Send;
}

/// Client for the advertisement endpoints.
///
/// Obtained with [`AinfinitClient::advertisements`].
#[derive(Debug, Clone)]
pub struct AdvertisementClient {
    client: AinfinitClient,
}

impl AdvertisementClient {
    pub(crate) fn new(client: AinfinitClient) -> Self {
        Self { client }
    }

    /// Submit source materials for review.
    pub async fn apply_materials(
        &self,
        materials: &[NewSourceMaterial],
    ) -> Result<MaterialApplyResult, AinfinitError> {
        if materials.is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "at least one source material is required".to_string(),
            ));
        }
        debug!(count = materials.len(), "Submitting source materials");
        let result: MaterialApplyResult = self
            .client
            .send_json::<SourceMaterialStatus, _, _, _>(
                Method::POST,
                advertisement::MATERIAL_APPLY,
                NO_QUERY,
                materials,
            )
            .await?;
        debug!(created = result.result.len(), "Submitted source materials");
        Ok(result)
    }

    /// List source materials.
    pub async fn list_materials(
        &self,
        request: &PageRequest,
    ) -> Result<Page<SourceMaterial>, AinfinitError> {
        debug!(page = ?request.page, page_size = ?request.page_size, "Listing source materials");
        let response: DataResponse<Page<SourceMaterial>> = self
            .client
            .get::<SourceMaterialStatus, _, _>(advertisement::MATERIAL_PAGE, request)
            .await?;
        debug!(total = response.data.total, "Listed source materials");
        Ok(response.data)
    }

    /// Get a source material by id.
    pub async fn material_detail(&self, id: i64) -> Result<SourceMaterial, AinfinitError> {
        let endpoint = with_segment(advertisement::MATERIAL_DETAIL, &id.to_string())?;
        debug!(id, "Getting source material");
        let response: DataResponse<SourceMaterial> = self
            .client
            .get::<SourceMaterialStatus, _, _>(&endpoint, NO_QUERY)
            .await?;
        Ok(response.data)
    }

    /// Remove a source material.
    pub async fn delete_material(&self, id: i64) -> Result<Ack, AinfinitError> {
        let endpoint = with_segment(advertisement::MATERIAL_DELETE, &id.to_string())?;
        debug!(id, "Deleting source material");
        let ack = self
            .client
            .send_empty::<SourceMaterialStatus, _, _>(Method::DELETE, &endpoint, NO_QUERY)
            .await?;
        debug!(id, "Deleted source material");
        Ok(ack)
    }

    /// Create an advertisement from approved materials.
    pub async fn create_ad(&self, request: &NewAdRequest) -> Result<AdSummary, AinfinitError> {
        request.validate()?;
        debug!(name = %request.name, materials = request.img_rel_list.len(), "Creating advertisement");
        let response: DataResponse<AdSummary> = self
            .client
            .send_json::<AdvertisementStatus, _, _, _>(
                Method::POST,
                advertisement::AD,
                NO_QUERY,
                request,
            )
            .await?;
        debug!(id = response.data.id, "Created advertisement");
        Ok(response.data)
    }

    /// Change an advertisement.
    ///
    /// The request is rejected locally when `id` is 0.
    pub async fn update_ad(&self, request: &AdUpdateRequest) -> Result<AdSummary, AinfinitError> {
        request.validate()?;
        debug!(id = request.id, "Updating advertisement");
        let response: DataResponse<AdSummary> = self
            .client
            .send_json::<AdvertisementStatus, _, _, _>(
                Method::PUT,
                advertisement::AD,
                NO_QUERY,
                request,
            )
            .await?;
        Ok(response.data)
    }

    /// Remove an advertisement.
    pub async fn delete_ad(&self, id: i64) -> Result<Ack, AinfinitError> {
        let endpoint = with_segment(advertisement::AD, &id.to_string())?;
        debug!(id, "Deleting advertisement");
        let ack = self
            .client
            .send_empty::<AdvertisementStatus, _, _>(Method::DELETE, &endpoint, NO_QUERY)
            .await?;
        debug!(id, "Deleted advertisement");
        Ok(ack)
    }

    /// List advertisements.
    pub async fn list_ads(&self, request: &PageRequest) -> Result<Page<Ad>, AinfinitError> {
        debug!(page = ?request.page, page_size = ?request.page_size, "Listing advertisements");
        let response: DataResponse<Page<Ad>> = self
            .client
            .get::<AdvertisementStatus, _, _>(advertisement::AD_PAGE, request)
            .await?;
        debug!(total = response.data.total, "Listed advertisements");
        Ok(response.data)
    }

    /// Get an advertisement by id.
    pub async fn ad_detail(&self, id: i64) -> Result<Option<Ad>, AinfinitError> {
        let endpoint = with_segment(advertisement::AD_DETAIL, &id.to_string())?;
        debug!(id, "Getting advertisement");
        let response: OptionalDataResponse<Ad> = self
            .client
            .get::<AdDetailStatus, _, _>(&endpoint, NO_QUERY)
            .await?;
        Ok(response.data)
    }

    /// Get the advertisement bound to a machine.
    pub async fn ad_detail_by_machine(&self, code: &str) -> Result<Option<Ad>, AinfinitError> {
        debug!(code, "Getting advertisement of vending machine");
        let response: OptionalDataResponse<Ad> = self
            .client
            .get::<AdDetailStatus, _, _>(advertisement::AD_DETAIL, &[("code", code)][..])
            .await?;
        Ok(response.data)
    }

    /// Bind an advertisement to machines.
    pub async fn bind_ad_to_machines(
        &self,
        id: i64,
        request: &AdBindRequest,
    ) -> Result<Ack, AinfinitError> {
        let endpoint = with_segment(advertisement::AD_BIND, &id.to_string())?;
        debug!(
            id,
            machines = request.vm_list.len() + request.scan_code_list.len(),
            "Binding advertisement"
        );
        self.client
            .send_json::<AdvertisementStatus, _, _, _>(Method::PUT, &endpoint, NO_QUERY, request)
            .await
    }

    /// Switch a promotion on or off.
    pub async fn set_promotion_status(
        &self,
        promotion_id: i64,
        status: PromotionStatus,
    ) -> Result<Ack, AinfinitError> {
        let endpoint = with_segment(advertisement::PROMOTION_STATUS, &promotion_id.to_string())?;
        let endpoint = with_segment(&endpoint, &status.code().to_string())?;
        debug!(promotion_id, ?status, "Setting promotion status");
        self.client
            .send_empty::<AdvertisementStatus, _, _>(Method::PUT, &endpoint, NO_QUERY)
            .await
    }

    /// Get the promotion currently playing on a machine.
    pub async fn machine_promotion(&self, code: &str) -> Result<Option<Ad>, AinfinitError> {
        debug!(code, "Getting promotion of vending machine");
        let response: OptionalDataResponse<Ad> = self
            .client
            .get::<AdDetailStatus, _, _>(advertisement::MACHINE_PROMOTION, &[("code", code)][..])
            .await?;
        Ok(response.data)
    }
}

impl AdvertisementApi for AdvertisementClient {
    async fn apply_materials(
        &self,
        materials: &[NewSourceMaterial],
    ) -> Result<MaterialApplyResult, AinfinitError> {
        AdvertisementClient::apply_materials(self, materials).await
    }

    async fn list_materials(
        &self,
        request: &PageRequest,
    ) -> Result<Page<SourceMaterial>, AinfinitError> {
        AdvertisementClient::list_materials(self, request).await
    }

    async fn material_detail(&self, id: i64) -> Result<SourceMaterial, AinfinitError> {
        AdvertisementClient::material_detail(self, id).await
    }

    async fn delete_material(&self, id: i64) -> Result<Ack, AinfinitError> {
        AdvertisementClient::delete_material(self, id).await
    }

    async fn create_ad(&self, request: &NewAdRequest) -> Result<AdSummary, AinfinitError> {
        AdvertisementClient::create_ad(self, request).await
    }

    async fn update_ad(&self, request: &AdUpdateRequest) -> Result<AdSummary, AinfinitError> {
        AdvertisementClient::update_ad(self, request).await
    }

    async fn delete_ad(&self, id: i64) -> Result<Ack, AinfinitError> {
        AdvertisementClient::delete_ad(self, id).await
    }

    async fn list_ads(&self, request: &PageRequest) -> Result<Page<Ad>, AinfinitError> {
        AdvertisementClient::list_ads(self, request).await
    }

    async fn ad_detail(&self, id: i64) -> Result<Option<Ad>, AinfinitError> {
        AdvertisementClient::ad_detail(self, id).await
    }

    async fn ad_detail_by_machine(&self, code: &str) -> Result<Option<Ad>, AinfinitError> {
        AdvertisementClient::ad_detail_by_machine(self, code).await
    }

    async fn bind_ad_to_machines(
        &self,
        id: i64,
        request: &AdBindRequest,
    ) -> Result<Ack, AinfinitError> {
        AdvertisementClient::bind_ad_to_machines(self, id, request).await
    }

    async fn set_promotion_status(
        &self,
        promotion_id: i64,
        status: PromotionStatus,
    ) -> Result<Ack, AinfinitError> {
        AdvertisementClient::set_promotion_status(self, promotion_id, status).await
    }

    async fn machine_promotion(&self, code: &str) -> Result<Option<Ad>, AinfinitError> {
        AdvertisementClient::machine_promotion(self, code).await
    }
}
