//! Product catalog and product application endpoints.

mod types;

pub use types::*;

use std::future::Future;

use reqwest::Method;
use tracing::debug;

use crate::error::AinfinitError;
use crate::rest::client::{AinfinitClient, NO_QUERY, with_segment};
use crate::rest::endpoints::product;
use crate::status::CommonStatus;
use crate::types::{Ack, DataResponse, Page};

/// Product catalog operations.
pub trait ProductApi: Send + Sync {
    /// Get the catalog size and last update time.
    fn latest_info(&self) -> impl Future<Output = Result<LatestInfo, AinfinitError>> + Send;

    /// List catalog products.
    fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> impl Future<Output = Result<Page<Product>, AinfinitError>> + Send;

    /// Get a catalog product by item code.
    fn product_detail(
        &self,
        item_code: &str,
    ) -> impl Future<Output = Result<Product, AinfinitError>> + Send;

    /// Find the products that cannot share a machine with the given ones.
    fn mutual_exclusion(
        &self,
        item_codes: &[String],
    ) -> impl Future<Output = Result<Page<String>, AinfinitError>> + Send;

    /// Apply for a new product. Returns the application id.
    fn apply_new_product(
        &self,
        application: &NewProductApplication,
    ) -> impl Future<Output = Result<i64, AinfinitError>> + Send;

    /// List product applications.
    fn list_applications(
        &self,
        request: &ProductApplicationListRequest,
    ) -> impl Future<Output = Result<Page<Product>, AinfinitError>> + Send;

    /// Get a product application by id.
    fn application_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Product, AinfinitError>> + Send;

    /// Change a pending product application.
    fn update_application(
        &self,
        application: &UpdateProductApplication,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;
}

/// Client for the product endpoints.
///
/// Obtained with [`AinfinitClient::products`].
#[derive(Debug, Clone)]
pub struct ProductClient {
    client: AinfinitClient,
}

impl ProductClient {
    pub(crate) fn new(client: AinfinitClient) -> Self {
        Self { client }
    }

    /// Get the catalog size and last update time.
    pub async fn latest_info(&self) -> Result<LatestInfo, AinfinitError> {
        debug!("Getting product catalog info");
        let response: DataResponse<LatestInfo> = self
            .client
            .get::<CommonStatus, _, _>(product::LATEST_INFO, NO_QUERY)
            .await?;
        debug!(count = response.data.count, "Got product catalog info");
        Ok(response.data)
    }

    /// List catalog products.
    pub async fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> Result<Page<Product>, AinfinitError> {
        debug!(page = ?request.page, limit = ?request.limit, "Listing products");
        let response: DataResponse<Page<Product>> = self
            .client
            .get::<CommonStatus, _, _>(product::LIST, request)
            .await?;
        debug!(total = response.data.total, "Listed products");
        Ok(response.data)
    }

    /// Get a catalog product by item code.
    pub async fn product_detail(&self, item_code: &str) -> Result<Product, AinfinitError> {
        let endpoint = with_segment(product::DETAIL, item_code)?;
        debug!(item_code, "Getting product detail");
        let response: DataResponse<Product> = self
            .client
            .get::<CommonStatus, _, _>(&endpoint, NO_QUERY)
            .await?;
        Ok(response.data)
    }

    /// Find the products that cannot share a machine with the given ones.
    pub async fn mutual_exclusion(
        &self,
        item_codes: &[String],
    ) -> Result<Page<String>, AinfinitError> {
        debug!(items = item_codes.len(), "Getting mutually exclusive products");
        let body = MutualExclusionRequest { item_codes };
        let response: DataResponse<Page<String>> = self
            .client
            .send_json::<CommonStatus, _, _, _>(Method::POST, product::EXCLUSION, NO_QUERY, &body)
            .await?;
        Ok(response.data)
    }

    /// Apply for a new product. Returns the application id.
    ///
    /// The application is rejected locally when the name is empty or the
    /// price is not positive.
    pub async fn apply_new_product(
        &self,
        application: &NewProductApplication,
    ) -> Result<i64, AinfinitError> {
        application.validate()?;
        debug!(name = %application.name, "Applying for new product");
        let form = application.to_form()?;
        let response: DataResponse<i64> = self
            .client
            .send_multipart::<CommonStatus, _>(Method::POST, product::APPLICATION, form)
            .await?;
        debug!(id = response.data, "Submitted product application");
        Ok(response.data)
    }

    /// List product applications.
    pub async fn list_applications(
        &self,
        request: &ProductApplicationListRequest,
    ) -> Result<Page<Product>, AinfinitError> {
        debug!(page = ?request.page, status = ?request.apply_status, "Listing product applications");
        let response: DataResponse<Page<Product>> = self
            .client
            .get::<CommonStatus, _, _>(product::APPLICATION_LIST, request)
            .await?;
        debug!(total = response.data.total, "Listed product applications");
        Ok(response.data)
    }

    /// Get a product application by id.
    pub async fn application_detail(&self, id: i64) -> Result<Product, AinfinitError> {
        let endpoint = with_segment(product::APPLICATION, &id.to_string())?;
        debug!(id, "Getting product application");
        let response: DataResponse<Product> = self
            .client
            .get::<CommonStatus, _, _>(&endpoint, NO_QUERY)
            .await?;
        Ok(response.data)
    }

    /// Change a pending product application.
    pub async fn update_application(
        &self,
        application: &UpdateProductApplication,
    ) -> Result<Ack, AinfinitError> {
        application.validate()?;
        debug!(id = application.id, "Updating product application");
        let form = application.to_form()?;
        let ack = self
            .client
            .send_multipart::<CommonStatus, _>(Method::PUT, product::APPLICATION, form)
            .await?;
        debug!(id = application.id, "Updated product application");
        Ok(ack)
    }
}

impl ProductApi for ProductClient {
    async fn latest_info(&self) -> Result<LatestInfo, AinfinitError> {
        ProductClient::latest_info(self).await
    }

    async fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> Result<Page<Product>, AinfinitError> {
        ProductClient::list_products(self, request).await
    }

    async fn product_detail(&self, item_code: &str) -> Result<Product, AinfinitError> {
        ProductClient::product_detail(self, item_code).await
    }

    async fn mutual_exclusion(&self, item_codes: &[String]) -> Result<Page<String>, AinfinitError> {
        ProductClient::mutual_exclusion(self, item_codes).await
    }

    async fn apply_new_product(
        &self,
        application: &NewProductApplication,
    ) -> Result<i64, AinfinitError> {
        ProductClient::apply_new_product(self, application).await
    }

    async fn list_applications(
        &self,
        request: &ProductApplicationListRequest,
    ) -> Result<Page<Product>, AinfinitError> {
        ProductClient::list_applications(self, request).await
    }

    async fn application_detail(&self, id: i64) -> Result<Product, AinfinitError> {
        ProductClient::application_detail(self, id).await
    }

    async fn update_application(
        &self,
        application: &UpdateProductApplication,
    ) -> Result<Ack, AinfinitError> {
        ProductClient::update_application(self, application).await
    }
}
