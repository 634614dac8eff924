//! Door control, order and replenishment endpoints.
//!
//! Opening a door is asynchronous: [`OperationApi::open_door`] only queues
//! the command. Poll [`OperationApi::door_result`] with the same request id
//! to learn whether the door opened, and fetch the order once it closed.

mod status;
mod types;

pub use status::*;
pub use types::*;

use std::future::Future;

use reqwest::Method;
use tracing::{debug, warn};

use crate::error::{AinfinitError, ApiError};
use crate::rest::client::AinfinitClient;
use crate::rest::endpoints::operation;
use crate::status::{CommonStatus, StatusTable};
use crate::types::{Ack, DataResponse, Page, ResultList};

/// Envelope status the door result endpoint uses for a failed opening.
const DOOR_BACKGROUND_PROCESS: i64 = 204;

/// Door, order and replenishment operations.
pub trait OperationApi: Send + Sync {
    /// Ask a machine to open its door.
    fn open_door(
        &self,
        code: &str,
        request: &OpenDoorRequest,
    ) -> impl Future<Output = Result<OpenDoorOrder, AinfinitError>> + Send;

    /// Look up the outcome of an open-door request.
    fn door_result(
        &self,
        code: &str,
        kind: OpenDoorType,
        request_id: &str,
    ) -> impl Future<Output = Result<DoorResult, AinfinitError>> + Send;

    /// List a machine's orders.
    fn list_orders(
        &self,
        code: &str,
        request: &ListOrdersRequest,
    ) -> impl Future<Output = Result<Page<Order>, AinfinitError>> + Send;

    /// Get the video recorded during an order or replenishment.
    fn order_video(
        &self,
        code: &str,
        kind: OpenDoorType,
        request_id: &str,
    ) -> impl Future<Output = Result<OrderVideo, AinfinitError>> + Send;

    /// List the goods a machine sells.
    fn machine_goods(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<ResultList<Goods>, AinfinitError>> + Send;

    /// Add goods to a machine.
    fn add_goods(
        &self,
        code: &str,
        goods: &[Goods],
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Replace all goods of a machine.
    fn replace_goods(
        &self,
        code: &str,
        goods: &[Goods],
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Remove goods from a machine.
    fn delete_goods(
        &self,
        code: &str,
        item_codes: &[String],
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Change prices on a set of machines.
    fn update_prices(
        &self,
        code: &str,
        request: &PriceUpdateRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;
}

/// Client for the operation endpoints.
///
/// Obtained with [`AinfinitClient::operations`].
#[derive(Debug, Clone)]
pub struct OperationClient {
    client: AinfinitClient,
}

impl OperationClient {
    pub(crate) fn new(client: AinfinitClient) -> Self {
        Self { client }
    }

    /// Ask a machine to open its door.
    ///
    /// The request is rejected locally when `request_id` is empty.
    pub async fn open_door(
        &self,
        code: &str,
        request: &OpenDoorRequest,
    ) -> Result<OpenDoorOrder, AinfinitError> {
        request.validate()?;
        debug!(code, kind = ?request.kind, request_id = %request.request_id, "Opening door");
        let query = OpenDoorQuery::new(code, request);
        let response: DataResponse<OpenDoorOrder> = self
            .client
            .send_empty::<OpenDoorStatus, _, _>(Method::PUT, operation::OPEN_DOOR, &query)
            .await?;
        debug!(code, order_code = %response.data.order_code, "Door open requested");
        Ok(response.data)
    }

    /// Look up the outcome of an open-door request.
    ///
    /// Succeeds while the door is open or after it closed normally; every
    /// failure state, including the platform's 204, is an error.
    pub async fn door_result(
        &self,
        code: &str,
        kind: OpenDoorType,
        request_id: &str,
    ) -> Result<DoorResult, AinfinitError> {
        debug!(code, ?kind, request_id, "Getting door result");
        let query = DoorRequestQuery {
            code,
            kind,
            request_id,
        };
        let response: DoorResultResponse = self
            .client
            .get::<DoorResultStatus, _, _>(operation::DOOR_RESULT, &query)
            .await?;

        if response.status == DOOR_BACKGROUND_PROCESS {
            let error = ApiError::from_status::<DoorResultStatus>(response.status, response.message);
            warn!(code, request_id, error = %error, "Door failed to open");
            return Err(AinfinitError::Api(error));
        }

        let status = DoorResultStatus::from_code(response.status);
        debug!(code, request_id, %status, "Got door result");
        Ok(DoorResult {
            status,
            message: response.message,
            order: response.data,
        })
    }

    /// List a machine's orders.
    pub async fn list_orders(
        &self,
        code: &str,
        request: &ListOrdersRequest,
    ) -> Result<Page<Order>, AinfinitError> {
        debug!(code, page = ?request.page, limit = ?request.limit, "Listing orders");
        let query = ListOrdersQuery { code, request };
        let response: DataResponse<Page<Order>> = self
            .client
            .get::<CommonStatus, _, _>(operation::ORDERS, &query)
            .await?;
        debug!(code, total = response.data.total, "Listed orders");
        Ok(response.data)
    }

    /// Get the video recorded during an order or replenishment.
    pub async fn order_video(
        &self,
        code: &str,
        kind: OpenDoorType,
        request_id: &str,
    ) -> Result<OrderVideo, AinfinitError> {
        debug!(code, ?kind, request_id, "Getting order video");
        let query = DoorRequestQuery {
            code,
            kind,
            request_id,
        };
        let response: DataResponse<OrderVideo> = self
            .client
            .get::<OrderVideoStatus, _, _>(operation::ORDER_VIDEO, &query)
            .await?;
        debug!(code, status = ?response.data.video_status, "Got order video");
        Ok(response.data)
    }

    /// List the goods a machine sells.
    pub async fn machine_goods(&self, code: &str) -> Result<ResultList<Goods>, AinfinitError> {
        debug!(code, "Getting machine goods");
        let goods: ResultList<Goods> = self
            .client
            .get::<MachineGoodsStatus, _, _>(operation::GOODS, &[("code", code)][..])
            .await?;
        debug!(code, count = goods.count, "Got machine goods");
        Ok(goods)
    }

    /// Add goods to a machine.
    pub async fn add_goods(&self, code: &str, goods: &[Goods]) -> Result<Ack, AinfinitError> {
        debug!(code, items = goods.len(), "Adding machine goods");
        self.client
            .send_json::<GoodsChangeStatus, _, _, _>(
                Method::PUT,
                operation::GOODS,
                &[("code", code)][..],
                goods,
            )
            .await
    }

    /// Replace all goods of a machine.
    pub async fn replace_goods(&self, code: &str, goods: &[Goods]) -> Result<Ack, AinfinitError> {
        debug!(code, items = goods.len(), "Replacing machine goods");
        self.client
            .send_json::<GoodsChangeStatus, _, _, _>(
                Method::POST,
                operation::GOODS,
                &[("code", code)][..],
                goods,
            )
            .await
    }

    /// Remove goods from a machine.
    pub async fn delete_goods(
        &self,
        code: &str,
        item_codes: &[String],
    ) -> Result<Ack, AinfinitError> {
        if item_codes.is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "at least one item code is required".to_string(),
            ));
        }
        debug!(code, items = item_codes.len(), "Deleting machine goods");
        let body = DeleteGoodsRequest { item_codes };
        self.client
            .send_json::<DeleteGoodsStatus, _, _, _>(
                Method::DELETE,
                operation::GOODS,
                &[("code", code)][..],
                &body,
            )
            .await
    }

    /// Change prices on a set of machines.
    pub async fn update_prices(
        &self,
        code: &str,
        request: &PriceUpdateRequest,
    ) -> Result<Ack, AinfinitError> {
        request.validate()?;
        debug!(
            code,
            machines = request.vm_codes.len(),
            items = request.items.len(),
            "Updating prices"
        );
        self.client
            .send_json::<PriceUpdateStatus, _, _, _>(
                Method::POST,
                operation::PRICES,
                &[("code", code)][..],
                request,
            )
            .await
    }
}

impl OperationApi for OperationClient {
    async fn open_door(
        &self,
        code: &str,
        request: &OpenDoorRequest,
    ) -> Result<OpenDoorOrder, AinfinitError> {
        OperationClient::open_door(self, code, request).await
    }

    async fn door_result(
        &self,
        code: &str,
        kind: OpenDoorType,
        request_id: &str,
    ) -> Result<DoorResult, AinfinitError> {
        OperationClient::door_result(self, code, kind, request_id).await
    }

    async fn list_orders(
        &self,
        code: &str,
        request: &ListOrdersRequest,
    ) -> Result<Page<Order>, AinfinitError> {
        OperationClient::list_orders(self, code, request).await
    }

    async fn order_video(
        &self,
        code: &str,
        kind: OpenDoorType,
        request_id: &str,
    ) -> Result<OrderVideo, AinfinitError> {
        OperationClient::order_video(self, code, kind, request_id).await
    }

    async fn machine_goods(&self, code: &str) -> Result<ResultList<Goods>, AinfinitError> {
        OperationClient::machine_goods(self, code).await
    }

    async fn add_goods(&self, code: &str, goods: &[Goods]) -> Result<Ack, AinfinitError> {
        OperationClient::add_goods(self, code, goods).await
    }

    async fn replace_goods(&self, code: &str, goods: &[Goods]) -> Result<Ack, AinfinitError> {
        OperationClient::replace_goods(self, code, goods).await
    }

    async fn delete_goods(&self, code: &str, item_codes: &[String]) -> Result<Ack, AinfinitError> {
        OperationClient::delete_goods(self, code, item_codes).await
    }

    async fn update_prices(
        &self,
        code: &str,
        request: &PriceUpdateRequest,
    ) -> Result<Ack, AinfinitError> {
        OperationClient::update_prices(self, code, request).await
    }
}
