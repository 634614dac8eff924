//! Types for door, order and replenishment endpoints.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::DoorResultStatus;
use crate::error::AinfinitError;
use crate::types::serde_helpers::null_as_default;

/// Why a door is being opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OpenDoorType {
    #[default]
    Shopping,
    Replenishment,
}

impl From<OpenDoorType> for u8 {
    fn from(kind: OpenDoorType) -> u8 {
        match kind {
            OpenDoorType::Shopping => 1,
            OpenDoorType::Replenishment => 2,
        }
    }
}

impl TryFrom<u8> for OpenDoorType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Shopping),
            2 => Ok(Self::Replenishment),
            other => Err(format!("unknown open door type: {other}")),
        }
    }
}

/// A request to open a machine's door.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDoorRequest {
    #[serde(rename = "type")]
    pub kind: OpenDoorType,
    /// Caller-chosen id used to look up the outcome; required.
    pub request_id: String,
    /// The shopper or operator.
    pub user_code: Option<String>,
    /// Caller's clock, milliseconds since the Unix epoch.
    pub local_timestamp: Option<i64>,
}

impl OpenDoorRequest {
    pub fn new(kind: OpenDoorType, request_id: impl Into<String>) -> Self {
        Self {
            kind,
            request_id: request_id.into(),
            ..Default::default()
        }
    }

    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.request_id.trim().is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "open door request id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Query string of the open-door call.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenDoorQuery<'a> {
    pub code: &'a str,
    #[serde(rename = "type")]
    pub kind: OpenDoorType,
    pub request_id: &'a str,
    pub user_code: Option<&'a str>,
    pub local_timestamp: Option<i64>,
}

impl<'a> OpenDoorQuery<'a> {
    pub(crate) fn new(code: &'a str, request: &'a OpenDoorRequest) -> Self {
        Self {
            code,
            kind: request.kind,
            request_id: &request.request_id,
            user_code: request.user_code.as_deref(),
            local_timestamp: request.local_timestamp,
        }
    }
}

/// Order created by an open-door request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenDoorOrder {
    pub order_code: String,
}

/// Identifies an earlier open-door request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DoorRequestQuery<'a> {
    pub code: &'a str,
    #[serde(rename = "type")]
    pub kind: OpenDoorType,
    pub request_id: &'a str,
}

/// A product line of an order or machine.
///
/// Prices are in cents.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goods {
    pub item_code: String,
    /// Selling price.
    pub actual_price: Option<i64>,
    /// List price.
    pub original_price: Option<i64>,
    pub count: Option<i64>,
}

impl Goods {
    pub fn new(item_code: impl Into<String>, actual_price: i64, original_price: i64) -> Self {
        Self {
            item_code: item_code.into(),
            actual_price: Some(actual_price),
            original_price: Some(original_price),
            count: None,
        }
    }
}

/// A shopping or replenishment order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub trade_request_id: String,
    pub order_code: String,
    pub vm_code: String,
    pub machine_id: i64,
    pub user_code: String,
    /// Settlement state, see [`crate::callbacks::HandleStatus`].
    pub handle_status: i32,
    pub shop_move: i32,
    /// Total in cents.
    pub total_fee: i64,
    /// Milliseconds since the Unix epoch.
    pub open_door_time: i64,
    pub close_door_time: i64,
    /// Grams on the shelves when the door opened.
    pub open_door_weight: i64,
    pub close_door_weight: i64,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub order_goods_list: Vec<Goods>,
}

/// Order details attached to a door result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoorOrder {
    #[serde(flatten)]
    pub order: Order,
    pub scan_code: String,
}

/// Raw door result response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DoorResultResponse {
    pub status: i64,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub message: String,
    #[serde(default)]
    pub data: Option<DoorOrder>,
}

/// Outcome of an open-door request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorResult {
    /// `Opened` or `Closed`.
    pub status: DoorResultStatus,
    pub message: String,
    /// The order, once the platform has one.
    pub order: Option<DoorOrder>,
}

/// Query for the order list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersRequest {
    /// Milliseconds since the Unix epoch.
    pub begin_time: Option<i64>,
    pub end_time: Option<i64>,
    /// Defaults to 1 on the platform.
    pub page: Option<u32>,
    /// Defaults to 10, at most 50.
    pub limit: Option<u32>,
}

impl ListOrdersRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Only orders between `begin` and `end` (milliseconds).
    pub fn between(mut self, begin: i64, end: i64) -> Self {
        self.begin_time = Some(begin);
        self.end_time = Some(end);
        self
    }
}

/// Query string of the order list.
#[derive(Debug, Serialize)]
pub(crate) struct ListOrdersQuery<'a> {
    pub code: &'a str,
    #[serde(flatten)]
    pub request: &'a ListOrdersRequest,
}

/// Upload state of an order video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum VideoStatus {
    PendingUpload,
    UploadComplete,
    DoesNotExist,
    NetworkError,
    Uploading,
}

impl From<VideoStatus> for i8 {
    fn from(status: VideoStatus) -> i8 {
        match status {
            VideoStatus::PendingUpload => -1,
            VideoStatus::UploadComplete => 0,
            VideoStatus::DoesNotExist => 1,
            VideoStatus::NetworkError => 2,
            VideoStatus::Uploading => 3,
        }
    }
}

impl TryFrom<i8> for VideoStatus {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::PendingUpload),
            0 => Ok(Self::UploadComplete),
            1 => Ok(Self::DoesNotExist),
            2 => Ok(Self::NetworkError),
            3 => Ok(Self::Uploading),
            other => Err(format!("unknown video status: {other}")),
        }
    }
}

/// Video recorded while the door was open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderVideo {
    pub order_code: String,
    pub video_url: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub video_urls: Vec<String>,
    pub video_status: Option<VideoStatus>,
}

impl OrderVideo {
    /// Whether the video can be downloaded.
    pub fn is_ready(&self) -> bool {
        self.video_status == Some(VideoStatus::UploadComplete)
    }
}

/// Body of the goods removal call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteGoodsRequest<'a> {
    pub item_codes: &'a [String],
}

/// New prices for a set of machines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateRequest {
    pub vm_codes: Vec<String>,
    pub items: Vec<Goods>,
}

impl PriceUpdateRequest {
    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.items.is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "price update needs at least one item".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_door_query() {
        let mut request = OpenDoorRequest::new(OpenDoorType::Replenishment, "req-1");
        request.local_timestamp = Some(1557218157315);
        let query = OpenDoorQuery::new("VM001", &request);
        assert_eq!(
            serde_urlencoded::to_string(&query).unwrap(),
            "code=VM001&type=2&requestId=req-1&localTimestamp=1557218157315"
        );
    }

    #[test]
    fn test_open_door_validation() {
        assert!(OpenDoorRequest::new(OpenDoorType::Shopping, "r").validate().is_ok());
        assert!(OpenDoorRequest::new(OpenDoorType::Shopping, "").validate().is_err());
        assert!(OpenDoorRequest::new(OpenDoorType::Shopping, "  ").validate().is_err());
    }

    #[test]
    fn test_list_orders_query() {
        let request = ListOrdersRequest::new(1, 50).between(1000, 2000);
        let query = ListOrdersQuery {
            code: "VM001",
            request: &request,
        };
        assert_eq!(
            serde_urlencoded::to_string(&query).unwrap(),
            "code=VM001&beginTime=1000&endTime=2000&page=1&limit=50"
        );
    }

    #[test]
    fn test_door_order_deserialize() {
        let json = r#"{
            "orderCode": "O1",
            "vmCode": "VM001",
            "handleStatus": 2,
            "totalFee": 700,
            "orderGoodsList": [{"itemCode": "A1", "actualPrice": 350, "count": 2}],
            "scanCode": "SC1"
        }"#;
        let order: DoorOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order.order_code, "O1");
        assert_eq!(order.order.order_goods_list[0].count, Some(2));
        assert_eq!(order.scan_code, "SC1");
    }

    #[test]
    fn test_video_status() {
        let video: OrderVideo =
            serde_json::from_str(r#"{"orderCode":"O1","videoUrls":null,"videoStatus":-1}"#).unwrap();
        assert_eq!(video.video_status, Some(VideoStatus::PendingUpload));
        assert!(!video.is_ready());
        assert!(video.video_urls.is_empty());
    }

    #[test]
    fn test_goods_body_skips_unset_fields() {
        assert_eq!(
            serde_json::to_string(&Goods::new("A1", 300, 350)).unwrap(),
            r#"{"itemCode":"A1","actualPrice":300,"originalPrice":350}"#
        );
    }
}
