//! Payloads of the notifications the platform sends to the merchant.
//!
//! The platform POSTs JSON to merchant-configured URLs when something
//! happens on its side: alarms, review results, catalog changes, door events
//! and order settlement. This module only describes the bodies; serving the
//! URLs is up to the application. Every notification expects a
//! [`CallbackAck`] in reply.
//!
//! Numeric codes that may grow over time decode into an `Unknown` variant
//! instead of failing, so a new vendor code never drops a notification.
//!
//! # Example
//!
//! ```rust
//! use ainfinit_api_client::callbacks::{AlarmNotification, CallbackAck};
//!
//! let body = br#"{"exCode":2,"notifyTime":1557218157315,"status":0,"vmCode":"VM001","vmName":"Lobby"}"#;
//! let alarm = AlarmNotification::parse("client_warning", body).unwrap();
//! assert!(matches!(alarm, AlarmNotification::Maintenance(_)));
//!
//! let reply = serde_json::to_string(&CallbackAck::ok()).unwrap();
//! assert_eq!(reply, r#"{"status":200,"message":"success"}"#);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AinfinitError;
use crate::types::serde_helpers::null_as_default;

/// Reply to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackAck {
    pub status: i64,
    pub message: String,
}

impl CallbackAck {
    /// The reply the platform expects after a notification was handled.
    pub fn ok() -> Self {
        Self {
            status: 200,
            message: "success".to_string(),
        }
    }

    /// Ask the platform to treat the notification as not delivered.
    pub fn error(status: i64, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// The `action` query parameter of alarm notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmAction {
    /// Hardware maintenance alarm.
    ClientWarning,
    /// Operational alarm.
    OperatingException,
}

impl FromStr for AlarmAction {
    type Err = AinfinitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client_warning" => Ok(Self::ClientWarning),
            "operating_exception" => Ok(Self::OperatingException),
            other => Err(AinfinitError::InvalidResponse(format!(
                "unknown alarm action: {other}"
            ))),
        }
    }
}

/// A maintenance alarm was raised or cleared.
///
/// A low temperature alarm (below 3°C) fires at most once per machine per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceAlarm {
    /// Alarm code, e.g. 1 camera, 2 UPS power, 128 weight sensor.
    pub ex_code: i64,
    /// Milliseconds since the Unix epoch.
    pub notify_time: i64,
    /// 0 raised, 1 cleared.
    pub status: i32,
    pub vm_code: String,
    pub vm_name: String,
    /// QR sticker code.
    pub scan_code: String,
}

impl MaintenanceAlarm {
    /// Whether the alarm condition has ended.
    pub fn is_recovered(&self) -> bool {
        self.status == 1
    }
}

/// Kind of an operational alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum OperationalExceptionType {
    /// Weight changed outside a shopping session.
    WeightAnomaly,
    /// Lock anomaly outside a shopping session.
    DoorLockAnomaly,
    /// Switched to UPS power.
    UpsPower,
    ShoppingLockTimeout,
    RestockLockTimeout,
    ShoppingTimeout,
    ForeignIntrusion,
    InventoryMismatch,
    /// Door opened without a shopping session.
    UnauthorizedDoor,
    Unknown(u8),
}

impl From<u8> for OperationalExceptionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::WeightAnomaly,
            2 => Self::DoorLockAnomaly,
            3 => Self::UpsPower,
            4 => Self::ShoppingLockTimeout,
            5 => Self::RestockLockTimeout,
            6 => Self::ShoppingTimeout,
            7 => Self::ForeignIntrusion,
            8 => Self::InventoryMismatch,
            9 => Self::UnauthorizedDoor,
            other => Self::Unknown(other),
        }
    }
}

impl From<OperationalExceptionType> for u8 {
    fn from(kind: OperationalExceptionType) -> u8 {
        match kind {
            OperationalExceptionType::WeightAnomaly => 1,
            OperationalExceptionType::DoorLockAnomaly => 2,
            OperationalExceptionType::UpsPower => 3,
            OperationalExceptionType::ShoppingLockTimeout => 4,
            OperationalExceptionType::RestockLockTimeout => 5,
            OperationalExceptionType::ShoppingTimeout => 6,
            OperationalExceptionType::ForeignIntrusion => 7,
            OperationalExceptionType::InventoryMismatch => 8,
            OperationalExceptionType::UnauthorizedDoor => 9,
            OperationalExceptionType::Unknown(other) => other,
        }
    }
}

/// An operational alarm.
///
/// A weight anomaly is reported twice with the same `ex_id`: once when it
/// happens and again when its video is uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalAlarm {
    #[serde(default)]
    pub vm_name: String,
    pub vm_code: String,
    /// Door-open request id, only for shopping related alarms.
    #[serde(default)]
    pub request_id: Option<String>,
    pub ex_id: String,
    pub ex_type: OperationalExceptionType,
    /// Free-form detail such as `lockopen_doorclose`.
    #[serde(default)]
    pub ex_detail: String,
    /// Machine clock, milliseconds since the Unix epoch.
    #[serde(default)]
    pub send_time: i64,
    #[serde(default)]
    pub video_url: Option<String>,
    /// -1 not uploaded, 0 uploaded, 1 not found, 2 upload failed.
    #[serde(default)]
    pub video_status: Option<i8>,
    #[serde(default)]
    pub video_send_time: Option<i64>,
    #[serde(default)]
    pub scan_code: Option<String>,
}

/// An alarm notification, typed by its `action` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmNotification {
    Maintenance(MaintenanceAlarm),
    Operational(OperationalAlarm),
}

impl AlarmNotification {
    /// Decode an alarm body according to the `action` query parameter.
    pub fn parse(action: &str, body: &[u8]) -> Result<Self, AinfinitError> {
        Ok(match action.parse::<AlarmAction>()? {
            AlarmAction::ClientWarning => Self::Maintenance(serde_json::from_slice(body)?),
            AlarmAction::OperatingException => Self::Operational(serde_json::from_slice(body)?),
        })
    }
}

/// Review result of a product application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductReviewNotification {
    /// Application id.
    pub id: i64,
    /// 2 approved, 3 rejected.
    pub status: i32,
    /// Assigned product code, only when approved.
    pub item_code: Option<String>,
    /// "1" name, "2" barcode, "3" image, "4" other.
    pub reject_type: Option<String>,
    pub reject_reason: Option<String>,
}

impl ProductReviewNotification {
    pub fn is_approved(&self) -> bool {
        self.status == 2
    }
}

/// The `action` query parameter of product change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductChangeAction {
    Add,
    Update,
    Delete,
}

/// A catalog product was added, changed or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductChangeNotification {
    /// Product code.
    pub code: String,
    /// 1 single item, 2 bundle.
    pub coll_type: i32,
    pub image_url: String,
    /// Items of a bundle, empty for single items.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub item_codes: Vec<String>,
    pub name: String,
    /// Cents.
    pub price: i64,
    /// 1 listed, 2 unlisted.
    pub status: i32,
    /// Grams.
    pub weight: i64,
}

/// An advertisement went online or offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvertisementStatusNotification {
    pub id: i64,
    pub name: String,
    /// 1 online, 2 offline.
    pub status: i32,
}

impl AdvertisementStatusNotification {
    pub fn is_online(&self) -> bool {
        self.status == 1
    }
}

/// Material id in a review notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewedMaterial {
    pub id: i64,
}

/// Review result of submitted source materials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialReviewNotification {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub source_materials_list: Vec<ReviewedMaterial>,
    /// 2 approved, 3 rejected.
    pub status: i32,
    pub reject_reason: Option<String>,
}

/// How an order was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum HandleStatus {
    LocalSuccess,
    LocalFailure,
    CloudSuccess,
    CloudFailure,
    Unknown(u8),
}

impl HandleStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::LocalSuccess | Self::CloudSuccess)
    }

    /// Recognition failed and the order needs manual handling.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::LocalFailure | Self::CloudFailure)
    }
}

impl From<u8> for HandleStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::LocalSuccess,
            2 => Self::LocalFailure,
            3 => Self::CloudSuccess,
            4 => Self::CloudFailure,
            other => Self::Unknown(other),
        }
    }
}

impl From<HandleStatus> for u8 {
    fn from(status: HandleStatus) -> u8 {
        match status {
            HandleStatus::LocalSuccess => 1,
            HandleStatus::LocalFailure => 2,
            HandleStatus::CloudSuccess => 3,
            HandleStatus::CloudFailure => 4,
            HandleStatus::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for HandleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalSuccess => f.write_str("Local success"),
            Self::LocalFailure => f.write_str("Local failure"),
            Self::CloudSuccess => f.write_str("Cloud success"),
            Self::CloudFailure => f.write_str("Cloud failure"),
            Self::Unknown(code) => write!(f, "Unknown handle status: {code}"),
        }
    }
}

/// Why an order was handed to manual review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbnormalReason {
    CameraEx,
    GravityEx,
    ForeignInvasion,
    UnknownItem,
    Other,
    /// Rough handling by the shopper.
    Unfriendly,
    VideoError,
    /// Recognition algorithm failed.
    HardwareEx,
    #[serde(other)]
    Unknown,
}

/// Shopper activity while the door was open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ShopMove {
    DoorNotOpened,
    NoMovement,
    Movement,
    Unknown(u8),
}

impl From<u8> for ShopMove {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::DoorNotOpened,
            2 => Self::NoMovement,
            3 => Self::Movement,
            other => Self::Unknown(other),
        }
    }
}

impl From<ShopMove> for u8 {
    fn from(shop_move: ShopMove) -> u8 {
        match shop_move {
            ShopMove::DoorNotOpened => 1,
            ShopMove::NoMovement => 2,
            ShopMove::Movement => 3,
            ShopMove::Unknown(other) => other,
        }
    }
}

/// A product line of a settled order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderGoods {
    pub item_code: String,
    pub item_name: String,
    /// Cents.
    pub item_price: i64,
    pub count: i64,
}

/// An order was settled after the shopper closed the door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSettlementNotification {
    /// Door-open request id.
    pub trade_request_id: String,
    pub order_code: String,
    #[serde(default)]
    pub user_code: Option<String>,
    pub vm_code: String,
    pub handle_status: HandleStatus,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub abnormal_reasons: Vec<AbnormalReason>,
    #[serde(default)]
    pub open_door_time: i64,
    #[serde(default)]
    pub open_door_weight: i64,
    #[serde(default)]
    pub close_door_time: i64,
    #[serde(default)]
    pub close_door_weight: i64,
    #[serde(default)]
    pub hardware_ex: Option<String>,
    pub shop_move: ShopMove,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub video_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub order_goods_list: Vec<OrderGoods>,
    /// Products the recognizer considered but did not pick.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub candidates: Vec<OrderGoods>,
}

impl OrderSettlementNotification {
    /// Order total in cents.
    pub fn total(&self) -> i64 {
        self.order_goods_list
            .iter()
            .map(|goods| goods.item_price * goods.count)
            .sum()
    }
}

/// The `action` query parameter of door notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorAction {
    TradeOpen,
    TradeClose,
    ReplenishOpen,
    ReplenishClose,
}

impl DoorAction {
    /// Whether the event belongs to a shopping session.
    pub fn is_trade(self) -> bool {
        matches!(self, Self::TradeOpen | Self::TradeClose)
    }
}

impl FromStr for DoorAction {
    type Err = AinfinitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trade_open" => Ok(Self::TradeOpen),
            "trade_close" => Ok(Self::TradeClose),
            "replenish_open" => Ok(Self::ReplenishOpen),
            "replenish_close" => Ok(Self::ReplenishClose),
            other => Err(AinfinitError::InvalidResponse(format!(
                "unknown door action: {other}"
            ))),
        }
    }
}

/// A door opened or closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoorNotification {
    /// Only for shopping sessions.
    pub order_code: Option<String>,
    /// 1 shopping, 2 replenishment.
    pub open_type: i32,
    pub request_id: String,
    /// Door result code, see [`crate::rest::operation::DoorResultStatus`].
    pub status: i64,
    pub vm_code: String,
}

impl DoorNotification {
    /// The door result as a typed status.
    pub fn door_status(&self) -> crate::rest::operation::DoorResultStatus {
        use crate::status::StatusTable;
        crate::rest::operation::DoorResultStatus::from_code(self.status)
    }
}
