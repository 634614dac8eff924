//! Types for vending machine management endpoints.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::error::AinfinitError;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default};

/// Network connectivity of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkInfo {
    /// 4G link (1 connected, 0 disconnected).
    pub mobile: i32,
    /// WiFi link (1 connected, 0 disconnected).
    pub wifi: i32,
    /// Wired link (1 connected, 0 disconnected).
    pub ethernet: i32,
    /// WiFi signal strength.
    pub signal_wifi: i32,
    /// 4G signal strength.
    pub signal_mobile: i32,
}

/// SIM card of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardInfo {
    pub iccid: String,
    /// Carrier: CMCC, CUCC or CTCC.
    pub carrier: String,
    pub imsi: String,
}

/// Hardware status reported by a machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceStatus {
    /// Machine code.
    pub code: String,
    /// Total storage in MB.
    pub bytes_total: i64,
    /// Free storage in MB.
    pub bytes_free: i64,
    pub client_version: String,
    pub camera_count: i32,
    pub gravity_count: i32,
    /// Light status (0 normal, 1 abnormal).
    pub light: i32,
    /// Local detector status (0 normal, 1 abnormal).
    pub detector: i32,
    /// Gravity sensor status (0 normal, 1 abnormal).
    pub gravity_sensor: i32,
    /// Serial port connection (0 normal, 1 abnormal).
    pub serial_port: i32,
    /// Serial port data format (0 normal, 1 abnormal).
    pub serial_port_data_format: i32,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub network_info: NetworkInfo,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub card_info: CardInfo,
    /// Chip card id, absent when the machine did not report one.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub ccid: Option<String>,
    /// Power source (1 mains, 2 UPS).
    pub power_status: i32,
    /// Last heartbeat, milliseconds since the Unix epoch.
    pub device_update_timestamp: i64,
    /// Derived from the heartbeat (1 online, 0 offline).
    pub online_status: i32,
    pub temperature: i32,
    pub target_temp: i32,
    pub volume: i32,
    /// Compressor (1 on, 0 off).
    pub engine_on: i32,
}

impl DeviceStatus {
    /// Whether the platform considers the machine online.
    pub fn is_online(&self) -> bool {
        self.online_status == 1
    }

    /// Whether the machine is running on its UPS.
    pub fn on_backup_power(&self) -> bool {
        self.power_status == 2
    }
}

/// A row of the machine list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineSummary {
    pub device_sn: String,
    pub scan_code: String,
    pub name: String,
    pub location: String,
    pub update_time: String,
}

/// Registration details of one machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineInfo {
    pub code: String,
    pub name: String,
    pub scan_code: String,
    /// Hardware serial number.
    pub device_sn: String,
    pub contact_number: String,
    pub location: String,
    pub update_time: String,
}

/// Visitor count of one machine over one aggregation window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeopleFlow {
    pub code: String,
    pub visitor_count: i64,
    pub aggregate_time: String,
}

/// Query for the machine list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMachinesRequest {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Filter by machine name.
    pub name_of: Option<String>,
}

impl ListMachinesRequest {
    /// Request one page.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            name_of: None,
        }
    }

    /// Filter by machine name.
    pub fn name_of(mut self, name: impl Into<String>) -> Self {
        self.name_of = Some(name.into());
        self
    }
}

/// Body for binding a machine to the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActivationRequest {
    pub name: String,
    pub location: String,
    pub scan_code: String,
    pub contact_number: String,
}

/// Body for updating a machine's registration. `name` is mandatory.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdateRequest {
    pub name: String,
    pub code: Option<String>,
    pub scan_code: Option<String>,
    pub contact_number: Option<String>,
    pub location: Option<String>,
    pub volume: Option<i32>,
    pub ad_volume: Option<i32>,
    pub temp: Option<i32>,
    pub engine_on: Option<i32>,
}

impl DeviceUpdateRequest {
    /// Create an update that renames the machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.name.trim().is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "device update requires a name".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body for the people-flow report.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleFlowRequest {
    /// Aggregation field.
    pub field: Option<String>,
    /// Window start, milliseconds since the Unix epoch.
    pub start_timestamp: Option<i64>,
    /// Window end, milliseconds since the Unix epoch.
    pub end_timestamp: Option<i64>,
    /// Machine codes; all machines when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
}

/// Body for remote device control. Unset fields are left unchanged.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceControlRequest {
    /// Speaker volume, 0 to 100.
    pub volume: Option<i32>,
    /// Advertisement volume, 0 to 100.
    pub ad_volume: Option<i32>,
    /// Target temperature, -30 to 20.
    pub temp: Option<i32>,
    /// Compressor switch, 0 or 1.
    pub engine_on: Option<i32>,
}

impl DeviceControlRequest {
    /// Reject out-of-range values before they are sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        check_range("volume", self.volume, 0, 100)?;
        check_range("adVolume", self.ad_volume, 0, 100)?;
        check_range("temp", self.temp, -30, 20)?;
        check_range("engineOn", self.engine_on, 0, 1)?;
        Ok(())
    }
}

fn check_range(field: &str, value: Option<i32>, min: i32, max: i32) -> Result<(), AinfinitError> {
    match value {
        Some(v) if v < min || v > max => Err(AinfinitError::InvalidRequest(format!(
            "{field} must be between {min} and {max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Body for machine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingRequest {
    /// Upload replenishment videos (1 yes, 0 no).
    pub repl_video_upload_flag: u8,
}

/// Thermostat mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TempMode {
    #[default]
    Normal,
    Refrigeration,
    RefrigerationEnergySaving,
    Heating,
    HeatingEnergySaving,
}

impl TempMode {
    /// Numeric code sent to the platform.
    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Refrigeration => 10,
            Self::RefrigerationEnergySaving => 11,
            Self::Heating => 20,
            Self::HeatingEnergySaving => 21,
        }
    }
}

/// Refrigeration / heating command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefrigerationControlRequest {
    /// Thermostat switch.
    pub compressor_enabled: bool,
    /// Target temperature: -28 to -18 when cooling, 30 to 50 when heating.
    pub temp: i32,
    pub temp_mode: TempMode,
}

/// Query string of the cooling command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CoolingCommandQuery<'a> {
    pub vm_code: &'a str,
    pub compr_enable: u8,
    pub temp: i32,
    pub temp_mode: u8,
}

impl<'a> CoolingCommandQuery<'a> {
    pub(crate) fn new(vm_code: &'a str, request: &RefrigerationControlRequest) -> Self {
        Self {
            vm_code,
            compr_enable: u8::from(request.compressor_enabled),
            temp: request.temp,
            temp_mode: request.temp_mode.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_status_deserialize() {
        let json = r#"{
            "code": "VM0001",
            "bytesTotal": 8192,
            "bytesFree": 1024,
            "clientVersion": "2.3.1",
            "cameraCount": 4,
            "networkInfo": {"mobile": 1, "wifi": 0, "ethernet": 0, "signalWifi": 0, "signalMobile": 23},
            "cardInfo": {"iccid": "8986", "carrier": "CMCC", "imsi": "4600"},
            "ccid": "",
            "powerStatus": 2,
            "deviceUpdateTimestamp": 1557218157315,
            "onlineStatus": 1,
            "engineOn": 1
        }"#;
        let status: DeviceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.code, "VM0001");
        assert_eq!(status.network_info.signal_mobile, 23);
        assert_eq!(status.card_info.carrier, "CMCC");
        assert_eq!(status.ccid, None);
        assert!(status.is_online());
        assert!(status.on_backup_power());
        assert_eq!(status.temperature, 0);
    }

    #[test]
    fn test_list_request_query() {
        let query = serde_urlencoded::to_string(ListMachinesRequest::new(1, 20).name_of("lobby"))
            .unwrap();
        assert_eq!(query, "page=1&limit=20&nameOf=lobby");
        let query = serde_urlencoded::to_string(ListMachinesRequest::default()).unwrap();
        assert_eq!(query, "");
    }

    #[test]
    fn test_update_request_requires_name() {
        assert!(DeviceUpdateRequest::new("Lobby").validate().is_ok());
        assert!(matches!(
            DeviceUpdateRequest::new(" ").validate(),
            Err(AinfinitError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_update_request_skips_unset() {
        let request = DeviceUpdateRequest {
            location: Some("Floor 2".to_string()),
            ..DeviceUpdateRequest::new("Lobby")
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"name":"Lobby","location":"Floor 2"}"#
        );
    }

    #[test]
    fn test_control_request_ranges() {
        let request = DeviceControlRequest {
            volume: Some(80),
            temp: Some(-5),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"volume":80,"temp":-5}"#
        );

        let request = DeviceControlRequest {
            ad_volume: Some(101),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        let request = DeviceControlRequest {
            engine_on: Some(2),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_cooling_query() {
        let request = RefrigerationControlRequest {
            compressor_enabled: true,
            temp: -20,
            temp_mode: TempMode::RefrigerationEnergySaving,
        };
        let query = serde_urlencoded::to_string(CoolingCommandQuery::new("VM0001", &request))
            .unwrap();
        assert_eq!(query, "vmCode=VM0001&comprEnable=1&temp=-20&tempMode=11");
    }

    #[test]
    fn test_people_flow_request() {
        let request = PeopleFlowRequest {
            start_timestamp: Some(1),
            end_timestamp: Some(2),
            codes: vec!["VM0001".to_string()],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"startTimestamp":1,"endTimestamp":2,"codes":["VM0001"]}"#
        );
    }
}
