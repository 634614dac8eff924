//! Types for advertisement and source material endpoints.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::error::AinfinitError;
use crate::types::serde_helpers::null_as_default;

/// Kind of media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FileType {
    Image,
    Video,
}

impl From<FileType> for u8 {
    fn from(file_type: FileType) -> u8 {
        match file_type {
            FileType::Image => 1,
            FileType::Video => 2,
        }
    }
}

impl TryFrom<u8> for FileType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Image),
            2 => Ok(Self::Video),
            other => Err(format!("unknown file type: {other}")),
        }
    }
}

/// Purpose of an advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BusinessType {
    PublicService,
    Commercial,
}

impl From<BusinessType> for u8 {
    fn from(business_type: BusinessType) -> u8 {
        match business_type {
            BusinessType::PublicService => 1,
            BusinessType::Commercial => 2,
        }
    }
}

impl TryFrom<u8> for BusinessType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::PublicService),
            2 => Ok(Self::Commercial),
            other => Err(format!("unknown business type: {other}")),
        }
    }
}

/// Review state of a source material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ReviewStatus {
    UnderReview,
    Approved,
    Rejected,
}

impl From<ReviewStatus> for u8 {
    fn from(status: ReviewStatus) -> u8 {
        match status {
            ReviewStatus::UnderReview => 1,
            ReviewStatus::Approved => 2,
            ReviewStatus::Rejected => 3,
        }
    }
}

impl TryFrom<u8> for ReviewStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::UnderReview),
            2 => Ok(Self::Approved),
            3 => Ok(Self::Rejected),
            other => Err(format!("unknown review status: {other}")),
        }
    }
}

/// Playback switch of a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    Enabled,
    Disabled,
}

impl PromotionStatus {
    /// Numeric code used in the request path.
    pub fn code(self) -> u8 {
        match self {
            Self::Enabled => 1,
            Self::Disabled => 2,
        }
    }
}

/// An uploaded image or video awaiting use in advertisements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceMaterial {
    pub id: i64,
    pub file_url: String,
    pub file_type: Option<FileType>,
    pub name: String,
    pub status: Option<ReviewStatus>,
    pub create_time: String,
}

/// A source material submitted for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSourceMaterial {
    /// Publicly reachable URL of the file.
    pub file_url: String,
    pub file_type: FileType,
    pub name: String,
}

impl NewSourceMaterial {
    pub fn new(name: impl Into<String>, file_url: impl Into<String>, file_type: FileType) -> Self {
        Self {
            file_url: file_url.into(),
            file_type,
            name: name.into(),
        }
    }
}

/// Id of a newly created record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedId {
    pub id: i64,
}

/// Result of submitting source materials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialApplyResult {
    /// Ids of the created materials, in submission order.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub result: Vec<CreatedId>,
    pub count: i64,
    pub ok: bool,
}

/// Query for the paged material and advertisement lists.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

/// A material placed in an advertisement.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImgRel {
    pub id: i64,
    /// Play order, 1 to 100, lowest first.
    pub priority: u8,
    pub promotion_id: i64,
    pub file_type: Option<FileType>,
    pub file_url: String,
    pub source_materials_id: i64,
}

/// A machine an advertisement plays on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vm {
    pub code: String,
    pub name: String,
}

/// An advertisement (promotion).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ad {
    pub id: i64,
    pub name: String,
    pub business_type: Option<BusinessType>,
    /// Seconds each image is shown.
    pub duration: i64,
    /// Playback state as reported by the platform.
    pub status: i32,
    pub create_time: String,
    pub update_time: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub img_rel_list: Vec<ImgRel>,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub vm_list: Vec<Vm>,
}

/// Id and name of a created or updated advertisement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdSummary {
    pub id: i64,
    pub name: String,
}

/// A material reference in a new advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdMaterial {
    pub priority: u8,
    pub source_materials_id: i64,
}

fn check_priority(priority: u8) -> Result<(), AinfinitError> {
    if !(1..=100).contains(&priority) {
        return Err(AinfinitError::InvalidRequest(format!(
            "material priority must be between 1 and 100, got {priority}"
        )));
    }
    Ok(())
}

/// A new advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdRequest {
    pub name: String,
    pub business_type: BusinessType,
    pub duration: i64,
    pub img_rel_list: Vec<AdMaterial>,
}

impl NewAdRequest {
    pub fn new(name: impl Into<String>, business_type: BusinessType, duration: i64) -> Self {
        Self {
            name: name.into(),
            business_type,
            duration,
            img_rel_list: Vec::new(),
        }
    }

    /// Add a source material with the given play priority.
    pub fn material(mut self, source_materials_id: i64, priority: u8) -> Self {
        self.img_rel_list.push(AdMaterial {
            priority,
            source_materials_id,
        });
        self
    }

    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.name.trim().is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "advertisement name cannot be empty".to_string(),
            ));
        }
        self.img_rel_list
            .iter()
            .try_for_each(|material| check_priority(material.priority))
    }
}

/// Changes to an existing advertisement.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdUpdateRequest {
    /// Advertisement id, must be non-zero.
    pub id: i64,
    pub name: Option<String>,
    pub business_type: Option<BusinessType>,
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub img_rel_list: Vec<ImgRel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vm_list: Vec<Vm>,
}

impl AdUpdateRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.id == 0 {
            return Err(AinfinitError::InvalidRequest(
                "advertisement id cannot be 0".to_string(),
            ));
        }
        self.img_rel_list
            .iter()
            .try_for_each(|rel| check_priority(rel.priority))
    }
}

/// Machines to bind an advertisement to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdBindRequest {
    /// Machine codes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vm_list: Vec<String>,
    /// Machine scan codes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scan_code_list: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_deserialize() {
        let json = r#"{
            "id": 5,
            "name": "Summer",
            "businessType": 2,
            "duration": 15,
            "status": 2,
            "imgRelList": [
                {"id": 1, "priority": 10, "promotionId": 5, "fileType": 1,
                 "fileUrl": "https://cdn/a.png", "sourceMaterialsId": 9}
            ],
            "vmList": null
        }"#;
        let ad: Ad = serde_json::from_str(json).unwrap();
        assert_eq!(ad.business_type, Some(BusinessType::Commercial));
        assert_eq!(ad.status, 2);
        assert_eq!(ad.img_rel_list[0].file_type, Some(FileType::Image));
        assert_eq!(ad.img_rel_list[0].source_materials_id, 9);
        assert!(ad.vm_list.is_empty());
    }

    #[test]
    fn test_unknown_file_type_rejected() {
        let result: Result<SourceMaterial, _> = serde_json::from_str(r#"{"fileType": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_request_query() {
        assert_eq!(
            serde_urlencoded::to_string(PageRequest::new(2, 20)).unwrap(),
            "page=2&page_size=20"
        );
        assert_eq!(serde_urlencoded::to_string(PageRequest::default()).unwrap(), "");
    }

    #[test]
    fn test_new_ad_body() {
        let request = NewAdRequest::new("Summer", BusinessType::PublicService, 15).material(9, 1);
        assert!(request.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"name":"Summer","businessType":1,"duration":15,"imgRelList":[{"priority":1,"sourceMaterialsId":9}]}"#
        );
    }

    #[test]
    fn test_new_ad_validation() {
        assert!(NewAdRequest::new(" ", BusinessType::Commercial, 5).validate().is_err());
        assert!(
            NewAdRequest::new("a", BusinessType::Commercial, 5)
                .material(1, 0)
                .validate()
                .is_err()
        );
        assert!(
            NewAdRequest::new("a", BusinessType::Commercial, 5)
                .material(1, 101)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_update_request() {
        assert!(AdUpdateRequest::default().validate().is_err());
        let request = AdUpdateRequest {
            name: Some("Renamed".to_string()),
            ..AdUpdateRequest::new(5)
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"id":5,"name":"Renamed"}"#
        );
    }

    #[test]
    fn test_bind_request_skips_empty_lists() {
        let request = AdBindRequest {
            vm_list: vec!["VM1".to_string()],
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"vmList":["VM1"]}"#);
    }

    #[test]
    fn test_promotion_status_codes() {
        assert_eq!(PromotionStatus::Enabled.code(), 1);
        assert_eq!(PromotionStatus::Disabled.code(), 2);
    }
}
