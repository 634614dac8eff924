//! Types for product catalog and product application endpoints.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::error::AinfinitError;
use crate::types::serde_helpers::{empty_string_as_none, null_as_default};

/// A catalog product or a product application.
///
/// Prices are in cents, weights in grams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Application id.
    pub id: i64,
    pub name: String,
    /// Suggested retail price.
    pub price: i64,
    pub weight: i64,
    /// Accepted weight deviation.
    pub weight_variance: i64,
    pub img_url: String,
    /// Only assigned once an application is approved.
    #[serde(deserialize_with = "empty_string_as_none::deserialize")]
    pub item_code: Option<String>,
    /// 1 single item, 2 bundle.
    pub coll_type: i32,
    pub update_time: String,
    pub create_time: String,
    /// 1 available, 2 unavailable.
    pub status: i32,
    /// Barcode.
    pub qr_codes: String,
    /// Item codes contained in a bundle.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub item_codes: Vec<String>,
    /// Photos of the physical product.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub actual_imgs: Vec<String>,
    pub weight_file: String,
    /// Review state of an application, see [`ApplyStatus`].
    pub apply_status: i32,
    pub apply_time: String,
    /// "1" non-compliant name, "2" non-compliant barcode, "3" unclear image, "4" other.
    pub reject_type: String,
    pub reject_reason: String,
    pub weight_img_url: String,
}

impl Product {
    /// The review state, when this is an application.
    pub fn application_status(&self) -> Option<ApplyStatus> {
        u8::try_from(self.apply_status)
            .ok()
            .and_then(|status| ApplyStatus::try_from(status).ok())
    }
}

/// Review state of a product application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ApplyStatus {
    UnderReview,
    Approved,
    Rejected,
}

impl From<ApplyStatus> for u8 {
    fn from(status: ApplyStatus) -> Self {
        match status {
            ApplyStatus::UnderReview => 1,
            ApplyStatus::Approved => 2,
            ApplyStatus::Rejected => 3,
        }
    }
}

impl TryFrom<u8> for ApplyStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::UnderReview),
            2 => Ok(Self::Approved),
            3 => Ok(Self::Rejected),
            other => Err(format!("unknown apply status: {other}")),
        }
    }
}

/// Size and freshness of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LatestInfo {
    /// Number of products.
    pub count: i64,
    /// Milliseconds since the Unix epoch.
    pub last_update_time: i64,
}

/// Query for the product list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Only products updated after this time.
    pub updated_time: Option<String>,
    pub goods_name: Option<String>,
    pub qr_codes: Option<String>,
}

impl ProductListRequest {
    /// Request one page.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }
}

/// Body for the mutual exclusion lookup.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MutualExclusionRequest<'a> {
    pub item_codes: &'a [String],
}

/// Query for the product application list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductApplicationListRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub apply_status: Option<ApplyStatus>,
    pub goods_name: Option<String>,
    pub qr_codes: Option<String>,
}

impl ProductApplicationListRequest {
    /// Request one page.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    /// Only applications in the given review state.
    pub fn apply_status(mut self, status: ApplyStatus) -> Self {
        self.apply_status = Some(status);
        self
    }
}

/// An image uploaded with a product application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ProductImage {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    fn part(&self) -> Part {
        Part::bytes(self.bytes.clone()).file_name(self.file_name.clone())
    }
}

/// Images attached to a product application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductImages {
    /// Display images, sent as `file`.
    pub display: Vec<ProductImage>,
    /// Photos of the physical product, sent as `files`. The platform wants
    /// at least two with a readable barcode.
    pub physical: Vec<ProductImage>,
    /// Weight chart, sent as `weightFile`.
    pub weight: Option<ProductImage>,
}

impl ProductImages {
    fn attach(&self, mut form: Form) -> Form {
        for image in &self.display {
            form = form.part("file", image.part());
        }
        for image in &self.physical {
            form = form.part("files", image.part());
        }
        if let Some(image) = &self.weight {
            form = form.part("weightFile", image.part());
        }
        form
    }
}

/// Build a multipart form with the JSON `item` field followed by the images.
fn application_form<T: Serialize>(item: &T, images: &ProductImages) -> Result<Form, AinfinitError> {
    let item = serde_json::to_string(item).map_err(|e| {
        AinfinitError::InvalidRequest(format!("Failed to encode product item: {e}"))
    })?;
    let part = Part::text(item).mime_str("application/json")?;
    Ok(images.attach(Form::new().part("item", part)))
}

/// A request to add a new product to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductApplication {
    pub name: String,
    /// Price in cents, must be positive.
    pub price: i64,
    /// Weight in grams.
    pub weight: i64,
    /// Barcode.
    pub qr_codes: String,
    #[serde(skip)]
    pub images: ProductImages,
}

impl NewProductApplication {
    pub fn new(name: impl Into<String>, price: i64, weight: i64, qr_codes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            weight,
            qr_codes: qr_codes.into(),
            images: ProductImages::default(),
        }
    }

    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.name.trim().is_empty() {
            return Err(AinfinitError::InvalidRequest(
                "product name cannot be empty".to_string(),
            ));
        }
        if self.price <= 0 {
            return Err(AinfinitError::InvalidRequest(
                "product price must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn to_form(&self) -> Result<Form, AinfinitError> {
        application_form(self, &self.images)
    }
}

/// A change to a pending product application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductApplication {
    /// Application id, must be non-zero.
    pub id: i64,
    pub price: i64,
    pub weight: i64,
    pub qr_codes: String,
    #[serde(skip)]
    pub images: ProductImages,
}

impl UpdateProductApplication {
    /// Reject the request before it is sent.
    pub fn validate(&self) -> Result<(), AinfinitError> {
        if self.id == 0 {
            return Err(AinfinitError::InvalidRequest(
                "product application id cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn to_form(&self) -> Result<Form, AinfinitError> {
        application_form(self, &self.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialize() {
        let json = r#"{
            "id": 12,
            "name": "Cola 330ml",
            "price": 350,
            "weight": 345,
            "itemCode": "",
            "qrCodes": "6934024500113",
            "itemCodes": null,
            "actualImgs": ["https://img/1.png"],
            "applyStatus": 3,
            "rejectType": "2",
            "rejectReason": "barcode unreadable"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 12);
        assert_eq!(product.item_code, None);
        assert!(product.item_codes.is_empty());
        assert_eq!(product.actual_imgs.len(), 1);
        assert_eq!(product.application_status(), Some(ApplyStatus::Rejected));
    }

    #[test]
    fn test_catalog_product_has_no_application_status() {
        let product: Product = serde_json::from_str(r#"{"itemCode":"A1","applyStatus":0}"#).unwrap();
        assert_eq!(product.item_code.as_deref(), Some("A1"));
        assert_eq!(product.application_status(), None);
    }

    #[test]
    fn test_application_list_query() {
        let request = ProductApplicationListRequest::new(1, 10).apply_status(ApplyStatus::Approved);
        assert_eq!(
            serde_urlencoded::to_string(&request).unwrap(),
            "page=1&pageSize=10&applyStatus=2"
        );
    }

    #[test]
    fn test_new_application_validation() {
        assert!(NewProductApplication::new("Cola", 350, 345, "693").validate().is_ok());
        assert!(NewProductApplication::new("", 350, 345, "693").validate().is_err());
        assert!(NewProductApplication::new("Cola", 0, 345, "693").validate().is_err());
        assert!(NewProductApplication::new("Cola", -1, 345, "693").validate().is_err());
    }

    #[test]
    fn test_update_application_validation() {
        assert!(UpdateProductApplication::default().validate().is_err());
        let request = UpdateProductApplication {
            id: 7,
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_item_json_excludes_images() {
        let mut application = NewProductApplication::new("Cola", 350, 345, "693");
        application.images.display.push(ProductImage::new("a.png", vec![1, 2, 3]));
        assert_eq!(
            serde_json::to_string(&application).unwrap(),
            r#"{"name":"Cola","price":350,"weight":345,"qrCodes":"693"}"#
        );
        assert!(application.to_form().is_ok());
    }
}
