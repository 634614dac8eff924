//! Ainfinit open platform REST API.
//!
//! [`AinfinitClient`] signs and sends requests; the endpoints are grouped by
//! resource, each group with its own client and trait.

pub mod advertisement;
mod client;
pub mod device;
pub mod endpoints;
pub mod operation;
pub mod product;

pub use advertisement::{AdvertisementApi, AdvertisementClient};
pub use client::{AinfinitClient, AinfinitClientBuilder};
pub use device::{DeviceApi, DeviceClient};
pub use endpoints::AINFINIT_BASE_URL;
pub use operation::{OperationApi, OperationClient};
pub use product::{ProductApi, ProductClient};
