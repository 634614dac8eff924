//! # Ainfinit Client
//!
//! An async Rust client library for the Ainfinit vending machine open platform.
//!
//! ## Features
//!
//! - Request signing with the platform's AES token scheme
//! - Vending machine management, catalog, advertising and door operations
//! - Typed vendor status codes for every endpoint
//! - Typed payloads for the notifications the platform sends back
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ainfinit_api_client::auth::StaticCredentials;
//! use ainfinit_api_client::rest::AinfinitClient;
//! use ainfinit_api_client::rest::device::ListMachinesRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = StaticCredentials::new("merchant", "4UafmbIJroNY2lXX");
//!     let client = AinfinitClient::new(credentials)?;
//!     let machines = client
//!         .devices()
//!         .list_machines(&ListMachinesRequest::new(1, 10))
//!         .await?;
//!     println!("Machines: {}", machines.total);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod callbacks;
pub mod error;
pub mod rest;
pub mod status;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AinfinitError, ApiError};
pub use rest::{AdvertisementApi, AinfinitClient, DeviceApi, OperationApi, ProductApi};
pub use status::StatusTable;

/// Result type alias using AinfinitError
pub type Result<T> = std::result::Result<T, AinfinitError>;
