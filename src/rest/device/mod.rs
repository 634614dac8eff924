//! Vending machine management endpoints.

mod types;

pub use types::*;

use std::future::Future;

use reqwest::Method;
use tracing::debug;

use crate::error::AinfinitError;
use crate::rest::client::{AinfinitClient, NO_QUERY};
use crate::rest::endpoints::device;
use crate::status::CommonStatus;
use crate::types::{Ack, DataResponse, Page, ResultList};

/// Vending machine management operations.
pub trait DeviceApi: Send + Sync {
    /// Bind a machine to the merchant and activate it.
    fn activate(
        &self,
        code: &str,
        request: &DeviceActivationRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// List the merchant's machines.
    fn list_machines(
        &self,
        request: &ListMachinesRequest,
    ) -> impl Future<Output = Result<Page<MachineSummary>, AinfinitError>> + Send;

    /// Get the registration details of a machine.
    fn machine_info(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<MachineInfo, AinfinitError>> + Send;

    /// Update the registration details of a machine.
    fn update_machine(
        &self,
        code: &str,
        request: &DeviceUpdateRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Get the hardware status of a machine.
    fn device_status(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<DeviceStatus, AinfinitError>> + Send;

    /// Get visitor counts.
    fn people_flow(
        &self,
        request: &PeopleFlowRequest,
    ) -> impl Future<Output = Result<ResultList<PeopleFlow>, AinfinitError>> + Send;

    /// Change volume, temperature or compressor state.
    fn control(
        &self,
        code: &str,
        request: &DeviceControlRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Update machine settings.
    fn update_settings(
        &self,
        code: &str,
        request: &SettingRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;

    /// Send a refrigeration / heating command.
    fn refrigeration_control(
        &self,
        code: &str,
        request: &RefrigerationControlRequest,
    ) -> impl Future<Output = Result<Ack, AinfinitError>> + Send;
}

/// Client for the vending machine management endpoints.
///
/// Obtained with [`AinfinitClient::devices`].
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: AinfinitClient,
}

impl DeviceClient {
    pub(crate) fn new(client: AinfinitClient) -> Self {
        Self { client }
    }

    /// Bind a machine to the merchant and activate it.
    pub async fn activate(
        &self,
        code: &str,
        request: &DeviceActivationRequest,
    ) -> Result<Ack, AinfinitError> {
        debug!(code, "Activating vending machine");
        let ack = self
            .client
            .send_json::<CommonStatus, _, _, _>(
                Method::POST,
                device::ACTIVATE,
                &[("code", code)][..],
                request,
            )
            .await?;
        debug!(code, "Activated vending machine");
        Ok(ack)
    }

    /// List the merchant's machines.
    pub async fn list_machines(
        &self,
        request: &ListMachinesRequest,
    ) -> Result<Page<MachineSummary>, AinfinitError> {
        debug!(page = ?request.page, limit = ?request.limit, "Listing vending machines");
        let response: DataResponse<Page<MachineSummary>> = self
            .client
            .get::<CommonStatus, _, _>(device::LIST, request)
            .await?;
        debug!(total = response.data.total, "Listed vending machines");
        Ok(response.data)
    }

    /// Get the registration details of a machine.
    pub async fn machine_info(&self, code: &str) -> Result<MachineInfo, AinfinitError> {
        debug!(code, "Getting vending machine info");
        let response: DataResponse<MachineInfo> = self
            .client
            .get::<CommonStatus, _, _>(device::INFO, &[("code", code)][..])
            .await?;
        Ok(response.data)
    }

    /// Update the registration details of a machine.
    ///
    /// The request is rejected locally when `name` is empty.
    pub async fn update_machine(
        &self,
        code: &str,
        request: &DeviceUpdateRequest,
    ) -> Result<Ack, AinfinitError> {
        request.validate()?;
        debug!(code, "Updating vending machine");
        let ack = self
            .client
            .send_json::<CommonStatus, _, _, _>(
                Method::PUT,
                device::INFO,
                &[("code", code)][..],
                request,
            )
            .await?;
        debug!(code, "Updated vending machine");
        Ok(ack)
    }

    /// Get the hardware status of a machine.
    pub async fn device_status(&self, code: &str) -> Result<DeviceStatus, AinfinitError> {
        debug!(code, "Getting device status");
        let response: DataResponse<DeviceStatus> = self
            .client
            .get::<CommonStatus, _, _>(device::DEVICE_INFO, &[("code", code)][..])
            .await?;
        Ok(response.data)
    }

    /// Get visitor counts.
    pub async fn people_flow(
        &self,
        request: &PeopleFlowRequest,
    ) -> Result<ResultList<PeopleFlow>, AinfinitError> {
        debug!(machines = request.codes.len(), "Getting people flow");
        let flow: ResultList<PeopleFlow> = self
            .client
            .send_json::<CommonStatus, _, _, _>(
                Method::POST,
                device::PEOPLE_FLOW,
                NO_QUERY,
                request,
            )
            .await?;
        debug!(count = flow.count, "Got people flow");
        Ok(flow)
    }

    /// Change volume, temperature or compressor state.
    pub async fn control(
        &self,
        code: &str,
        request: &DeviceControlRequest,
    ) -> Result<Ack, AinfinitError> {
        request.validate()?;
        debug!(code, ?request, "Controlling vending machine");
        self.client
            .send_json::<CommonStatus, _, _, _>(
                Method::PUT,
                device::CONTROL,
                &[("code", code)][..],
                request,
            )
            .await
    }

    /// Update machine settings.
    ///
    /// The platform addresses settings by serial number, so the machine's
    /// info is fetched first to resolve it.
    pub async fn update_settings(
        &self,
        code: &str,
        request: &SettingRequest,
    ) -> Result<Ack, AinfinitError> {
        let info = self.machine_info(code).await?;
        debug!(code, device_sn = %info.device_sn, "Updating vending machine settings");
        // The parameter name is spelled this way by the platform.
        let query = [("scanCode", code), ("deviseSn", info.device_sn.as_str())];
        self.client
            .send_json::<CommonStatus, _, _, _>(Method::PUT, device::SETTING, &query[..], request)
            .await
    }

    /// Send a refrigeration / heating command.
    pub async fn refrigeration_control(
        &self,
        code: &str,
        request: &RefrigerationControlRequest,
    ) -> Result<Ack, AinfinitError> {
        debug!(code, ?request, "Sending refrigeration command");
        let query = CoolingCommandQuery::new(code, request);
        self.client
            .send_empty::<CommonStatus, _, _>(Method::PUT, device::COOLING_COMMAND, &query)
            .await
    }
}

impl DeviceApi for DeviceClient {
    async fn activate(
        &self,
        code: &str,
        request: &DeviceActivationRequest,
    ) -> Result<Ack, AinfinitError> {
        DeviceClient::activate(self, code, request).await
    }

    async fn list_machines(
        &self,
        request: &ListMachinesRequest,
    ) -> Result<Page<MachineSummary>, AinfinitError> {
        DeviceClient::list_machines(self, request).await
    }

    async fn machine_info(&self, code: &str) -> Result<MachineInfo, AinfinitError> {
        DeviceClient::machine_info(self, code).await
    }

    async fn update_machine(
        &self,
        code: &str,
        request: &DeviceUpdateRequest,
    ) -> Result<Ack, AinfinitError> {
        DeviceClient::update_machine(self, code, request).await
    }

    async fn device_status(&self, code: &str) -> Result<DeviceStatus, AinfinitError> {
        DeviceClient::device_status(self, code).await
    }

    async fn people_flow(
        &self,
        request: &PeopleFlowRequest,
    ) -> Result<ResultList<PeopleFlow>, AinfinitError> {
        DeviceClient::people_flow(self, request).await
    }

    async fn control(
        &self,
        code: &str,
        request: &DeviceControlRequest,
    ) -> Result<Ack, AinfinitError> {
        DeviceClient::control(self, code, request).await
    }

    async fn update_settings(
        &self,
        code: &str,
        request: &SettingRequest,
    ) -> Result<Ack, AinfinitError> {
        DeviceClient::update_settings(self, code, request).await
    }

    async fn refrigeration_control(
        &self,
        code: &str,
        request: &RefrigerationControlRequest,
    ) -> Result<Ack, AinfinitError> {
        DeviceClient::refrigeration_control(self, code, request).await
    }
}
