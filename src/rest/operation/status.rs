//! Status tables of the operation endpoints.

use crate::status::status_table;

status_table! {
    /// Open-door requests.
    pub enum OpenDoorStatus: "open door" {
        Failed = 400 => "Failed to open the door",
        Timeout = 503 => "Open door request timed out",
        UnusualMachinePackage = 3501 => "Unusual machine package",
        OfflineEquipment = 10416 => "Offline equipment",
        SelfDealerNotInOperation = 40525 => "Self dealer not in operation",
        TooManyOrdersNotCompleted = 40526 => "Too many orders not completed",
        NonBusinessSelfSellerMachine = 40531 => "Non-business self-seller machine",
    }
}

status_table! {
    /// Outcome of an open-door request.
    ///
    /// `Opened` and `Closed` are success states; the rest explain why the
    /// door did not open.
    pub enum DoorResultStatus: "door result" {
        Opened = 201 => "Door opened",
        Closed = 202 => "Door closed",
        ShoppingNotFinished = 2031 => "Failed to open: previous shopping not finished",
        RestockingNotFinished = 2032 => "Failed to open: previous restocking not finished",
        PowerOff = 2033 => "Failed to open: device powered off and running on UPS",
        MaintenanceMode = 2034 => "Failed to open: device in maintenance mode",
        BackgroundProcess = 204 => "Failed to open: device background process active",
        DeviceTimeout = 503 => "Failed to open: device response timeout",
        NoResult = 504 => "Failed to open: no result reported within 5 minutes",
        UnknownError = 505 => "Failed to open: unknown error",
        Calibration = 506 => "Failed to open: calibration error",
        ProductVerification = 5050 => "Failed to open: product verification failed",
        SerialPortFault = 5051 => "Failed to open: serial port fault",
        WeightSensorFault = 5052 => "Failed to open: weight sensor fault",
        CamerasOffline = 5053 => "Failed to open: all cameras offline",
        AlgorithmError = 5054 => "Failed to open: local recognition algorithm error",
        DoorLockError = 5055 => "Failed to open: door lock error",
        PowerStatusError = 5056 => "Failed to open: device power status error",
        DoorOpenLockOpen = 5057 => "Door lock error: door open and lock open",
        DoorClosedLockOpen = 5058 => "Door lock error: door closed and lock open",
        DoorOpenLockClosed = 5059 => "Door lock error: door open and lock closed",
        DoorClosedLockClosed = 5060 => "Door lock error: door closed and lock closed",
        NoResultYet = 404 => "No result reported by the device yet",
        RequestNotFound = 42404 => "Request id does not exist",
        InvalidType = 40005 => "Invalid parameter: type",
        TooManyOrders = 40526 => "Too many shopping orders in progress",
        NoPermission = 42403 => "No permission to query",
    }
}

impl DoorResultStatus {
    /// Whether the door opened or closed normally.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Opened | Self::Closed)
    }
}

status_table! {
    /// Adding or replacing the goods sold by a machine.
    pub enum GoodsChangeStatus: "goods change" {
        TooManyGoods = 10004 => "Too many goods",
        DuplicateGoods = 40502 => "Duplicate goods",
        MutuallyExclusiveGoods = 40503 => "Mutually exclusive goods",
        DelistedGoods = 40504 => "Delisted goods",
        SelfDealerNotExist = 40506 => "Self dealer does not exist",
        UnknownGoods = 40507 => "Unknown goods",
        NoOperatingPermissions = 40531 => "No operating permissions",
    }
}

status_table! {
    /// Removing goods from a machine.
    pub enum DeleteGoodsStatus: "delete goods" {
        SelfDealerNotExist = 40506 => "Self dealer does not exist",
        UnknownGoods = 40507 => "Unknown goods",
        NoOperatingPermissions = 40531 => "No operating permissions",
    }
}

status_table! {
    /// Listing the goods sold by a machine.
    pub enum MachineGoodsStatus: "machine goods" {
        SelfDealerNotExist = 40506 => "Self dealer does not exist",
        NotBelongToMerchant = 40531 => "Self dealer does not belong to the merchant",
    }
}

status_table! {
    /// Updating prices across machines.
    pub enum PriceUpdateStatus: "price update" {
        MachineLacksTargetGoods = 3501 => "Vending machine does not stock the target goods",
        DuplicateGoods = 40502 => "Duplicate goods",
        DelistedGoods = 40504 => "Delisted goods",
        SelfDealerNotExist = 40506 => "Self dealer does not exist",
        UnknownGoods = 40507 => "Unknown goods",
        NoOperatingPermissions = 40531 => "No operating permissions",
    }
}

status_table! {
    /// Order and replenishment videos.
    pub enum OrderVideoStatus: "order video" {
        NoRecords = 404 => "No order or replenishment records found",
        RequestNotFound = 42404 => "The open-door request does not exist",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusTable;
    use crate::status::tests::assert_table_complete;

    #[test]
    fn test_tables_complete() {
        assert_table_complete::<OpenDoorStatus>();
        assert_table_complete::<DoorResultStatus>();
        assert_table_complete::<GoodsChangeStatus>();
        assert_table_complete::<DeleteGoodsStatus>();
        assert_table_complete::<MachineGoodsStatus>();
        assert_table_complete::<PriceUpdateStatus>();
        assert_table_complete::<OrderVideoStatus>();
    }

    #[test]
    fn test_door_result_success_states() {
        assert!(DoorResultStatus::from_code(201).is_success());
        assert!(DoorResultStatus::from_code(202).is_success());
        assert!(!DoorResultStatus::from_code(204).is_success());
        assert!(!DoorResultStatus::from_code(5055).is_success());
        assert!(!DoorResultStatus::from_code(1).is_success());
    }

    #[test]
    fn test_offline_equipment() {
        assert_eq!(OpenDoorStatus::from_code(10416), OpenDoorStatus::OfflineEquipment);
        assert_eq!(OpenDoorStatus::OfflineEquipment.to_string(), "Offline equipment");
    }
}
