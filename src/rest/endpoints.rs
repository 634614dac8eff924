//! Ainfinit REST API endpoint constants.

/// Production base URL of the Ainfinit open platform.
pub const AINFINIT_BASE_URL: &str = "https://open.ainfinit.com";

/// Vending machine (device) management.
pub mod device {
    /// Bind and activate a machine.
    pub const ACTIVATE: &str = "/facade/open/vending_machine/bind";
    /// Paged machine list.
    pub const LIST: &str = "/facade/open/vending_machine/infoPage";
    /// Machine info (GET) and update (PUT).
    pub const INFO: &str = "/facade/open/vending_machine/info";
    /// Device hardware status.
    pub const DEVICE_INFO: &str = "/facade/open/vending_machine/deviceInfo";
    /// Visitor counts.
    pub const PEOPLE_FLOW: &str = "/facade/open/vending_machine/peopleFlow";
    /// Volume, temperature and compressor control.
    pub const CONTROL: &str = "/facade/open/vending_machine/control";
    /// Machine settings.
    pub const SETTING: &str = "/facade/open/vending_machine/setting";
    /// Refrigeration / heating command.
    pub const COOLING_COMMAND: &str = "/facade/open/vending_machine/deviceCoolingCommand";
}

/// Product catalog and product applications.
pub mod product {
    /// Catalog size and last update time.
    pub const LATEST_INFO: &str = "/facade/open/goods/latestInfo";
    /// Paged product list.
    pub const LIST: &str = "/facade/open/goods/page";
    /// Product detail, followed by `/{itemCode}`.
    pub const DETAIL: &str = "/facade/open/goods";
    /// Mutually exclusive products.
    pub const EXCLUSION: &str = "/facade/open/goods/getGoodsExclusionInfo";
    /// Create (POST) and update (PUT) product applications.
    pub const APPLICATION: &str = "/facade/open/goodsApply";
    /// Paged product application list.
    pub const APPLICATION_LIST: &str = "/facade/open/goodsApply/page";
}

/// Advertisements and their source materials.
pub mod advertisement {
    /// Submit source materials for review.
    pub const MATERIAL_APPLY: &str = "/facade/open/materials/sourceMaterialsApply";
    /// Paged source material list.
    pub const MATERIAL_PAGE: &str = "/facade/open/materials/sourceMaterialsPage";
    /// Source material detail, followed by `/{id}`.
    pub const MATERIAL_DETAIL: &str = "/facade/open/materials/sourceMaterialsDetail";
    /// Source material removal, followed by `/{id}`.
    pub const MATERIAL_DELETE: &str = "/facade/open/materials/sourceMaterialsDelete";
    /// Create (POST), update (PUT) and delete (DELETE `/{id}`) advertisements.
    pub const AD: &str = "/facade/open/materials";
    /// Paged advertisement list.
    pub const AD_PAGE: &str = "/facade/open/materials/page";
    /// Advertisement detail, by `/{id}` or by `?code=`.
    pub const AD_DETAIL: &str = "/facade/open/materials/detail";
    /// Bind an advertisement to machines, followed by `/{id}`.
    pub const AD_BIND: &str = "/facade/open/materials/bind";
    /// Promotion status, followed by `/{promotionId}/{status}`.
    pub const PROMOTION_STATUS: &str = "/facade/open/materials/updatePromotionStatus";
    /// Promotion currently playing on a machine.
    pub const MACHINE_PROMOTION: &str = "/facade/open/materials/getVmPromotion";
}

/// Door control, orders and replenishment.
pub mod operation {
    /// Open the door for shopping or replenishment.
    pub const OPEN_DOOR: &str = "/open/operation/vending_machine/open";
    /// Outcome of an open-door request.
    pub const DOOR_RESULT: &str = "/facade/open/vending_machine";
    /// Paged order list.
    pub const ORDERS: &str = "/facade/open/order/page";
    /// Order or replenishment video.
    pub const ORDER_VIDEO: &str = "/facade/open/order/video";
    /// Goods sold by a machine (GET, PUT, POST, DELETE).
    pub const GOODS: &str = "/facade/open/replenish/items";
    /// Price update across machines.
    pub const PRICES: &str = "/facade/open/replenish/replaceVmItemsPrice";
}
