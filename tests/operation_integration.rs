use std::sync::Arc;

use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ainfinit_api_client::AinfinitError;
use ainfinit_api_client::auth::{FixedClock, StaticCredentials};
use ainfinit_api_client::rest::AinfinitClient;
use ainfinit_api_client::rest::operation::{
    DoorResultStatus, Goods, ListOrdersRequest, OpenDoorRequest, OpenDoorStatus, OpenDoorType,
    PriceUpdateRequest, VideoStatus,
};

const TIMESTAMP: i64 = 1557218157315;
const TOKEN: &str = "eyJtZXJjaGFudF9jb2RlIjoibWVyY2hhbnQiLCJub25jZV9zdHIiOiJWU0h2M0IzUG1MNDlSMllwaG54L0hSa2w2VUxSMzRBcS9PSTdVRk5uTGV1UG5nRXZ2VjdIUisyRFhQUVFiOHpjU3hZWlVXQTFIM1d4TTRUeFNma1BoZz09IiwidGltZXN0YW1wIjoxNTU3MjE4MTU3MzE1fQ==";

fn build_client(server: &MockServer) -> AinfinitClient {
    AinfinitClient::builder(StaticCredentials::new("merchant", "4UafmbIJroNY2lXX"))
        .base_url(server.uri())
        .clock(Arc::new(FixedClock(TIMESTAMP)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_open_door() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/open/operation/vending_machine/open"))
        .and(query_param("code", "VM001"))
        .and(query_param("type", "1"))
        .and(query_param("requestId", "req-1"))
        .and(query_param("userCode", "user-9"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "message": "success",
            "data": {"orderCode": "O1"}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut request = OpenDoorRequest::new(OpenDoorType::Shopping, "req-1");
    request.user_code = Some("user-9".to_string());
    let order = client.operations().open_door("VM001", &request).await.unwrap();

    assert_eq!(order.order_code, "O1");
}

#[tokio::test]
async fn test_open_door_offline() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/open/operation/vending_machine/open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 10416,
            "message": "device offline"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = OpenDoorRequest::new(OpenDoorType::Shopping, "req-1");
    let err = client
        .operations()
        .open_door("VM001", &request)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(10416));
    match err {
        AinfinitError::Api(api) => {
            assert_eq!(api.status::<OpenDoorStatus>(), OpenDoorStatus::OfflineEquipment);
            assert_eq!(
                api.to_string(),
                "open door status 10416 (Offline equipment): device offline"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_open_door_requires_request_id() {
    let server = MockServer::start().await;
    let client = build_client(&server);

    let request = OpenDoorRequest::new(OpenDoorType::Replenishment, "");
    let err = client
        .operations()
        .open_door("VM001", &request)
        .await
        .unwrap_err();

    assert!(matches!(err, AinfinitError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_door_result_closed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facade/open/vending_machine"))
        .and(query_param("code", "VM001"))
        .and(query_param("type", "1"))
        .and(query_param("requestId", "req-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 202,
            "message": "closed",
            "data": {
                "orderCode": "O1",
                "vmCode": "VM001",
                "totalFee": 350,
                "orderGoodsList": [{"itemCode": "A1", "actualPrice": 350, "count": 1}],
                "scanCode": "SC001"
            }
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client
        .operations()
        .door_result("VM001", OpenDoorType::Shopping, "req-1")
        .await
        .unwrap();

    assert_eq!(result.status, DoorResultStatus::Closed);
    let order = result.order.unwrap();
    assert_eq!(order.order.total_fee, 350);
    assert_eq!(order.scan_code, "SC001");
}

#[tokio::test]
async fn test_door_result_background_process() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facade/open/vending_machine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 204,
            "message": "busy"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .operations()
        .door_result("VM001", OpenDoorType::Shopping, "req-1")
        .await
        .unwrap_err();

    match err {
        AinfinitError::Api(api) => {
            assert_eq!(api.table, "door result");
            assert_eq!(
                api.status::<DoorResultStatus>(),
                DoorResultStatus::BackgroundProcess
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_door_result_lock_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facade/open/vending_machine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 5055,
            "message": "lock"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .operations()
        .door_result("VM001", OpenDoorType::Replenishment, "req-2")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(5055));
}

#[tokio::test]
async fn test_list_orders() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facade/open/order/page"))
        .and(query_param("code", "VM001"))
        .and(query_param("beginTime", "1000"))
        .and(query_param("endTime", "2000"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "data": {"total": 1, "rows": [{"orderCode": "O1", "orderGoodsList": null}]}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = ListOrdersRequest::new(1, 50).between(1000, 2000);
    let page = client
        .operations()
        .list_orders("VM001", &request)
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert!(page.rows[0].order_goods_list.is_empty());
}

#[tokio::test]
async fn test_order_video() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facade/open/order/video"))
        .and(query_param("requestId", "req-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "data": {
                "orderCode": "O1",
                "videoUrl": "https://cdn/o1.mp4",
                "videoUrls": ["https://cdn/o1.mp4"],
                "videoStatus": 0
            }
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let video = client
        .operations()
        .order_video("VM001", OpenDoorType::Shopping, "req-1")
        .await
        .unwrap();

    assert_eq!(video.video_status, Some(VideoStatus::UploadComplete));
    assert!(video.is_ready());
}

#[tokio::test]
async fn test_machine_goods() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facade/open/replenish/items"))
        .and(query_param("code", "VM001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "result": [{"itemCode": "A1", "actualPrice": 300, "originalPrice": 350}],
            "count": 1
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let goods = client.operations().machine_goods("VM001").await.unwrap();

    assert_eq!(goods.result, vec![Goods::new("A1", 300, 350)]);
}

#[tokio::test]
async fn test_add_goods_duplicate() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/facade/open/replenish/items"))
        .and(query_param("code", "VM001"))
        .and(body_json(serde_json::json!([
            {"itemCode": "A1", "actualPrice": 300, "originalPrice": 350}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 40502,
            "message": "duplicate"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .operations()
        .add_goods("VM001", &[Goods::new("A1", 300, 350)])
        .await
        .unwrap_err();

    match err {
        AinfinitError::Api(api) => {
            assert_eq!(api.table, "goods change");
            assert_eq!(api.description, Some("Duplicate goods"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_replace_goods() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/facade/open/replenish/items"))
        .and(query_param("code", "VM001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": 200})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client
        .operations()
        .replace_goods("VM001", &[Goods::new("A1", 300, 350)])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_goods() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/facade/open/replenish/items"))
        .and(query_param("code", "VM001"))
        .and(body_json(serde_json::json!({"itemCodes": ["A1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": 200})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client
        .operations()
        .delete_goods("VM001", &["A1".to_string()])
        .await
        .unwrap();

    let err = client
        .operations()
        .delete_goods("VM001", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AinfinitError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_update_prices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/facade/open/replenish/replaceVmItemsPrice"))
        .and(query_param("code", "VM001"))
        .and(body_json(serde_json::json!({
            "vmCodes": ["VM001", "VM002"],
            "items": [{"itemCode": "A1", "actualPrice": 280, "originalPrice": 350}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": 200})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = PriceUpdateRequest {
        vm_codes: vec!["VM001".to_string(), "VM002".to_string()],
        items: vec![Goods::new("A1", 280, 350)],
    };
    client
        .operations()
        .update_prices("VM001", &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_prices_requires_items() {
    let server = MockServer::start().await;
    let client = build_client(&server);

    let err = client
        .operations()
        .update_prices("VM001", &PriceUpdateRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AinfinitError::InvalidRequest(_)));
}
