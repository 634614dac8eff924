use ainfinit_api_client::auth::EnvCredentials;
use ainfinit_api_client::rest::AinfinitClient;
use ainfinit_api_client::rest::device::ListMachinesRequest;
use ainfinit_api_client::rest::product::ProductListRequest;

fn live_tests_enabled() -> bool {
    std::env::var("AINFINIT_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn live_client() -> Result<Option<AinfinitClient>, Box<dyn std::error::Error>> {
    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(None),
    };
    let mut builder = AinfinitClient::builder(credentials);
    if let Ok(url) = std::env::var("AINFINIT_BASE_URL") {
        builder = builder.base_url(url);
    }
    Ok(Some(builder.build()?))
}

#[tokio::test]
#[ignore]
async fn live_device_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let Some(client) = live_client()? else {
        return Ok(());
    };

    let machines = client
        .devices()
        .list_machines(&ListMachinesRequest::new(1, 10))
        .await?;
    assert!(machines.total >= machines.rows.len() as i64);

    if let Some(machine) = machines.rows.first() {
        let status = client.devices().device_status(&machine.scan_code).await?;
        assert!(!status.code.is_empty());
    }

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_product_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let Some(client) = live_client()? else {
        return Ok(());
    };

    let info = client.products().latest_info().await?;
    let page = client
        .products()
        .list_products(&ProductListRequest::new(1, 5))
        .await?;
    assert!(page.rows.len() as i64 <= info.count.max(5));

    Ok(())
}
