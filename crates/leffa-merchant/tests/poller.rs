//! Polling tests. These run on real time with a one-second interval.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::FixedOffset;
use leffa_analytics::{DashboardUpdate, FixedPlaceholders};
use leffa_merchant::{subscribe_to_analytics_updates, MerchantAnalytics, MerchantClient};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(base_url: &str) -> Arc<MerchantAnalytics> {
    let client = MerchantClient::with_base_url(base_url, 30, "leffa-test")
        .expect("client construction should not fail");
    Arc::new(
        MerchantAnalytics::new(client, FixedOffset::east_opt(0).unwrap())
            .with_placeholders(Arc::new(FixedPlaceholders::default())),
    )
}

async fn mount(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/api/merchant/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "success": true,
                    "data": [
                        { "total": "100", "status": "delivered" },
                        { "total": "50", "status": "processing" }
                    ]
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/merchant/shiprocket/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": [] }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delivers_updates_until_unsubscribed() {
    let server = MockServer::start().await;
    mount(&server, Duration::ZERO).await;

    let calls = Arc::new(AtomicUsize::new(0));
    let last: Arc<Mutex<Option<DashboardUpdate>>> = Arc::new(Mutex::new(None));
    let callback = {
        let calls = Arc::clone(&calls);
        let last = Arc::clone(&last);
        Arc::new(move |update: DashboardUpdate| {
            calls.fetch_add(1, Ordering::SeqCst);
            *last.lock().unwrap() = Some(update);
        })
    };

    let subscription =
        subscribe_to_analytics_updates(service(&server.uri()), Duration::from_secs(1), callback)
            .await
            .expect("subscription should start");

    tokio::time::sleep(Duration::from_millis(2_600)).await;
    assert!(calls.load(Ordering::SeqCst) >= 1, "expected at least one update");

    {
        let guard = last.lock().unwrap();
        let update = guard.as_ref().unwrap();
        assert_eq!(update.summary.total_sales, Decimal::from(150));
        assert_eq!(update.summary.total_orders, 2);
        assert_eq!(update.summary.average_order_value, Decimal::from(75));
        assert_eq!(update.summary.conversion_rate, Decimal::from(10));
        assert_eq!(update.dashboard.active_orders, 1);
    }

    subscription.unsubscribe().await.expect("unsubscribe should succeed");
    let after_unsubscribe = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(2_000)).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_unsubscribe);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_ticks_are_skipped() {
    let server = MockServer::start().await;
    // Each refresh takes two and a half intervals.
    mount(&server, Duration::from_millis(2_500)).await;

    let callback = Arc::new(|_update: DashboardUpdate| {});
    let subscription =
        subscribe_to_analytics_updates(service(&server.uri()), Duration::from_secs(1), callback)
            .await
            .expect("subscription should start");

    tokio::time::sleep(Duration::from_millis(5_200)).await;
    let requests = server.received_requests().await.unwrap_or_default();
    subscription.unsubscribe().await.expect("unsubscribe should succeed");

    // One refresh is two requests. At most two refreshes can start in the
    // window when each waits for the previous one; without that, five would.
    assert!(
        (2..=4).contains(&requests.len()),
        "unexpected request count {}",
        requests.len()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dropping_the_handle_stops_polling() {
    let server = MockServer::start().await;
    mount(&server, Duration::ZERO).await;

    let calls = Arc::new(AtomicUsize::new(0));
    let callback = {
        let calls = Arc::clone(&calls);
        Arc::new(move |_update: DashboardUpdate| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    let subscription =
        subscribe_to_analytics_updates(service(&server.uri()), Duration::from_secs(1), callback)
            .await
            .expect("subscription should start");

    tokio::time::sleep(Duration::from_millis(1_600)).await;
    assert!(!subscription.is_cancelled());
    drop(subscription);

    // Let the background shutdown finish before taking the baseline.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let baseline = server.received_requests().await.unwrap_or_default().len();
    let calls_at_drop = calls.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), baseline);
    assert_eq!(calls.load(Ordering::SeqCst), calls_at_drop);
}
