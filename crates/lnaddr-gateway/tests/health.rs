use actix_web::{test, web, App};

use lnaddr_gateway::{metrics::LOOKUPS_TOTAL, routes, GatewayConfig};

fn config_with_token(token: Option<&str>) -> web::Data<GatewayConfig> {
    web::Data::new(GatewayConfig {
        metrics_token: token.map(String::from),
        ..GatewayConfig::default()
    })
}

#[actix_rt::test]
async fn test_health_reports_ok() {
    let app = test::init_service(
        App::new()
            .app_data(config_with_token(None))
            .configure(routes::health::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "lnaddr-gateway");
}

#[actix_rt::test]
async fn test_metrics_public_without_token() {
    // Registration is global and may already have happened in another test.
    let _ = lnaddr_gateway::metrics::register_metrics();
    LOOKUPS_TOTAL.with_label_values(&["200"]).inc();

    let app = test::init_service(
        App::new()
            .app_data(config_with_token(None))
            .configure(routes::health::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("lnaddr_lookups_total"));
}

#[actix_rt::test]
async fn test_metrics_requires_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(config_with_token(Some("s3cret")))
            .configure(routes::health::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "metrics token missing or wrong");

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer s3cret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}
