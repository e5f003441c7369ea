mod common;

use common::spawn_app;

#[tokio::test]
async fn probe_succeeds_after_clean_start() {
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();

    let response = client
        .head(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.expect("Failed to read body"), "");
}

#[tokio::test]
async fn probe_fails_when_marker_names_the_other_zone() {
    // A green instance left "green" in the marker file, then this blue
    // instance starts: blue is the old zone and must not take traffic.
    let app = spawn_app(Some("blue"), Some("green\n")).await;
    let client = reqwest::Client::new();

    let response = client
        .head(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn probe_succeeds_when_marker_names_this_zone() {
    let app = spawn_app(Some("green"), Some("green\n")).await;
    let client = reqwest::Client::new();

    let response = client
        .head(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn disable_and_enable_report_transitions_and_noops() {
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();
    let disable_url = format!("{}/health/disable", app.address);
    let enable_url = format!("{}/health/enable", app.address);
    let probe_url = format!("{}/health", app.address);

    let response = client
        .post(&disable_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "DISABLING the server"
    );

    let probe = client
        .head(&probe_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(probe.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let response = client
        .post(&disable_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "NoOp, already disabled"
    );

    let response = client
        .post(&enable_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "ENABLING the server"
    );

    let probe = client
        .head(&probe_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(probe.status(), reqwest::StatusCode::OK);

    let response = client
        .post(&enable_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "NoOp, already enabled"
    );
}

#[tokio::test]
async fn get_to_any_health_path_gets_the_explanatory_404() {
    // GETs are never probes or toggles: they get the same 404 and body
    // as a request for a path that does not exist at all.
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();

    for path in ["/health", "/health/disable", "/health/enable"] {
        let response = client
            .get(format!("{}{path}", app.address))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND, "{path}");
        assert_eq!(
            response.text().await.expect("Failed to read body"),
            "Only /health is served here",
            "{path}"
        );
    }
}

#[tokio::test]
async fn head_to_a_toggle_path_gets_a_404() {
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();

    for path in ["/health/disable", "/health/enable"] {
        let response = client
            .head(format!("{}{path}", app.address))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn post_to_the_probe_path_is_method_not_allowed() {
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_path_gets_a_helpful_404() {
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/some/other/page", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body = response.text().await.expect("Failed to read body");
    assert_eq!(body, "Only /health is served here");
}

#[tokio::test]
async fn concurrent_toggles_never_produce_an_illegal_body() {
    let app = spawn_app(Some("blue"), None).await;
    let client = reqwest::Client::new();

    let legal = [
        "DISABLING the server",
        "NoOp, already disabled",
        "ENABLING the server",
        "NoOp, already enabled",
    ];

    let mut handles = Vec::new();
    for i in 0..50 {
        let client = client.clone();
        let address = app.address.clone();
        handles.push(tokio::spawn(async move {
            let path = if i % 2 == 0 {
                "/health/disable"
            } else {
                "/health/enable"
            };
            let response = client
                .post(format!("{address}{path}"))
                .send()
                .await
                .expect("Failed to execute request");
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            response.text().await.expect("Failed to read body")
        }));
    }
    for handle in handles {
        let body = handle.await.expect("Toggle task panicked");
        assert!(legal.contains(&body.as_str()), "unexpected body: {body}");
    }

    // Whatever interleaving happened, one more toggle settles the flag.
    client
        .post(format!("{}/health/disable", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let probe = client
        .head(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(probe.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    client
        .post(format!("{}/health/enable", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let probe = client
        .head(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(probe.status(), reqwest::StatusCode::OK);
}
