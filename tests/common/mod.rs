#![allow(dead_code)]

use std::io::Write;
use std::sync::Once;

use tokio::net::TcpListener;

use zonebar::config::{AppConfig, DeploymentConfig};
use zonebar::{create_router, AppState};

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("zonebar=debug")
            .with_test_writer()
            .init();
    });
}

/// A running test instance and the scratch directory holding its marker file.
pub struct TestApp {
    pub address: String,
    _marker_dir: tempfile::TempDir,
}

/// Spawns the application on an ephemeral port.
///
/// `zone` is the configured deployment zone (None = misconfigured) and
/// `marker` the content of the zone marker file (None = no marker file,
/// the clean-start case).
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(zone: Option<&str>, marker: Option<&str>) -> TestApp {
    init_tracing_once();

    let marker_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let marker_path = marker_dir.path().join("current_zone");
    if let Some(content) = marker {
        let mut file = std::fs::File::create(&marker_path).expect("Failed to create marker file");
        file.write_all(content.as_bytes())
            .expect("Failed to write marker file");
    }

    let config = AppConfig {
        deployment: DeploymentConfig {
            zone: zone.map(str::to_string),
            marker_file: marker_path.to_string_lossy().into_owned(),
        },
        ..AppConfig::default()
    };

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    let app = create_router(AppState::initialize(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready (any response counts, 503 included)
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .head(format!("{address}/health"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    TestApp {
        address,
        _marker_dir: marker_dir,
    }
}
