use common::Channel;
use pipeline_rs::{run_service, PipelineConfig, StagingPolicy};
use test_utils::SimulatedSensor;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, staging_dir: &std::path::Path, tick_ms: u64) -> PipelineConfig {
    let toml = format!(
        r#"
tick_interval_ms = {}
flush_on_stop = true
staging_dir = "{}"
staging_policy = "refuse"

[upload]
base_url = "{}"

[session]
pedestrian_id = "ped-1"
floor_map_id = "map-1"
trajectory_id = "traj-1"
"#,
        tick_ms,
        staging_dir.display(),
        server.uri()
    );
    PipelineConfig::from_toml_str(&toml).unwrap()
}

#[tokio::test]
async fn test_session_uploads_to_collector() {
    let server = MockServer::start().await;
    let staging = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/walking/start"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/walking/finish"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/health/minio/csv"))
        .and(body_string_contains("t,x,y,z\n"))
        .and(body_string_contains("android"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(&server, staging.path(), 100);
    assert_eq!(config.staging_policy, StagingPolicy::Refuse);
    let pipeline = run_service(config).unwrap();
    pipeline.start().unwrap();

    let mut sensor = SimulatedSensor::new(11, 0.02).unwrap();
    for event in sensor.events(20) {
        pipeline.on_event(event);
    }
    tokio::time::sleep(std::time::Duration::from_millis(350)).await;

    for upload in pipeline.stop() {
        assert!(upload.await.unwrap().is_success());
    }
    // let the finish announcement go out before the server verifies
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    assert_eq!(pipeline.buffered(Channel::Accel), 0);
    assert_eq!(pipeline.buffered(Channel::Gyro), 0);
    assert_eq!(pipeline.upload_health(Channel::Accel).delivered_rows, 20);
    assert_eq!(pipeline.upload_health(Channel::Gyro).delivered_rows, 20);
    // staging files are removed once delivered
    assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_collector_down_keeps_samples() {
    let server = MockServer::start().await;
    let staging = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/health/minio/csv"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let pipeline = run_service(config_for(&server, staging.path(), 60_000)).unwrap();
    pipeline.start().unwrap();
    let mut sensor = SimulatedSensor::new(5, 0.02).unwrap();
    for event in sensor.events(4) {
        pipeline.on_event(event);
    }

    for upload in pipeline.on_tick() {
        assert!(!upload.await.unwrap().is_success());
    }
    assert_eq!(pipeline.buffered(Channel::Accel), 4);
    assert_eq!(pipeline.buffered(Channel::Gyro), 4);

    // the staged copy of the failed batch stays until a later success
    let staged = test_utils::csv_loader::load_batch(
        Channel::Accel,
        staging.path().join("acc_sensor_data.csv"),
    )
    .unwrap();
    assert_eq!(staged.len(), 4);
    pipeline.stop();
}
