use std::sync::Arc;
use tokio::time::Duration;

use common::types::{Channel, UploadReport};
use pipeline_rs::{init_logging, run_service, PipelineConfig};
use publisher::Listener;
use test_utils::SimulatedSensor;

fn report_upload(_id: uuid::Uuid, report: Arc<UploadReport>) {
    match &report.outcome {
        Ok(ack) => println!(
            "{}: {} rows delivered ({})",
            report.batch_name, report.rows, ack.status
        ),
        Err(e) => println!("{}: {} rows kept, {}", report.batch_name, report.rows, e),
    }
}

// Streams simulated readings for a few seconds to the collector configured in
// the TOML file given as first argument (defaults otherwise).
#[tokio::main]
async fn main() {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::load(path).unwrap(),
        None => PipelineConfig::default(),
    };
    let pipeline = run_service(config).unwrap();
    pipeline.register_upload_listener(&mut Listener::new(report_upload));
    pipeline.start().unwrap();

    // 50 Hz sensor callback thread
    let sensor = SimulatedSensor::new(2024, 0.05).unwrap();
    let handle_sensor = sensor.spawn(Duration::from_millis(20), 250, {
        let pipeline = pipeline.clone();
        move |event| pipeline.on_event(event)
    });

    let latest = pipeline.latest_samples();
    for _ in 0..5 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        println!(
            "accel {:?} gyro {:?}",
            latest.latest_axes(Channel::Accel),
            latest.latest_axes(Channel::Gyro)
        );
    }

    handle_sensor.join().unwrap();
    for upload in pipeline.stop() {
        let _ = upload.await;
    }
    println!(
        "pending: accel {} gyro {}",
        pipeline.buffered(Channel::Accel),
        pipeline.buffered(Channel::Gyro)
    );
}
