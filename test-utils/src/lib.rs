//! Helpers shared by the workspace tests and demos: a reader for uploaded
//! batches, sinks recording what listeners receive and a simulated sensor.

pub mod csv_loader;
pub mod sensors;
pub mod sinks;

pub use sensors::SimulatedSensor;
pub use sinks::{Recorder, SampleSink};
