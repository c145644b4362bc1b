mod gaussian;
mod simulated;

pub use simulated::SimulatedSensor;
