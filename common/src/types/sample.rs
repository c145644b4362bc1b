use crate::constants::N_XYZ_COORDINATES;
use crate::types::{Channel, XYZ};

/// A timestamped reading from one channel.
///
/// `elapsed_ms` is measured from the first sample observed in the session,
/// across both channels.
///
/// # Examples
///
/// ```
/// use common::types::{Channel, Sample, XYZ};
///
/// let sample = Sample::new(Channel::Accel, 500, [0.1, 0.2, 9.8]);
///
/// assert_eq!(sample.elapsed_ms(), 500);
/// assert_eq!(sample.measurement(), XYZ::from([0.1, 0.2, 9.8]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    channel: Channel,
    elapsed_ms: u64,
    measurement: XYZ,
}

impl Sample {
    /// Creates a new `Sample` from a channel, an elapsed time and a measurement array.
    pub fn new(channel: Channel, elapsed_ms: u64, measurement: [f64; N_XYZ_COORDINATES]) -> Self {
        Self {
            channel,
            elapsed_ms,
            measurement: XYZ::new(measurement),
        }
    }

    /// Creates a new `Sample` from a channel, an elapsed time and an `XYZ` measurement.
    pub fn from_xyz(channel: Channel, elapsed_ms: u64, measurement: XYZ) -> Self {
        Self {
            channel,
            elapsed_ms,
            measurement,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn measurement(&self) -> XYZ {
        self.measurement
    }
}

/// An untimed event as delivered by the sensor source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEvent {
    pub channel: Channel,
    pub measurement: XYZ,
}

impl RawEvent {
    pub fn new(channel: Channel, x: f64, y: f64, z: f64) -> Self {
        Self {
            channel,
            measurement: XYZ::new([x, y, z]),
        }
    }

    /// Stamps the event, turning it into a `Sample`.
    pub fn into_sample(self, elapsed_ms: u64) -> Sample {
        Sample::from_xyz(self.channel, elapsed_ms, self.measurement)
    }
}
