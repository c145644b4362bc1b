use std::fmt;

use crate::constants::N_CHANNELS;

/// Represents the motion sensor streams captured by the pipeline.
///
/// # Variants
///
/// - `Accel`: linear acceleration (gravity removed by the platform).
/// - `Gyro`: angular rate.
///
/// # Examples
///
/// ```
/// use common::types::Channel;
///
/// assert_eq!(usize::from(Channel::Gyro), 1);
/// assert_eq!(Channel::try_from("Accelerometer").unwrap(), Channel::Accel);
/// assert_eq!(Channel::Accel.default_batch_name(), "acc_sensor_data");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Accel,
    Gyro,
}

const ACCEL_INDEX: usize = 0;
const GYRO_INDEX: usize = 1;

impl Channel {
    /// All channels, ordered by index.
    pub const ALL: [Channel; N_CHANNELS] = [Channel::Accel, Channel::Gyro];

    /// Returns the position of the channel in per-channel arrays.
    pub fn index(self) -> usize {
        match self {
            Channel::Accel => ACCEL_INDEX,
            Channel::Gyro => GYRO_INDEX,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Accel => "accel",
            Channel::Gyro => "gyro",
        }
    }

    /// Logical batch name the collector expects for this channel.
    pub fn default_batch_name(self) -> &'static str {
        match self {
            Channel::Accel => "acc_sensor_data",
            Channel::Gyro => "sensor_data",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Channel> for usize {
    fn from(value: Channel) -> Self {
        value.index()
    }
}

impl From<&Channel> for usize {
    fn from(value: &Channel) -> Self {
        value.index()
    }
}

impl TryFrom<usize> for Channel {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            ACCEL_INDEX => Ok(Channel::Accel),
            GYRO_INDEX => Ok(Channel::Gyro),
            _ => Err(format!("Channel {} doesnt exist", value)),
        }
    }
}

impl TryFrom<&str> for Channel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower_case_value = value.to_lowercase();
        if lower_case_value.contains("acc") {
            Ok(Channel::Accel)
        } else if lower_case_value.contains("gyr") {
            Ok(Channel::Gyro)
        } else {
            Err(format!("Unknown channel {}", value))
        }
    }
}

impl TryFrom<String> for Channel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Channel::try_from(value.as_str())
    }
}
