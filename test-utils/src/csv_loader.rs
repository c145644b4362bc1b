use std::error::Error;
use std::path::Path;

use csv::{Reader, StringRecord};

use common::constants::BATCH_HEADER;
use common::types::{Channel, Sample};

/// Column order of a serialized batch.
#[repr(usize)]
#[derive(Debug, Clone, Copy)]
pub enum BatchColumn {
    Timestamp,
    X,
    Y,
    Z,
}

impl From<BatchColumn> for usize {
    fn from(value: BatchColumn) -> Self {
        value as usize
    }
}

/// Parses the bytes of an uploaded batch back into samples of `channel`.
///
/// Fails if the header is not exactly `t,x,y,z` or a row is malformed.
pub fn parse_batch(channel: Channel, bytes: &[u8]) -> Result<Vec<Sample>, Box<dyn Error>> {
    if !bytes.starts_with(BATCH_HEADER.as_bytes()) {
        return Err("Batch does not start with the t,x,y,z header".into());
    }
    read_samples(channel, Reader::from_reader(bytes))
}

/// Loads a staged batch file.
pub fn load_batch(channel: Channel, file_path: impl AsRef<Path>) -> Result<Vec<Sample>, Box<dyn Error>> {
    let bytes = std::fs::read(file_path)?;
    parse_batch(channel, &bytes)
}

fn read_samples<R: std::io::Read>(
    channel: Channel,
    mut rdr: Reader<R>,
) -> Result<Vec<Sample>, Box<dyn Error>> {
    rdr.records()
        .map(|record| record_to_sample(channel, &record?))
        .collect()
}

fn record_to_sample(channel: Channel, record: &StringRecord) -> Result<Sample, Box<dyn Error>> {
    if record.len() != 4 {
        return Err(format!("Expected 4 columns, found {}", record.len()).into());
    }
    let field = |column: BatchColumn| {
        record
            .get(column.into())
            .ok_or_else(|| format!("Column {:?} missing", column))
    };
    let elapsed_ms = field(BatchColumn::Timestamp)?.parse::<u64>()?;
    let x = field(BatchColumn::X)?.parse::<f64>()?;
    let y = field(BatchColumn::Y)?.parse::<f64>()?;
    let z = field(BatchColumn::Z)?.parse::<f64>()?;
    Ok(Sample::new(channel, elapsed_ms, [x, y, z]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch() {
        let samples =
            parse_batch(Channel::Accel, b"t,x,y,z\n0,0.1,0.2,9.8\n500,0.0,0.0,9.8\n").unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::new(Channel::Accel, 0, [0.1, 0.2, 9.8]),
                Sample::new(Channel::Accel, 500, [0.0, 0.0, 9.8]),
            ]
        );
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse_batch(Channel::Gyro, b"t,x,y,z\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_header() {
        assert!(parse_batch(Channel::Gyro, b"0,0.1,0.2,0.3\n").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_row() {
        assert!(parse_batch(Channel::Gyro, b"t,x,y,z\n-1,0.1,0.2,0.3\n").is_err());
        assert!(parse_batch(Channel::Gyro, b"t,x,y,z\n0,a,0.2,0.3\n").is_err());
    }

    #[test]
    #[should_panic(expected = "No such file or directory")]
    fn test_load_inexistent_batch() {
        load_batch(Channel::Gyro, "./test_data/missing.csv").unwrap();
    }
}
