use csv::Writer;

use common::constants::{BATCH_COLUMNS, BATCH_HEADER};
use common::types::{Batch, Sample};

use crate::constants::ROW_CAPACITY_HINT;
use crate::errors::PipelineError;

/// Encodes a batch as the CSV text the collector ingests.
///
/// Output is the header `t,x,y,z` followed by one record per row, each ending
/// in `\n`. Elapsed time is written as an integer and axis values in their
/// shortest round-trippable form (`0.1`, `9.8`, `1.0`). The same batch always
/// produces the same bytes, and an empty batch produces the header alone.
///
/// # Example
///
/// ```
/// use common::types::{Batch, Channel, Sample};
/// use pipeline_rs::BatchSerializer;
///
/// let batch = Batch::new(Channel::Accel, vec![Sample::new(Channel::Accel, 0, [0.1, 0.2, 9.8])]);
/// let bytes = BatchSerializer::new().serialize(&batch).unwrap();
/// assert_eq!(bytes, b"t,x,y,z\n0,0.1,0.2,9.8\n");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchSerializer;

impl BatchSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Returns a Serialize error if a record cannot be encoded.
    pub fn serialize(&self, batch: &Batch) -> Result<Vec<u8>, PipelineError> {
        let capacity = BATCH_HEADER.len() + batch.len() * ROW_CAPACITY_HINT;
        let mut wtr = Writer::from_writer(Vec::with_capacity(capacity));
        wtr.write_record(BATCH_COLUMNS)?;
        for sample in batch.iter() {
            wtr.write_record(row_fields(sample))?;
        }
        wtr.into_inner().map_err(|e| PipelineError::Io(e.into_error()))
    }
}

fn row_fields(sample: &Sample) -> [String; 4] {
    let measurement = sample.measurement();
    [
        sample.elapsed_ms().to_string(),
        format!("{:?}", measurement.x()),
        format!("{:?}", measurement.y()),
        format!("{:?}", measurement.z()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::Channel;

    #[test]
    fn test_empty_batch_is_header_only() {
        let bytes = BatchSerializer::new()
            .serialize(&Batch::empty(Channel::Gyro))
            .unwrap();
        assert_eq!(bytes, b"t,x,y,z\n");
    }

    #[test]
    fn test_rows_in_order() {
        let batch = Batch::new(
            Channel::Accel,
            vec![
                Sample::new(Channel::Accel, 0, [0.1, 0.2, 9.8]),
                Sample::new(Channel::Accel, 500, [0.0, 0.0, 9.8]),
                Sample::new(Channel::Accel, 1000, [-1.5, 1.0, 2.25]),
            ],
        );
        let text = String::from_utf8(BatchSerializer::new().serialize(&batch).unwrap()).unwrap();
        assert_eq!(
            text,
            "t,x,y,z\n0,0.1,0.2,9.8\n500,0.0,0.0,9.8\n1000,-1.5,1.0,2.25\n"
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let batch = Batch::new(
            Channel::Gyro,
            vec![Sample::new(Channel::Gyro, 7, [0.123456789, 1e-9, 3.0])],
        );
        let serializer = BatchSerializer::new();
        assert_eq!(
            serializer.serialize(&batch).unwrap(),
            serializer.serialize(&batch).unwrap()
        );
    }

    #[test]
    fn test_values_round_trip() {
        let values = [0.1 + 0.2, std::f64::consts::PI, -123.456e7];
        let batch = Batch::new(Channel::Gyro, vec![Sample::new(Channel::Gyro, 42, values)]);
        let text = String::from_utf8(BatchSerializer::new().serialize(&batch).unwrap()).unwrap();
        let row = text.lines().nth(1).unwrap();
        let parsed: Vec<f64> = row
            .split(',')
            .skip(1)
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(parsed, values.to_vec());
    }

    #[test]
    fn test_matches_header_constant() {
        let bytes = BatchSerializer::new()
            .serialize(&Batch::empty(Channel::Accel))
            .unwrap();
        assert_eq!(bytes, BATCH_HEADER.as_bytes());
    }
}
