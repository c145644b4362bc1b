use crate::types::{Channel, Sample};

/// Read-only snapshot of one channel's buffered samples, taken at one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    channel: Channel,
    rows: Vec<Sample>,
}

impl Batch {
    pub fn new(channel: Channel, rows: Vec<Sample>) -> Self {
        Self { channel, rows }
    }

    pub fn empty(channel: Channel) -> Self {
        Self::new(channel, Vec::new())
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn rows(&self) -> &[Sample] {
        &self.rows
    }

    /// Number of rows, which is also the count to acknowledge once the batch is delivered.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.rows.iter()
    }
}
