use std::sync::Mutex;

use common::constants::N_CHANNELS;
use common::types::{Batch, Channel, Sample};

use crate::utils::lock;

/// In-memory accumulator with one independent buffer per channel.
///
/// Each channel is guarded by its own mutex, so sensor callbacks for one
/// channel never contend with a snapshot or clear of the other. Buffers only
/// grow at the back and shrink from the front, preserving arrival order.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    channels: [Mutex<Vec<Sample>>; N_CHANNELS],
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `sample` to the buffer of its channel.
    pub fn append(&self, sample: Sample) {
        lock(self.slot(sample.channel())).push(sample);
    }

    /// Copy of everything currently buffered for `channel`. The buffer is left untouched.
    pub fn snapshot(&self, channel: Channel) -> Batch {
        let rows = lock(self.slot(channel)).clone();
        Batch::new(channel, rows)
    }

    /// Drops the oldest `count` samples of `channel` and returns how many were removed.
    ///
    /// Samples appended after the matching snapshot survive. A `count` larger than
    /// the buffer empties it.
    pub fn clear_exported(&self, channel: Channel, count: usize) -> usize {
        let mut buffer = lock(self.slot(channel));
        let removed = count.min(buffer.len());
        buffer.drain(..removed);
        removed
    }

    pub fn len(&self, channel: Channel) -> usize {
        lock(self.slot(channel)).len()
    }

    pub fn is_empty(&self, channel: Channel) -> bool {
        self.len(channel) == 0
    }

    fn slot(&self, channel: Channel) -> &Mutex<Vec<Sample>> {
        &self.channels[channel.index()]
    }
}
