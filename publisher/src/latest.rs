use dashmap::DashMap;
use std::sync::Arc;

use common::types::{Channel, Sample, XYZ};

/// Most recent sample of every channel, for display collaborators that poll
/// instead of subscribing. Holds one value per channel, never the buffer.
#[derive(Clone, Default)]
pub struct LatestSamples {
    board: Arc<DashMap<Channel, Sample>>,
}

impl LatestSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `sample` as the newest reading of its channel.
    pub fn update(&self, sample: Sample) {
        self.board.insert(sample.channel(), sample);
    }

    pub fn latest(&self, channel: Channel) -> Option<Sample> {
        self.board.get(&channel).map(|entry| *entry.value())
    }

    /// Latest axis values of `channel`, the readout operators see.
    pub fn latest_axes(&self, channel: Channel) -> Option<XYZ> {
        self.latest(channel).map(|sample| sample.measurement())
    }
}
