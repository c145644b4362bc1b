use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::types::{Channel, Sample};
use publisher::listener;
use publisher::Listener;

/// Display stand-in: records the samples it is notified of, per channel.
#[derive(Clone, Default)]
pub struct SampleSink {
    samples: Arc<DashMap<Channel, Vec<Sample>>>,
}

impl SampleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> Listener<Sample> {
        let sink = self.clone();
        listener!(sink.process_sample)
    }

    fn process_sample(&self, _id: Uuid, sample: Arc<Sample>) {
        self.samples
            .entry(sample.channel())
            .or_default()
            .push(*sample);
    }

    pub fn samples(&self, channel: Channel) -> Vec<Sample> {
        self.samples
            .get(&channel)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.samples.iter().map(|entry| entry.value().len()).sum()
    }
}

impl std::fmt::Debug for SampleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleSink")
            .field("total", &self.total())
            .finish()
    }
}
