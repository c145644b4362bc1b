mod recorder;
mod sample_sink;

pub use recorder::Recorder;
pub use sample_sink::SampleSink;
