/// Number of axes reported by every motion sensor.
pub const N_XYZ_COORDINATES: usize = 3;

/// Number of sensor channels handled by the pipeline.
pub const N_CHANNELS: usize = 2;

/// Column names of a serialized batch.
pub const BATCH_COLUMNS: [&str; 4] = ["t", "x", "y", "z"];

/// Header line written at the top of every serialized batch.
pub const BATCH_HEADER: &str = "t,x,y,z\n";
