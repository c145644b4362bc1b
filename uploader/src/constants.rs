/// Defaults matching the collector deployed alongside the walking app.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_CSV_PATH: &str = "/api/health/minio/csv";
pub const DEFAULT_FILE_FIELD: &str = "uploadFile";
pub const DEFAULT_BUCKET_FIELD: &str = "bucketName";
pub const DEFAULT_BUCKET: &str = "android";
pub const DEFAULT_START_PATH: &str = "/api/walking/start";
pub const DEFAULT_FINISH_PATH: &str = "/api/walking/finish";
pub const DEFAULT_PEDESTRIAN_ID: &str = "examplePedestrianId";
pub const DEFAULT_FLOOR_MAP_ID: &str = "exampleFloorMapId";

pub const CLIENT_TIMEOUT_DEFAULT_SECS: u64 = 5;

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const CSV_EXTENSION: &str = "csv";
