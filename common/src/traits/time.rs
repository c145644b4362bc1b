/// Source of "now" used to stamp samples.
///
/// Implementations must be monotonic: successive calls never return a smaller value.
pub trait TimeSource: Send + Sync {
    fn now_millis(&self) -> u64;
}
