/// Epoch of the current session, set by the first sample observed after a start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionClock {
    first_sample_at: Option<u64>,
}

impl SessionClock {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn first_sample_at(&self) -> Option<u64> {
        self.first_sample_at
    }

    pub fn is_set(&self) -> bool {
        self.first_sample_at.is_some()
    }

    /// Returns the clock after observing a sample at `now_ms`, and the elapsed
    /// time of that sample. The epoch is only ever set once.
    pub fn observe(self, now_ms: u64) -> (Self, u64) {
        let first_sample_at = self.first_sample_at.unwrap_or(now_ms);
        (
            Self {
                first_sample_at: Some(first_sample_at),
            },
            now_ms.saturating_sub(first_sample_at),
        )
    }
}

/// Sensing session control state.
///
/// All transitions are pure: they take the current value and return the next one.
///
/// # Examples
///
/// ```
/// use common::types::Session;
///
/// let session = Session::new().started();
/// let (session, elapsed) = session.observe(1_000);
/// assert_eq!(elapsed, Some(0));
/// let (session, elapsed) = session.observe(1_500);
/// assert_eq!(elapsed, Some(500));
///
/// let (_, elapsed) = session.stopped().observe(2_000);
/// assert_eq!(elapsed, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    active: bool,
    clock: SessionClock,
    epoch: u64,
}

impl Session {
    /// A stopped session that has never been started.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn clock(&self) -> SessionClock {
        self.clock
    }

    /// Number of times the session has been started.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns true if the session is active and was started at `epoch`.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.active && self.epoch == epoch
    }

    /// Starts a new session with an unset clock. No-op if already active.
    pub fn started(self) -> Self {
        if self.active {
            return self;
        }
        Self {
            active: true,
            clock: SessionClock::unset(),
            epoch: self.epoch + 1,
        }
    }

    /// Stops the session. No-op if already stopped.
    pub fn stopped(self) -> Self {
        Self {
            active: false,
            ..self
        }
    }

    /// Observes a sample at `now_ms`. Returns `None` as elapsed time if the session is not active.
    pub fn observe(self, now_ms: u64) -> (Self, Option<u64>) {
        if !self.active {
            return (self, None);
        }
        let (clock, elapsed_ms) = self.clock.observe(now_ms);
        (Self { clock, ..self }, Some(elapsed_ms))
    }
}
