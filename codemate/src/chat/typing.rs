//! "Assistant is thinking" simulation.
//!
//! A submission appends the user message and a placeholder, then schedules
//! a resolution after a delay drawn from a [`DelaySource`]. Resolution is
//! driven by [`TypingSimulator::poll`] from the host loop, so at most one
//! reply is ever in flight and nothing runs off the owning thread.
//!
//! Time and randomness are injected ([`Clock`], [`DelaySource`]) so tests can
//! resolve replies deterministically.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use codemate_proto::category::Category;
use codemate_proto::message::{MessageId, Sender, Timestamp};

use super::dispatch;
use super::store::{MessageStore, StoreError};

/// Source of monotonic and wall-clock time.
pub trait Clock: Send {
    /// Monotonic time used for scheduling.
    fn now(&self) -> Instant;

    /// Wall-clock time stamped onto new messages.
    fn wall_time(&self) -> Timestamp;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> Timestamp {
        let ms = chrono::Utc::now().timestamp_millis();
        Timestamp::from_millis(u64::try_from(ms).unwrap_or(0))
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<(Instant, u64)>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant and the given wall time.
    #[must_use]
    pub fn new(wall_ms: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new((Instant::now(), wall_ms))),
        }
    }

    /// Move both monotonic and wall time forward.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.inner.lock();
        guard.0 += by;
        guard.1 += u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.inner.lock().0
    }

    fn wall_time(&self) -> Timestamp {
        Timestamp::from_millis(self.inner.lock().1)
    }
}

/// Produces the artificial "thinking" delay for each reply.
pub trait DelaySource: Send {
    /// Delay before the next reply resolves.
    fn next_delay(&mut self) -> Duration;
}

/// Delay drawn uniformly from `[min, max)` milliseconds.
#[derive(Debug)]
pub struct UniformDelay {
    min_ms: u64,
    max_ms: u64,
    rng: StdRng,
}

impl UniformDelay {
    /// Uniform delay seeded from the operating system.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, StdRng::from_os_rng())
    }

    /// Uniform delay with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(min: Duration, max: Duration, seed: u64) -> Self {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: Duration, max: Duration, rng: StdRng) -> Self {
        Self {
            min_ms: u64::try_from(min.as_millis()).unwrap_or(u64::MAX),
            max_ms: u64::try_from(max.as_millis()).unwrap_or(u64::MAX),
            rng,
        }
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(self.rng.random_range(self.min_ms..self.max_ms))
    }
}

/// Always the same delay.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

/// A reply that has been scheduled but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// The user text the reply answers.
    pub prompt: String,
    /// Id of the placeholder standing in for the reply.
    pub placeholder: MessageId,
    /// When the reply resolves.
    pub due: Instant,
}

/// Simulator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingState {
    /// Ready for a submission.
    Idle,
    /// A reply is pending.
    Awaiting(PendingReply),
}

/// What a submission appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// The user's message.
    pub user_message: MessageId,
    /// The placeholder appended right after it.
    pub placeholder: MessageId,
    /// How long until the reply resolves.
    pub delay: Duration,
}

/// What a resolution appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Category the prompt was classified into.
    pub category: Category,
    /// The assistant's reply message.
    pub reply: MessageId,
}

/// Drives the idle → awaiting → idle cycle.
pub struct TypingSimulator {
    state: TypingState,
    delay: Box<dyn DelaySource>,
}

impl TypingSimulator {
    /// Create an idle simulator.
    #[must_use]
    pub fn new(delay: Box<dyn DelaySource>) -> Self {
        Self {
            state: TypingState::Idle,
            delay,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &TypingState {
        &self.state
    }

    /// Whether a reply is pending.
    #[must_use]
    pub const fn is_awaiting(&self) -> bool {
        matches!(self.state, TypingState::Awaiting(_))
    }

    /// Append the user message and a placeholder, and schedule the reply.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlaceholderExists`] without touching the store
    /// if a reply is already pending.
    pub fn submit(
        &mut self,
        store: &mut MessageStore,
        prompt: &str,
        now: Instant,
        at: Timestamp,
    ) -> Result<Submission, StoreError> {
        if let TypingState::Awaiting(pending) = &self.state {
            return Err(StoreError::PlaceholderExists(pending.placeholder));
        }
        if let Some(existing) = store.placeholder() {
            return Err(StoreError::PlaceholderExists(existing.id));
        }

        let user_message = store.append(Sender::User, prompt, at);
        let placeholder = store.append_placeholder(at)?;
        let delay = self.delay.next_delay();

        self.state = TypingState::Awaiting(PendingReply {
            prompt: prompt.to_string(),
            placeholder,
            due: now + delay,
        });

        Ok(Submission {
            user_message,
            placeholder,
            delay,
        })
    }

    /// Resolve the pending reply if its delay has elapsed.
    ///
    /// Removes the placeholder, classifies the prompt, and appends the
    /// assistant's reply. Returns `None` when idle or not yet due.
    pub fn poll(
        &mut self,
        store: &mut MessageStore,
        now: Instant,
        at: Timestamp,
    ) -> Option<Resolution> {
        let TypingState::Awaiting(pending) = &self.state else {
            return None;
        };
        if now < pending.due {
            return None;
        }

        let TypingState::Awaiting(pending) = std::mem::replace(&mut self.state, TypingState::Idle)
        else {
            return None;
        };

        if let Err(e) = store.remove_last() {
            tracing::warn!(placeholder = %pending.placeholder, "placeholder missing on resolve: {e}");
        }

        let (category, text) = dispatch::respond(&pending.prompt);
        let reply = store.append(Sender::Assistant, text, at);
        Some(Resolution { category, reply })
    }

    /// Drop a pending reply and its placeholder. Returns whether one was pending.
    pub fn cancel(&mut self, store: &mut MessageStore) -> bool {
        match std::mem::replace(&mut self.state, TypingState::Idle) {
            TypingState::Idle => false,
            TypingState::Awaiting(pending) => {
                if let Err(e) = store.remove_last() {
                    tracing::warn!(placeholder = %pending.placeholder, "placeholder missing on cancel: {e}");
                }
                true
            }
        }
    }
}

impl std::fmt::Debug for TypingSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingSimulator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
