use rand::Rng;

/// Source of uniform random values in `[0, 1)` used for sampling.
///
/// Implementations must be callable concurrently; the sampler never holds the
/// client's buffer lock while drawing.
pub trait RandomSource: Send + Sync {
    /// Returns the next value in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// Draws from the thread-local generator of the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same value. Useful to pin sampling outcomes in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

/// Outcome of sampling one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleDecision {
    /// Send the event. `Some(rate)` means the line must carry `|@rate`.
    Emit(Option<f64>),
    /// Skip the event. This is a successful outcome, not an error.
    Drop,
}

/// Statistical thinning of high-frequency events.
pub struct Sampler {
    source: Box<dyn RandomSource>,
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sampler(...)")
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(ThreadRngSource)
    }
}

impl Sampler {
    /// Creates a sampler drawing from `source`.
    pub fn new<R: RandomSource + 'static>(source: R) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Decides whether an event at `rate` is sent.
    ///
    /// Rates are not validated: `rate >= 1` always emits without suffix and
    /// `rate <= 0` never emits.
    #[must_use]
    pub fn decide(&self, rate: f64) -> SampleDecision {
        if rate >= 1.0 {
            return SampleDecision::Emit(None);
        }
        if self.source.next_unit() < rate {
            SampleDecision::Emit(Some(rate))
        } else {
            SampleDecision::Drop
        }
    }
}
