use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random tie-breaking term mixed into suitability and confidence.
///
/// Implementations must yield values in `[0, 1)`. Each planning run owns its own
/// source so concurrent runs never share entropy state.
pub trait JitterSource {
    fn next(&mut self) -> f64;
}

/// Adapter exposing any `rand` generator as a jitter source.
#[derive(Debug, Clone)]
pub struct RngJitter<R> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngJitter<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> JitterSource for RngJitter<R> {
    fn next(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Constant source, handy for pinning a run to a known jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next(&mut self) -> f64 {
        self.0
    }
}

/// Draws from the source and forces the result into `[0, 1)`.
pub(crate) fn draw(source: &mut dyn JitterSource) -> f64 {
    let value = source.next();
    if value.is_finite() {
        value.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    }
}
