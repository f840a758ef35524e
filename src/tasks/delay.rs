use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::tasks::{config::DelayRange, error::ProvisionError, validator::ConfigValidator};

/// Process-wide random source for builder delays.
///
/// Seeded once and shared between every builder through cheap clones. Each
/// draw takes the lock for the duration of a single sample, so concurrent
/// draws are independent of each other and of the clock.
///
/// # Examples
/// ```rust
/// use provisioner::tasks::{config::DelayRange, delay::DelaySource};
///
/// let source = DelaySource::seeded(DelayRange::default(), 7).unwrap();
/// let units = source.next_units();
/// assert!((3..=20).contains(&units));
/// ```
#[derive(Debug, Clone)]
pub struct DelaySource {
    rng: Arc<Mutex<StdRng>>,
    range: DelayRange,
}

impl DelaySource {
    /// Seeds from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidConfiguration`] if `range` is empty.
    pub fn new(range: DelayRange) -> Result<Self, ProvisionError> {
        Self::from_rng(range, StdRng::from_os_rng())
    }

    pub fn seeded(range: DelayRange, seed: u64) -> Result<Self, ProvisionError> {
        Self::from_rng(range, StdRng::seed_from_u64(seed))
    }

    fn from_rng(range: DelayRange, rng: StdRng) -> Result<Self, ProvisionError> {
        ConfigValidator::validate_delay_range(&range)?;
        Ok(DelaySource {
            rng: Arc::new(Mutex::new(rng)),
            range,
        })
    }

    pub fn range(&self) -> &DelayRange {
        &self.range
    }

    /// Draws a unit count uniformly from the inclusive range.
    pub fn next_units(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(self.range.min..=self.range.max)
    }

    pub fn next_delay(&self) -> Duration {
        self.range.unit.saturating_mul(self.next_units())
    }
}
