//! Random workload generation

use rand::Rng;
use std::fmt;
use tracing::info;

use crate::types::Tick;
use crate::workload::{CustomerRecord, WorkloadError};

/// Generator for random customer workloads
pub struct WorkloadGenerator {
    rng: Box<dyn rand::RngCore>,
}

impl fmt::Debug for WorkloadGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkloadGenerator").finish()
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkloadGenerator {
    /// Create a new workload generator
    pub fn new() -> Self {
        Self { rng: Box::new(rand::thread_rng()) }
    }

    /// Create a new workload generator with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self { rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)) }
    }

    /// Create a generator seeded when `seed` is given, entropy-based otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Generate `count` customers with ids `1..=count`
    ///
    /// Arrivals are drawn from `0..=max_arrival` and listed in ascending
    /// order; durations are drawn from `1..=max_duration`.
    pub fn generate(
        &mut self,
        count: usize,
        max_arrival: Tick,
        max_duration: Tick,
    ) -> Result<Vec<CustomerRecord>, WorkloadError> {
        if max_duration == 0 {
            return Err(WorkloadError::InvalidDurationBound(max_duration));
        }

        let mut arrivals: Vec<Tick> =
            (0..count).map(|_| self.rng.gen_range(0..=max_arrival)).collect();
        arrivals.sort_unstable();

        let records: Vec<CustomerRecord> = arrivals
            .into_iter()
            .zip(1u32..)
            .map(|(arrival, id)| {
                CustomerRecord::new(id, arrival, self.rng.gen_range(1..=max_duration))
            })
            .collect();

        info!(
            "Generated {} customers (arrivals 0..={}, durations 1..={})",
            records.len(),
            max_arrival,
            max_duration
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_records_respect_bounds() {
        let mut generator = WorkloadGenerator::with_seed(11);
        let records = generator.generate(500, 30, 6).unwrap();

        assert_eq!(records.len(), 500);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.id.value() as usize, index + 1);
            assert!(record.arrival <= 30);
            assert!((1..=6).contains(&record.duration));
        }
        assert!(records.windows(2).all(|pair| pair[0].arrival <= pair[1].arrival));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = WorkloadGenerator::with_seed(42).generate(50, 10, 4).unwrap();
        let second = WorkloadGenerator::with_seed(42).generate(50, 10, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_max_duration_is_rejected() {
        let mut generator = WorkloadGenerator::with_seed(1);
        assert!(matches!(
            generator.generate(5, 10, 0),
            Err(WorkloadError::InvalidDurationBound(0))
        ));
    }

    #[test]
    fn test_empty_workload() {
        let mut generator = WorkloadGenerator::new();
        assert!(generator.generate(0, 10, 3).unwrap().is_empty());
    }
}
