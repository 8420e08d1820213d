use std::{fmt::Display, num::NonZero};

use crate::{Sma, Smoother, Timestamp};

/// Exponential Moving Average over a scalar stream.
///
/// A weighted moving average giving more weight to recent samples, with the
/// standard smoothing factor `α = 2 / (length + 1)`:
///
/// ```text
/// EMA = α × value + (1 − α) × prev_EMA
/// ```
///
/// The first `length` samples are collected into an SMA seed. After seeding
/// the SMA state is dropped and the EMA runs with O(1) memory per sample via
/// a single fused multiply-add. The seed's influence decays exponentially
/// but never fully disappears; the first output is at sample `length`.
///
/// # Example
///
/// ```
/// use momenta::{Ema, Smoother};
/// use std::num::NonZero;
///
/// let mut ema = Ema::new(NonZero::new(3).unwrap());
///
/// assert_eq!(ema.update(1, 2.0), None);
/// assert_eq!(ema.update(2, 4.0), None);
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.update(3, 6.0), Some(4.0));
/// // α = 0.5: 8 × 0.5 + 4 × 0.5 = 6.0
/// assert_eq!(ema.update(4, 8.0), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    length: usize,
    alpha: f64,
    seed: Option<Sma>,
    current: Option<f64>,
    last_time: Option<Timestamp>,
}

impl Ema {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (length.get() + 1) as f64,
            seed: Some(Sma::new(length)),
            current: None,
            last_time: None,
        }
    }

    /// Window length (number of samples).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Smoother for Ema {
    #[inline]
    fn update(&mut self, time: Timestamp, value: f64) -> Option<f64> {
        debug_assert!(
            self.last_time.is_none_or(|t| t < time),
            "timestamps must be strictly increasing: last={}, got={time}",
            self.last_time.unwrap_or(0),
        );
        self.last_time = Some(time);

        match &mut self.seed {
            Some(sma) => {
                self.current = sma.update(time, value);
                if self.current.is_some() {
                    self.seed = None;
                }
            }
            None => {
                let previous = self
                    .current
                    .expect("EMA must hold a value after the seeding phase");
                self.current = Some(self.alpha.mul_add(value - previous, previous));
            }
        }

        self.current
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, nz};

    fn ema(length: usize) -> Ema {
        Ema::new(nz(length))
    }

    mod seeding {
        use super::*;

        #[test]
        fn none_during_seeding() {
            let mut ema = ema(3);
            assert_eq!(ema.update(1, 10.0), None);
            assert_eq!(ema.update(2, 20.0), None);
        }

        #[test]
        fn first_value_is_sma_seed() {
            let mut ema = ema(3);
            ema.update(1, 2.0);
            ema.update(2, 4.0);
            // (2 + 4 + 6) / 3 = 4.0
            assert_eq!(ema.update(3, 6.0), Some(4.0));
        }
    }

    mod computation {
        use super::*;

        #[test]
        fn applies_formula_after_seed() {
            // EMA(3): α = 2/(3+1) = 0.5
            let mut ema = ema(3);
            ema.update(1, 2.0);
            ema.update(2, 4.0);
            ema.update(3, 6.0); // seed = 4.0
            assert_eq!(ema.update(4, 8.0), Some(6.0));
            assert_eq!(ema.update(5, 10.0), Some(8.0));
        }

        #[test]
        fn constant_input_stays_constant() {
            let mut ema = ema(3);
            for t in 1..=20 {
                if let Some(v) = ema.update(t, 42.0) {
                    assert_approx!(v, 42.0);
                }
            }
        }

        #[test]
        fn converges_toward_constant_input() {
            let mut ema = ema(3);
            ema.update(1, 0.0);
            ema.update(2, 0.0);
            ema.update(3, 0.0); // seed = 0.0
            let mut prev_distance = 100.0;
            for t in 4..=30 {
                let v = ema.update(t, 100.0).unwrap();
                let distance = 100.0 - v;
                assert!(distance < prev_distance, "EMA must approach the input");
                prev_distance = distance;
            }
            assert!(prev_distance < 1.0);
        }
    }

    mod readiness {
        use super::*;

        #[test]
        fn ready_at_length_samples() {
            let mut ema = ema(4);
            for t in 1..=3 {
                ema.update(t, 1.0);
                assert!(!ema.is_ready());
            }
            ema.update(4, 1.0);
            assert!(ema.is_ready());
        }

        #[test]
        fn value_matches_last_update() {
            let mut ema = ema(2);
            ema.update(1, 10.0);
            let computed = ema.update(2, 20.0);
            assert_eq!(ema.value(), computed);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(ema(20).to_string(), "EMA(20)");
        }
    }

    #[cfg(debug_assertions)]
    mod invariants {
        use super::*;

        #[test]
        #[should_panic(expected = "timestamps must be strictly increasing")]
        fn panics_on_decreasing_timestamp() {
            let mut ema = ema(2);
            ema.update(2, 10.0);
            ema.update(1, 20.0);
        }
    }
}
