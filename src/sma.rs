use std::{fmt::Display, num::NonZero};

use crate::{Smoother, Timestamp, ring_buffer::RingBuffer};

/// Simple Moving Average over a scalar stream.
///
/// Computes the unweighted mean of the last *n* samples. Returns `None`
/// until the window is full. Uses a running sum for O(1) updates; the sum
/// may accumulate FP rounding drift over very long runs, negligible for
/// typical window sizes on financial data.
///
/// # Example
///
/// ```
/// use momenta::{Sma, Smoother};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(NonZero::new(3).unwrap());
///
/// assert_eq!(sma.update(1, 10.0), None);
/// assert_eq!(sma.update(2, 20.0), None);
/// assert_eq!(sma.update(3, 30.0), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    length: usize,
    window: RingBuffer,
    sum: f64,
    length_reciprocal: f64,
    current: Option<f64>,
    last_time: Option<Timestamp>,
}

impl Sma {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            window: RingBuffer::new(length.get()),
            sum: 0.0,
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / length.get() as f64,
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

impl Smoother for Sma {
    #[inline]
    fn update(&mut self, time: Timestamp, value: f64) -> Option<f64> {
        debug_assert!(
            self.last_time.is_none_or(|t| t < time),
            "timestamps must be strictly increasing: last={}, got={time}",
            self.last_time.unwrap_or(0),
        );
        self.last_time = Some(time);

        if let Some(evicted) = self.window.push(value) {
            self.sum -= evicted;
        }
        self.sum += value;

        self.current = self
            .window
            .is_full()
            .then(|| self.sum * self.length_reciprocal);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.length)
    }
}
