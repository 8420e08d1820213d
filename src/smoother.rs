use crate::Timestamp;

use std::fmt::{Debug, Display};

/// A streaming scalar filter.
///
/// Smoothers consume `(timestamp, value)` points one at a time and maintain
/// O(1) internal state. Output is `None` until enough samples have been
/// received (the warm-up period); once a smoother has produced a value it
/// never goes back to `None` on a forward-moving stream.
///
/// Bar-level oscillators ([`Tsi`](crate::Tsi), [`Pgo`](crate::Pgo)) are built
/// by wiring smoothers together and feeding them derived series such as
/// bar-over-bar price change or true range.
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
/// assert!(sma.is_ready());
/// ```
pub trait Smoother: Sized + Clone + Display + Debug {
    /// Feeds one sample and returns the updated output, or `None` while
    /// warming up.
    ///
    /// Timestamps must be strictly increasing between calls; violations trip
    /// a `debug_assert!`.
    fn update(&mut self, time: Timestamp, value: f64) -> Option<f64>;

    /// Returns the last computed output without advancing state, or `None`
    /// while warming up.
    fn value(&self) -> Option<f64>;

    /// `true` once the warm-up period has elapsed. Monotonic: never flips
    /// back to `false`.
    #[inline]
    fn is_ready(&self) -> bool {
        self.value().is_some()
    }
}
