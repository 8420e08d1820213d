use std::fmt::Display;

use crate::{Alma, Smoother, Timestamp};

/// Two smoothing stages wired in series.
///
/// Every sample is fed into the trend stage; once the trend stage is ready,
/// its output is fed into the fast stage on the same call. The cascade is
/// ready iff the fast stage is ready, and its output is the fast stage's
/// output. Smoothing an already-smoothed series damps noise far more
/// aggressively than a single stage, which is what makes momentum series
/// derived from bar-over-bar differences usable at all.
///
/// With stage warm-ups `t` and `f` samples, the cascade produces its first
/// output at sample `t + f − 1`: the fast stage receives its first input on
/// the call where the trend stage becomes ready.
///
/// [`DoubleAlma`] is the ALMA-on-ALMA instantiation used by
/// [`Tsi`](crate::Tsi).
///
/// # Example
///
/// ```
/// use momenta::{Alma, DoubleSmooth, Smoother};
/// use std::num::NonZero;
///
/// let nz = |n| NonZero::new(n).unwrap();
/// let mut cascade = DoubleSmooth::new(Alma::new(nz(3)), Alma::new(nz(2)));
///
/// for t in 1..=3 {
///     assert_eq!(cascade.update(t, 10.0), None);
/// }
/// // Trend ready at sample 3, fast at sample 3 + 2 − 1 = 4.
/// let value = cascade.update(4, 10.0).unwrap();
/// assert!((value - 10.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct DoubleSmooth<S> {
    trend: S,
    fast: S,
}

impl<S: Smoother> DoubleSmooth<S> {
    #[must_use]
    pub fn new(trend: S, fast: S) -> Self {
        Self { trend, fast }
    }

    /// The first (trend) smoothing stage.
    #[inline]
    #[must_use]
    pub fn trend(&self) -> &S {
        &self.trend
    }

    /// The second (fast) smoothing stage.
    #[inline]
    #[must_use]
    pub fn fast(&self) -> &S {
        &self.fast
    }
}

impl<S: Smoother> Smoother for DoubleSmooth<S> {
    #[inline]
    fn update(&mut self, time: Timestamp, value: f64) -> Option<f64> {
        self.trend.update(time, value);

        if let Some(trend_output) = self.trend.value() {
            self.fast.update(time, trend_output);
        }

        self.fast.value()
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.fast.value()
    }
}

impl<S: Smoother> Display for DoubleSmooth<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DoubleSmooth({} → {})", self.trend, self.fast)
    }
}

/// ALMA-on-ALMA double smoothing, the cascade used for momentum series.
pub type DoubleAlma = DoubleSmooth<Alma>;
