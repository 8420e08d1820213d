use crate::Ohlcv;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a bar-level [`Indicator`].
///
/// Every oscillator has a corresponding config type holding its parameters,
/// each with a stated default. Configs are value types: cheap to clone,
/// compare, and hash (float parameters are wrapped in bit-comparable
/// newtypes such as [`Offset`](crate::Offset) and [`Sigma`](crate::Sigma)).
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;
}

/// A streaming bar-level oscillator.
///
/// Indicators maintain internal state and update incrementally on each call
/// to [`compute`](Indicator::compute). Output is `None` until every stage of
/// the composition has warmed up; once `Some`, it stays `Some` on a
/// forward-moving bar stream.
///
/// Bars must arrive in strictly increasing `open_time` order, one call per
/// bar. There are no seek-back semantics.
///
/// # Example
///
/// ```
/// use momenta::{Indicator, Pgo, PgoConfig};
/// use std::num::NonZero;
/// # use momenta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 + 1.0 }
/// #     fn low(&self) -> Price { self.0 - 1.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let mut pgo = Pgo::new(PgoConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(pgo.compute(&Bar(10.0, 1)), None);
/// assert_eq!(pgo.compute(&Bar(11.0, 2)), None);
/// assert!(pgo.compute(&Bar(12.0, 3)).is_some());
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for single-value oscillators, a struct
    /// for composite ones (e.g. [`TsiValue`](crate::TsiValue)).
    type Output: Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds a bar and returns the updated indicator value, or `None` if
    /// not yet converged.
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed value without advancing state, or `None`
    /// if not yet converged.
    ///
    /// This is a cached field read — O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;
}
