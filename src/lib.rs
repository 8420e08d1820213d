//! Streaming momentum, volume and range oscillators.
//!
//! Three bar-level signals computed incrementally, one bar at a time, with
//! O(1) memory per update:
//!
//! - [`Tsi`] — True Strength Index with double ALMA smoothing, a
//!   seven-average Fibonacci confirmation ladder signal line, and
//!   crossover/color state.
//! - [`Vwma`] — volume-weighted moving average bias reference.
//! - [`Pgo`] — Pretty Good Oscillator, close-to-mean distance in units of
//!   average true range.
//!
//! Indicators accept any type implementing [`Ohlcv`] and return `None`
//! until every smoothing stage has warmed up. Each indicator exposes
//! [`new`](Tsi::new), [`compute`](Tsi::compute), and [`value`](Tsi::value)
//! as inherent methods — no trait import needed. Import [`Indicator`] only
//! for generic code.
//!
//! The scalar building blocks ([`Alma`], [`Sma`], [`Ema`], [`TrueRange`],
//! [`DoubleSmooth`]) are public too, behind the [`Smoother`] trait, for
//! composing further oscillators.

mod alma;
mod double_smooth;
mod ema;
mod indicator;
mod ohlcv;
mod pgo;
mod price_source;
mod ring_buffer;
mod sma;
mod smoother;
mod true_range;
mod tsi;
mod vwma;

pub use crate::indicator::{Indicator, IndicatorConfig};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::smoother::Smoother;

pub use crate::alma::{Alma, Offset, Sigma};
pub use crate::double_smooth::{DoubleAlma, DoubleSmooth};
pub use crate::ema::Ema;
pub use crate::sma::Sma;
pub use crate::true_range::TrueRange;

pub use crate::pgo::{Pgo, PgoConfig, PgoConfigBuilder};
pub use crate::tsi::{
    HistColor, LineColor, Tsi, TsiConfig, TsiConfigBuilder, TsiValue,
};
pub use crate::vwma::{Vwma, VwmaConfig, VwmaConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Tsi, TsiConfig, TsiValue);
impl_indicator_methods!(Vwma, VwmaConfig, Price);
impl_indicator_methods!(Pgo, PgoConfig, Price);

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod inherent_methods {
    use super::{Ohlcv, Pgo, PgoConfig, Price, Timestamp, Tsi, TsiConfig, Vwma, VwmaConfig};
    use std::num::NonZero;

    struct Bar(f64, u64);
    impl Ohlcv for Bar {
        fn open(&self) -> Price {
            self.0
        }
        fn high(&self) -> Price {
            self.0 + 1.0
        }
        fn low(&self) -> Price {
            self.0 - 1.0
        }
        fn close(&self) -> Price {
            self.0
        }
        fn open_time(&self) -> Timestamp {
            self.1
        }
        fn volume(&self) -> f64 {
            100.0
        }
    }

    #[test]
    fn tsi_without_indicator_import() {
        let mut tsi = Tsi::new(TsiConfig::default());
        assert_eq!(tsi.compute(&Bar(10.0, 1)), None);
        assert_eq!(tsi.value(), None);
    }

    #[test]
    fn vwma_without_indicator_import() {
        let mut vwma = Vwma::new(VwmaConfig::new(NonZero::new(1).unwrap()));
        assert_eq!(vwma.compute(&Bar(10.0, 1)), Some(10.0));
        assert_eq!(vwma.value(), Some(10.0));
    }

    #[test]
    fn pgo_without_indicator_import() {
        let mut pgo = Pgo::new(PgoConfig::close(NonZero::new(2).unwrap()));
        assert!(pgo.compute(&Bar(10.0, 1)).is_none());
        assert!(pgo.compute(&Bar(12.0, 2)).is_some());
        assert!(pgo.value().is_some());
    }
}
