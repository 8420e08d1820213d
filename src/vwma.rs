use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, Ohlcv, Price, Sma, Smoother, Timestamp, ring_buffer::RingBuffer,
};

/// Configuration for the Volume Weighted Moving Average ([`Vwma`])
/// indicator.
///
/// # Example
///
/// ```
/// use momenta::VwmaConfig;
/// use std::num::NonZero;
///
/// let config = VwmaConfig::new(NonZero::new(14).unwrap());
/// assert_eq!(config.length().get(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct VwmaConfig {
    length: NonZero<usize>,
}

impl VwmaConfig {
    /// VWMA over `length` bars.
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self { length }
    }

    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> NonZero<usize> {
        self.length
    }
}

impl IndicatorConfig for VwmaConfig {
    type Builder = VwmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        VwmaConfigBuilder { length: None }
    }
}

impl Display for VwmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VwmaConfig({})", self.length)
    }
}

/// Builder for [`VwmaConfig`].
///
/// Length must be set before calling [`build`](VwmaConfigBuilder::build).
pub struct VwmaConfigBuilder {
    length: Option<NonZero<usize>>,
}

impl VwmaConfigBuilder {
    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length);
        self
    }

    /// Builds the config.
    ///
    /// # Panics
    ///
    /// Panics if the length has not been set.
    #[inline]
    #[must_use]
    pub fn build(self) -> VwmaConfig {
        VwmaConfig {
            length: self.length.expect("length is required"),
        }
    }
}

/// Volume Weighted Moving Average.
///
/// Averages `volume × close` and `volume` separately over the window and
/// reports their ratio — the mean price paid per unit of volume over the
/// last *n* bars, a bias reference that leans toward where the actual
/// trading happened rather than where the bar closed:
///
/// ```text
/// VWMA = SMA(volume × close) / SMA(volume)
/// ```
///
/// The computed ratio is additionally collected into a window of the same
/// length; the indicator reports `None` until that window is full, so the
/// first output at bar `2n − 1` already has a full lookback of history
/// behind it.
///
/// Input bars must override [`Ohlcv::volume`]. While the volume average is
/// zero the ratio is undefined and the bar is skipped — with the default
/// `volume()` of `0.0` the indicator simply never becomes ready.
///
/// # Example
///
/// ```
/// use momenta::{Indicator, Vwma, VwmaConfig};
/// use std::num::NonZero;
/// # use momenta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn volume(&self) -> f64 { self.1 }
/// #     fn open_time(&self) -> Timestamp { self.2 }
/// # }
///
/// let mut vwma = Vwma::new(VwmaConfig::new(NonZero::new(2).unwrap()));
///
/// assert_eq!(vwma.compute(&Bar(10.0, 100.0, 1)), None);
/// assert_eq!(vwma.compute(&Bar(20.0, 300.0, 2)), None);
/// // Ready at bar 2 × 2 − 1 = 3.
/// assert!(vwma.compute(&Bar(15.0, 200.0, 3)).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Vwma {
    config: VwmaConfig,
    volume_avg: Sma,
    price_volume_avg: Sma,
    window: RingBuffer,
    current: Option<Price>,
    last_open_time: Option<Timestamp>,
}

impl Indicator for Vwma {
    type Config = VwmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            volume_avg: Sma::new(config.length),
            price_volume_avg: Sma::new(config.length),
            window: RingBuffer::new(config.length.get()),
            current: None,
            last_open_time: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < ohlcv.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );
        let time = ohlcv.open_time();
        self.last_open_time = Some(time);

        self.volume_avg.update(time, ohlcv.volume());
        self.price_volume_avg
            .update(time, ohlcv.volume() * ohlcv.close());

        if let (Some(price_volume), Some(volume)) =
            (self.price_volume_avg.value(), self.volume_avg.value())
        {
            // Undefined ratio on a zero volume average: skip the bar.
            if volume != 0.0 {
                let weighted = price_volume / volume;
                self.window.push(weighted);
                if self.window.is_full() {
                    self.current = Some(weighted);
                }
            }
        }

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Vwma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VWMA({})", self.config.length)
    }
}
