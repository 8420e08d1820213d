use std::{fmt::Display, num::NonZero};

use crate::{
    Ema, Indicator, IndicatorConfig, Ohlcv, Price, PriceSource, Sma, Smoother, Timestamp,
    TrueRange,
};

/// Configuration for the Pretty Good Oscillator ([`Pgo`]) indicator.
///
/// # Example
///
/// ```
/// use momenta::PgoConfig;
/// use std::num::NonZero;
///
/// let config = PgoConfig::close(NonZero::new(14).unwrap());
/// assert_eq!(config.length().get(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct PgoConfig {
    length: NonZero<usize>,
    source: PriceSource,
}

impl PgoConfig {
    /// PGO with the price average on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self {
            length,
            source: PriceSource::Close,
        }
    }

    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> NonZero<usize> {
        self.length
    }

    /// Price source fed into the price average.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl IndicatorConfig for PgoConfig {
    type Builder = PgoConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        PgoConfigBuilder {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl Display for PgoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PgoConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`PgoConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling [`build`](PgoConfigBuilder::build).
pub struct PgoConfigBuilder {
    length: Option<NonZero<usize>>,
    source: PriceSource,
}

impl PgoConfigBuilder {
    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length);
        self
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    /// Builds the config.
    ///
    /// # Panics
    ///
    /// Panics if the length has not been set.
    #[inline]
    #[must_use]
    pub fn build(self) -> PgoConfig {
        PgoConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Pretty Good Oscillator.
///
/// Measures how far the close sits from its moving average, in units of
/// average true range:
///
/// ```text
/// PGO = (close − SMA(price)) / EMA(true range)
/// ```
///
/// A reading of `+2` means the close is two average bar-ranges above its
/// mean — a breakout measured in the instrument's own volatility rather
/// than in absolute price. Positive values set [`bullish`](Pgo::bullish),
/// negative values set [`bearish`](Pgo::bearish); at exactly zero both
/// flags are false.
///
/// Output begins once the true-range EMA is ready, at bar `length`. A zero
/// range EMA (a perfectly flat tape) leaves the previous value and flags in
/// place instead of dividing by zero.
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
/// let mut pgo = Pgo::new(PgoConfig::close(NonZero::new(2).unwrap()));
///
/// assert_eq!(pgo.compute(&Bar(10.0, 1)), None);
/// let value = pgo.compute(&Bar(14.0, 2)).unwrap();
/// assert!(value > 0.0);
/// assert!(pgo.bullish());
/// ```
#[derive(Clone, Debug)]
pub struct Pgo {
    config: PgoConfig,
    true_range: TrueRange,
    price_avg: Sma,
    range_avg: Ema,
    bullish: bool,
    bearish: bool,
    current: Option<f64>,
    last_open_time: Option<Timestamp>,
}

impl Indicator for Pgo {
    type Config = PgoConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            true_range: TrueRange::new(),
            price_avg: Sma::new(config.length),
            range_avg: Ema::new(config.length),
            bullish: false,
            bearish: false,
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

        self.true_range.update(ohlcv);

        if let Some(range) = self.true_range.value() {
            self.price_avg
                .update(time, self.config.source.extract(ohlcv));
            self.range_avg.update(time, range);
        }

        if let (Some(price_avg), Some(range_avg)) =
            (self.price_avg.value(), self.range_avg.value())
        {
            // Flat tape: the ratio is undefined, keep the previous state.
            if range_avg != 0.0 {
                let value = (ohlcv.close() - price_avg) / range_avg;
                self.bullish = value > 0.0;
                self.bearish = value < 0.0;
                self.current = Some(value);
            }
        }

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Pgo {
    /// `true` while the oscillator is positive.
    #[inline]
    #[must_use]
    pub fn bullish(&self) -> bool {
        self.bullish
    }

    /// `true` while the oscillator is negative.
    #[inline]
    #[must_use]
    pub fn bearish(&self) -> bool {
        self.bearish
    }
}

impl Display for Pgo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PGO({}, {})", self.config.length, self.config.source)
    }
}
