use std::{fmt::Display, num::NonZero};

use crate::{
    Alma, DoubleAlma, DoubleSmooth, Indicator, IndicatorConfig, Ohlcv, Offset, Price, PriceSource,
    Sigma, Smoother, Timestamp,
};

/// Number of confirmation ladder averages.
const LADDER_LEN: usize = 7;

/// Configuration for the True Strength Index ([`Tsi`]) oscillator.
///
/// All parameters have defaults; `TsiConfig::default()` is the conventional
/// setting. The double-smoothing stages run ALMA(21) into ALMA(5), both with
/// offset `0.75` and sigma `4.0`; the signal ladder is seven ALMAs over the
/// Fibonacci periods 3–55 with offset `0.85` and sigma `6.0`.
///
/// # Example
///
/// ```
/// use momenta::TsiConfig;
///
/// let config = TsiConfig::default();
/// assert_eq!(config.short_length().get(), 5);
/// assert_eq!(config.long_length().get(), 21);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TsiConfig {
    source: PriceSource,
    short_length: NonZero<usize>,
    long_length: NonZero<usize>,
    fast_offset: Offset,
    trend_offset: Offset,
    fast_sigma: Sigma,
    trend_sigma: Sigma,
    signal_periods: [NonZero<usize>; LADDER_LEN],
    signal_offset: Offset,
    signal_sigma: Sigma,
}

impl TsiConfig {
    /// Default confirmation ladder periods: a Fibonacci run from 3 to 55.
    pub const DEFAULT_SIGNAL_PERIODS: [NonZero<usize>; LADDER_LEN] = [
        NonZero::new(3).unwrap(),
        NonZero::new(5).unwrap(),
        NonZero::new(8).unwrap(),
        NonZero::new(13).unwrap(),
        NonZero::new(21).unwrap(),
        NonZero::new(34).unwrap(),
        NonZero::new(55).unwrap(),
    ];

    /// Fast (second) smoothing stage length. Default: 5.
    #[inline]
    #[must_use]
    pub fn short_length(&self) -> NonZero<usize> {
        self.short_length
    }

    /// Trend (first) smoothing stage length. Default: 21.
    #[inline]
    #[must_use]
    pub fn long_length(&self) -> NonZero<usize> {
        self.long_length
    }

    /// Price source the oscillator computes on. Default: close.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &PriceSource {
        &self.source
    }

    /// Kernel offset of the fast stage. Default: 0.75.
    #[inline]
    #[must_use]
    pub fn fast_offset(&self) -> Offset {
        self.fast_offset
    }

    /// Kernel offset of the trend stage. Default: 0.75.
    #[inline]
    #[must_use]
    pub fn trend_offset(&self) -> Offset {
        self.trend_offset
    }

    /// Kernel width divisor of the fast stage. Default: 4.0.
    #[inline]
    #[must_use]
    pub fn fast_sigma(&self) -> Sigma {
        self.fast_sigma
    }

    /// Kernel width divisor of the trend stage. Default: 4.0.
    #[inline]
    #[must_use]
    pub fn trend_sigma(&self) -> Sigma {
        self.trend_sigma
    }

    /// Confirmation ladder periods. Default: 3, 5, 8, 13, 21, 34, 55.
    #[inline]
    #[must_use]
    pub fn signal_periods(&self) -> [NonZero<usize>; LADDER_LEN] {
        self.signal_periods
    }

    /// Kernel offset of the ladder averages. Default: 0.85.
    #[inline]
    #[must_use]
    pub fn signal_offset(&self) -> Offset {
        self.signal_offset
    }

    /// Kernel width divisor of the ladder averages. Default: 6.0.
    #[inline]
    #[must_use]
    pub fn signal_sigma(&self) -> Sigma {
        self.signal_sigma
    }
}

impl IndicatorConfig for TsiConfig {
    type Builder = TsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        TsiConfigBuilder::new()
    }
}

impl Default for TsiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for TsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TsiConfig({}/{}, {})",
            self.short_length, self.long_length, self.source
        )
    }
}

/// Builder for [`TsiConfig`]. Every field has a default; `build` never
/// panics.
pub struct TsiConfigBuilder {
    source: PriceSource,
    short_length: NonZero<usize>,
    long_length: NonZero<usize>,
    fast_offset: Offset,
    trend_offset: Offset,
    fast_sigma: Sigma,
    trend_sigma: Sigma,
    signal_periods: [NonZero<usize>; LADDER_LEN],
    signal_offset: Offset,
    signal_sigma: Sigma,
}

impl TsiConfigBuilder {
    fn new() -> Self {
        Self {
            source: PriceSource::Close,
            short_length: NonZero::new(5).unwrap(),
            long_length: NonZero::new(21).unwrap(),
            fast_offset: Offset::new(0.75),
            trend_offset: Offset::new(0.75),
            fast_sigma: Sigma::new(4.0),
            trend_sigma: Sigma::new(4.0),
            signal_periods: TsiConfig::DEFAULT_SIGNAL_PERIODS,
            signal_offset: Offset::default(),
            signal_sigma: Sigma::default(),
        }
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the fast smoothing stage length.
    #[inline]
    #[must_use]
    pub fn short_length(mut self, length: NonZero<usize>) -> Self {
        self.short_length = length;
        self
    }

    /// Sets the trend smoothing stage length.
    #[inline]
    #[must_use]
    pub fn long_length(mut self, length: NonZero<usize>) -> Self {
        self.long_length = length;
        self
    }

    /// Sets the fast stage kernel offset.
    #[inline]
    #[must_use]
    pub fn fast_offset(mut self, offset: Offset) -> Self {
        self.fast_offset = offset;
        self
    }

    /// Sets the trend stage kernel offset.
    #[inline]
    #[must_use]
    pub fn trend_offset(mut self, offset: Offset) -> Self {
        self.trend_offset = offset;
        self
    }

    /// Sets the fast stage kernel width divisor.
    #[inline]
    #[must_use]
    pub fn fast_sigma(mut self, sigma: Sigma) -> Self {
        self.fast_sigma = sigma;
        self
    }

    /// Sets the trend stage kernel width divisor.
    #[inline]
    #[must_use]
    pub fn trend_sigma(mut self, sigma: Sigma) -> Self {
        self.trend_sigma = sigma;
        self
    }

    /// Sets the confirmation ladder periods.
    #[inline]
    #[must_use]
    pub fn signal_periods(mut self, periods: [NonZero<usize>; LADDER_LEN]) -> Self {
        self.signal_periods = periods;
        self
    }

    /// Sets the ladder kernel offset.
    #[inline]
    #[must_use]
    pub fn signal_offset(mut self, offset: Offset) -> Self {
        self.signal_offset = offset;
        self
    }

    /// Sets the ladder kernel width divisor.
    #[inline]
    #[must_use]
    pub fn signal_sigma(mut self, sigma: Sigma) -> Self {
        self.signal_sigma = sigma;
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> TsiConfig {
        TsiConfig {
            source: self.source,
            short_length: self.short_length,
            long_length: self.long_length,
            fast_offset: self.fast_offset,
            trend_offset: self.trend_offset,
            fast_sigma: self.fast_sigma,
            trend_sigma: self.trend_sigma,
            signal_periods: self.signal_periods,
            signal_offset: self.signal_offset,
            signal_sigma: self.signal_sigma,
        }
    }
}

/// Oscillator line color: green above the signal line, red at or below it.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum LineColor {
    Red,
    Green,
}

impl Display for LineColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Histogram color, combining side of the signal line with histogram
/// direction.
///
/// Below the signal line: maroon while the histogram recovers (rising or
/// flat), red while it keeps falling. Above: lime while the histogram grows
/// or holds, green once it rolls over.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum HistColor {
    Maroon,
    Red,
    Green,
    Lime,
}

impl Display for HistColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[inline]
fn histogram_color(below_signal: bool, histogram: f64, prev_histogram: f64) -> HistColor {
    if below_signal {
        if histogram >= prev_histogram {
            HistColor::Maroon
        } else {
            HistColor::Red
        }
    } else if histogram < prev_histogram {
        HistColor::Green
    } else {
        HistColor::Lime
    }
}

/// TSI output: oscillator line, signal line, and histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsiValue {
    line: Price,
    signal: Price,
    histogram: Price,
}

impl TsiValue {
    /// Oscillator line: `100 × smoothed Δprice / smoothed |Δprice|`,
    /// bounded to `[−100, 100]`.
    #[inline]
    #[must_use]
    pub fn line(&self) -> Price {
        self.line
    }

    /// Signal line: unweighted mean of the confirmation ladder outputs.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// Histogram: `line − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl Display for TsiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TSI(line: {}, signal: {}, hist: {})",
            self.line, self.signal, self.histogram
        )
    }
}

/// True Strength Index with double ALMA smoothing and a ladder signal line.
///
/// Bar-over-bar price change is smoothed twice (once signed, once absolute)
/// and combined into a ratio line bounded to `[−100, 100]`:
///
/// ```text
/// line = 100 × DoubleAlma(Δprice) / DoubleAlma(|Δprice|)
/// ```
///
/// The signal line is the unweighted mean of seven ALMAs of the line over
/// Fibonacci periods (3–55 by default): a fast average crossing seven
/// staggered confirmations at once is a stronger regime signal than a single
/// crossing pair. The histogram is `line − signal`.
///
/// Beyond the numeric outputs, the oscillator exposes derived state re-read
/// between bars: signal-line side and crossings
/// ([`below_signal`](Tsi::below_signal), [`crossing_over`](Tsi::crossing_over),
/// [`crossing_under`](Tsi::crossing_under)), zero-line crossings
/// ([`crossing_above_zero`](Tsi::crossing_above_zero),
/// [`crossing_below_zero`](Tsi::crossing_below_zero)), and the chart color
/// states ([`line_color`](Tsi::line_color),
/// [`histogram_color`](Tsi::histogram_color)). Crossing flags describe the
/// current bar only: they reset on the next bar unless a new cross occurs.
///
/// If the smoothed `|Δprice|` is exactly zero (a flat tape for the whole
/// smoothing window), the line keeps its previous value for that bar instead
/// of dividing by zero. The ladder still consumes the retained value, so a
/// zero-volatility bar never produces NaN — the line just goes stale for a
/// bar.
///
/// # Convergence
///
/// With the default config: price change from bar 2, line from bar 26,
/// signal and histogram from bar 80, crossings and colors from bar 81.
/// [`compute`](Indicator::compute) returns `Some` once the signal line
/// exists; the warm-up line is observable earlier through [`line`](Tsi::line).
///
/// # Example
///
/// ```
/// use momenta::{Indicator, Tsi, TsiConfig};
/// # use momenta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let mut tsi = Tsi::new(TsiConfig::default());
///
/// for t in 1..=79 {
///     assert_eq!(tsi.compute(&Bar(100.0 + (t % 7) as f64, t)), None);
/// }
/// let value = tsi.compute(&Bar(103.0, 80)).unwrap();
/// assert!(value.line().abs() <= 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct Tsi {
    config: TsiConfig,
    prev_price: Option<Price>,
    smoothed_change: DoubleAlma,
    smoothed_abs_change: DoubleAlma,
    ladder: [Alma; LADDER_LEN],
    line: Option<f64>,
    signal: Option<f64>,
    prev_line: Option<f64>,
    prev_signal: Option<f64>,
    prev_histogram: Option<f64>,
    below_signal: bool,
    crossing_over: bool,
    crossing_under: bool,
    crossing_above_zero: bool,
    crossing_below_zero: bool,
    line_color: Option<LineColor>,
    histogram_color: Option<HistColor>,
    current: Option<TsiValue>,
    last_open_time: Option<Timestamp>,
}

impl Indicator for Tsi {
    type Config = TsiConfig;
    type Output = TsiValue;

    fn new(config: Self::Config) -> Self {
        let cascade = || {
            DoubleSmooth::new(
                Alma::with_shape(config.long_length, config.trend_offset, config.trend_sigma),
                Alma::with_shape(config.short_length, config.fast_offset, config.fast_sigma),
            )
        };

        Self {
            config,
            prev_price: None,
            smoothed_change: cascade(),
            smoothed_abs_change: cascade(),
            ladder: config.signal_periods.map(|period| {
                Alma::with_shape(period, config.signal_offset, config.signal_sigma)
            }),
            line: None,
            signal: None,
            prev_line: None,
            prev_signal: None,
            prev_histogram: None,
            below_signal: false,
            crossing_over: false,
            crossing_under: false,
            crossing_above_zero: false,
            crossing_below_zero: false,
            line_color: None,
            histogram_color: None,
            current: None,
            last_open_time: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<TsiValue> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < ohlcv.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );
        let time = ohlcv.open_time();
        self.last_open_time = Some(time);

        let price = self.config.source.extract(ohlcv);
        let price_change = self.prev_price.map(|prev| price - prev);
        self.prev_price = Some(price);

        if let Some(change) = price_change {
            self.smoothed_change.update(time, change);
            self.smoothed_abs_change.update(time, change.abs());
        }

        if let (Some(change), Some(abs_change)) = (
            self.smoothed_change.value(),
            self.smoothed_abs_change.value(),
        ) {
            // Zero volatility over the whole smoothing window: keep the
            // previous line value rather than divide by zero.
            if abs_change != 0.0 {
                self.line = Some(100.0 * (change / abs_change));
            }
        }

        let Some(line) = self.line else {
            return None;
        };

        for average in &mut self.ladder {
            average.update(time, line);
        }

        if self.ladder.iter().all(Smoother::is_ready) {
            let sum: f64 = self.ladder.iter().filter_map(Smoother::value).sum();
            #[allow(clippy::cast_precision_loss)]
            {
                self.signal = Some(sum / LADDER_LEN as f64);
            }
        }

        let Some(signal) = self.signal else {
            return None;
        };

        let histogram = line - signal;
        self.below_signal = line <= signal;

        if let (Some(prev_line), Some(prev_signal), Some(prev_histogram)) =
            (self.prev_line, self.prev_signal, self.prev_histogram)
        {
            self.crossing_over = line > signal && prev_line < prev_signal;
            self.crossing_under = line < signal && prev_line > prev_signal;
            self.crossing_above_zero = line > 0.0 && prev_line < 0.0;
            self.crossing_below_zero = line < 0.0 && prev_line > 0.0;

            self.line_color = Some(if self.below_signal {
                LineColor::Red
            } else {
                LineColor::Green
            });
            self.histogram_color = Some(histogram_color(
                self.below_signal,
                histogram,
                prev_histogram,
            ));
        }

        self.prev_line = Some(line);
        self.prev_signal = Some(signal);
        self.prev_histogram = Some(histogram);

        self.current = Some(TsiValue {
            line,
            signal,
            histogram,
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<TsiValue> {
        self.current
    }
}

impl Tsi {
    /// Oscillator line, available before the signal ladder has warmed up.
    #[inline]
    #[must_use]
    pub fn line(&self) -> Option<f64> {
        self.line
    }

    /// Signal line, or `None` until the ladder has warmed up.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Option<f64> {
        self.signal
    }

    /// `true` while the line is at or below the signal line. `false` until
    /// both lines exist.
    #[inline]
    #[must_use]
    pub fn below_signal(&self) -> bool {
        self.below_signal
    }

    /// `true` on the bar where the line crosses above the signal line.
    #[inline]
    #[must_use]
    pub fn crossing_over(&self) -> bool {
        self.crossing_over
    }

    /// `true` on the bar where the line crosses below the signal line.
    #[inline]
    #[must_use]
    pub fn crossing_under(&self) -> bool {
        self.crossing_under
    }

    /// `true` on the bar where the line crosses from negative to positive.
    #[inline]
    #[must_use]
    pub fn crossing_above_zero(&self) -> bool {
        self.crossing_above_zero
    }

    /// `true` on the bar where the line crosses from positive to negative.
    #[inline]
    #[must_use]
    pub fn crossing_below_zero(&self) -> bool {
        self.crossing_below_zero
    }

    /// Line color, or `None` until crossing state exists (one bar after the
    /// signal line appears).
    #[inline]
    #[must_use]
    pub fn line_color(&self) -> Option<LineColor> {
        self.line_color
    }

    /// Histogram color, or `None` until crossing state exists.
    #[inline]
    #[must_use]
    pub fn histogram_color(&self) -> Option<HistColor> {
        self.histogram_color
    }
}

impl Display for Tsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TSI({}/{}, {})",
            self.config.short_length, self.config.long_length, self.config.source
        )
    }
}
