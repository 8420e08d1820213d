/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in signatures without
/// newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Must be strictly increasing between consecutive calls to
/// [`Indicator::compute`](crate::Indicator::compute). Oscillators in this
/// crate keep two-deep history pairs, so re-feeding or reordering bars
/// would silently corrupt crossover state; ordering violations trip a
/// `debug_assert!` in debug builds and are undefined behaviour in release.
pub type Timestamp = u64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Indicators accept `&impl Ohlcv` and extract the values they
/// need internally.
///
/// # Example
///
/// ```
/// use momenta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64, v: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> f64 { self.v }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp or sequence number.
    ///
    /// Must be strictly increasing between calls; see [`Timestamp`].
    fn open_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    ///
    /// Override this for volume-dependent indicators ([`Vwma`](crate::Vwma)
    /// skips its update while the volume average is zero, so leaving the
    /// default in place keeps it permanently warming up). Indicators that
    /// don't use volume ignore this value.
    fn volume(&self) -> f64 {
        0.0
    }
}
