use std::fmt::Display;

use crate::{Ohlcv, Price, Timestamp};

/// True range of a bar: `max(high − low, |high − prev_close|, |low − prev_close|)`.
///
/// A volatility measure that accounts for gaps between bars. On the first
/// bar (no previous close) it falls back to `high − low`, so output is
/// available immediately.
///
/// # Example
///
/// ```
/// use momenta::TrueRange;
/// # use momenta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.2 }
/// #     fn open_time(&self) -> Timestamp { self.3 }
/// # }
///
/// let mut tr = TrueRange::new();
///
/// // First bar: high − low
/// assert_eq!(tr.update(&Bar(15.0, 5.0, 10.0, 1)), 10.0);
/// // Gap up: |high − prev_close| dominates
/// assert_eq!(tr.update(&Bar(30.0, 20.0, 28.0, 2)), 20.0);
/// ```
#[derive(Clone, Default, Debug)]
pub struct TrueRange {
    prev_close: Option<Price>,
    current: Option<f64>,
    last_time: Option<Timestamp>,
}

impl TrueRange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a bar and returns its true range.
    #[inline]
    pub fn update(&mut self, ohlcv: &impl Ohlcv) -> f64 {
        debug_assert!(
            self.last_time.is_none_or(|t| t < ohlcv.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_time.unwrap_or(0),
            ohlcv.open_time(),
        );
        self.last_time = Some(ohlcv.open_time());

        let hl = ohlcv.high() - ohlcv.low();
        let range = match self.prev_close {
            Some(prev_close) => {
                let hc = (ohlcv.high() - prev_close).abs();
                let lc = (ohlcv.low() - prev_close).abs();
                hl.max(hc).max(lc)
            }
            None => hl,
        };

        self.prev_close = Some(ohlcv.close());
        self.current = Some(range);

        range
    }

    /// Last computed true range, or `None` before the first bar.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.current
    }

    /// `true` once at least one bar has been seen.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}

impl Display for TrueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrueRange")
    }
}
