#![allow(dead_code)]

use momenta::{Ohlcv, Price, Timestamp};
use serde::Deserialize;

/// OHLCV bar parsed from the synthetic fixture CSV.
///
/// The fixture is a 160-bar deterministic stream (two superimposed sine
/// waves on a slow drift) with strictly positive ranges and volumes and a
/// nonzero bar-over-bar close change on every bar, so every warm-up
/// threshold in these tests lands on an exact bar index.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

const FIXTURE_PATH: &str = "tests/fixtures/data/synthetic-1h.csv";

/// Load the synthetic OHLCV fixture stream.
pub fn load_fixture_bars() -> Vec<RefBar> {
    let mut rdr = csv::Reader::from_path(FIXTURE_PATH)
        .unwrap_or_else(|e| panic!("failed to open {FIXTURE_PATH}: {e}"));

    rdr.deserialize()
        .map(|r| r.expect("invalid OHLCV record"))
        .collect()
}
