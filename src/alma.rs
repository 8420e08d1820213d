use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use crate::{Smoother, Timestamp, ring_buffer::RingBuffer};

/// Gaussian kernel offset for the Arnaud Legoux Moving Average.
///
/// Positions the weight peak within the window: `0.0` centres it on the
/// oldest sample, `1.0` on the newest. Wraps an `f64` in `[0, 1]`; the
/// constructor panics on NaN or out-of-range values.
///
/// Defaults to `0.85` (the conventional ALMA setting, favouring recent
/// samples).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe
/// because NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct Offset(f64);

impl Offset {
    /// Creates a new kernel offset.
    ///
    /// # Panics
    ///
    /// Panics if `value` is NaN or outside `[0, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "offset must not be NaN");
        assert!((0.0..=1.0).contains(&value), "offset must be in [0, 1]");
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Offset {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Offset {}

impl Hash for Offset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self(0.85)
    }
}

/// Gaussian kernel width divisor for the Arnaud Legoux Moving Average.
///
/// The kernel standard deviation is `length / sigma`: larger sigma means a
/// narrower kernel and a more reactive average. Wraps a positive, non-NaN
/// `f64`; the constructor panics otherwise.
///
/// Defaults to `6.0` (the conventional ALMA setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe
/// because NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct Sigma(f64);

impl Sigma {
    /// Creates a new kernel width divisor.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "sigma must not be NaN");
        assert!(value > 0.0, "sigma must be positive");
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Sigma {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Sigma {}

impl Hash for Sigma {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for Sigma {
    fn default() -> Self {
        Self(6.0)
    }
}

/// Arnaud Legoux Moving Average over a scalar stream.
///
/// Weights the window with a Gaussian kernel positioned by [`Offset`] and
/// sized by [`Sigma`]:
///
/// ```text
/// m   = offset × (length − 1)
/// s   = length / sigma
/// wᵢ  = exp(−(i − m)² / (2s²))        i = 0 is the oldest sample
/// out = Σ wᵢ·xᵢ / Σ wᵢ
/// ```
///
/// The offset trades lag against smoothness: values near `1.0` track the
/// newest samples closely, values near `0.5` behave like a centred Gaussian
/// filter. Weights are precomputed at construction; each update is one dot
/// product over the window. Returns `None` until the window is full.
///
/// # Example
///
/// ```
/// use momenta::{Alma, Smoother};
/// use std::num::NonZero;
///
/// let mut alma = Alma::new(NonZero::new(3).unwrap());
///
/// assert_eq!(alma.update(1, 10.0), None);
/// assert_eq!(alma.update(2, 10.0), None);
/// // Constant input passes through: the kernel is normalized.
/// let value = alma.update(3, 10.0).unwrap();
/// assert!((value - 10.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Alma {
    length: usize,
    offset: Offset,
    sigma: Sigma,
    /// Kernel weights, oldest sample first, pre-divided by their sum.
    weights: Vec<f64>,
    window: RingBuffer,
    current: Option<f64>,
    last_time: Option<Timestamp>,
}

impl Alma {
    /// ALMA with the conventional shape: offset `0.85`, sigma `6.0`.
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self::with_shape(length, Offset::default(), Sigma::default())
    }

    /// ALMA with an explicit kernel shape.
    #[must_use]
    pub fn with_shape(length: NonZero<usize>, offset: Offset, sigma: Sigma) -> Self {
        let n = length.get();
        #[allow(clippy::cast_precision_loss)]
        let m = offset.0 * (n - 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let s = n as f64 / sigma.0;

        let mut weights: Vec<f64> = (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let distance = i as f64 - m;
                (-(distance * distance) / (2.0 * s * s)).exp()
            })
            .collect();
        let norm: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= norm;
        }

        Self {
            length: n,
            offset,
            sigma,
            weights,
            window: RingBuffer::new(n),
            current: None,
            last_time: None,
        }
    }

    /// Window length (number of samples).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Kernel offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Kernel width divisor.
    #[inline]
    #[must_use]
    pub fn sigma(&self) -> Sigma {
        self.sigma
    }
}

impl Smoother for Alma {
    #[inline]
    fn update(&mut self, time: Timestamp, value: f64) -> Option<f64> {
        debug_assert!(
            self.last_time.is_none_or(|t| t < time),
            "timestamps must be strictly increasing: last={}, got={time}",
            self.last_time.unwrap_or(0),
        );
        self.last_time = Some(time);

        self.window.push(value);

        self.current = self.window.is_full().then(|| {
            self.window
                .iter()
                .zip(&self.weights)
                .map(|(sample, weight)| sample * weight)
                .sum()
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<f64> {
        self.current
    }
}

impl Display for Alma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ALMA({}, {}, {})",
            self.length, self.offset.0, self.sigma.0
        )
    }
}
