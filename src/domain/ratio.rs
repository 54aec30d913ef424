//! Fixed-point fraction in the unit interval.

use core::fmt;

use crate::error::{Result, SwapError};

/// A fixed-point fraction in `[0, 1]`, scaled by [`Ratio::SCALE`].
///
/// Used to express how a withdrawal should be split between the two
/// pool assets: `Ratio::ONE` means "all of it as the first token",
/// `Ratio::ZERO` means "all of it as the second token".
///
/// Construction validates the range, so a held `Ratio` is always a
/// legal fraction.
///
/// # Examples
///
/// ```
/// use pegswap::domain::Ratio;
///
/// let half = Ratio::new(Ratio::SCALE / 2).expect("in range");
/// assert_eq!(half.get() + half.complement().get(), Ratio::SCALE);
/// assert!(Ratio::new(Ratio::SCALE + 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Ratio(u128);

impl Ratio {
    /// The fixed-point scale: the integer representing the value `1.0`.
    pub const SCALE: u128 = 1_000_000_000_000_000_000;

    /// The fraction `0.0`.
    pub const ZERO: Self = Self(0);

    /// The fraction `1.0`.
    pub const ONE: Self = Self(Self::SCALE);

    /// Creates a `Ratio` from a raw scaled value.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidRatio`] if `value > Ratio::SCALE`.
    pub const fn new(value: u128) -> Result<Self> {
        if value > Self::SCALE {
            return Err(SwapError::InvalidRatio);
        }
        Ok(Self(value))
    }

    /// Returns the raw scaled value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the fraction is `0.0`.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `1.0 - self`.
    ///
    /// Cannot underflow: the constructor guarantees `self <= SCALE`.
    pub const fn complement(&self) -> Self {
        Self(Self::SCALE - self.0)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::SCALE)
    }
}
