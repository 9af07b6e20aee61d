//! Product identifier used to address the composite resource.

use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SmokeError;

/// Upper bound (inclusive) for randomly generated product ids.
pub const MAX_GENERATED_PRODUCT_ID: u32 = 998;

/// Identifier of a product aggregate.
///
/// Serialized as a bare integer (`"productId": 42`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Draw a fresh id uniformly from `0..=MAX_GENERATED_PRODUCT_ID`.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Same as [`ProductId::random`], with a caller-provided RNG (seeded in tests).
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=MAX_GENERATED_PRODUCT_ID))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ProductId> for u32 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = SmokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| SmokeError::invalid_config(format!("ProductId: {s:?}: {e}")))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parses_plain_integers() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        for raw in ["-1", "abc", "", "1.5"] {
            let err = raw.parse::<ProductId>().unwrap_err();
            assert!(matches!(err, SmokeError::InvalidConfig(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&ProductId::new(123)).unwrap();
        assert_eq!(json, "123");
        let back: ProductId = serde_json::from_str("123").unwrap();
        assert_eq!(back, ProductId::new(123));
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = ProductId::random_with(&mut StdRng::seed_from_u64(7));
        let b = ProductId::random_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: generated ids always fall in [0, 998].
            #[test]
            fn generated_ids_stay_in_range(seed in any::<u64>()) {
                let id = ProductId::random_with(&mut StdRng::seed_from_u64(seed));
                prop_assert!(id.get() <= MAX_GENERATED_PRODUCT_ID);
            }

            #[test]
            fn display_and_parse_agree(value in any::<u32>()) {
                let id = ProductId::new(value);
                prop_assert_eq!(id.to_string().parse::<ProductId>().unwrap(), id);
            }
        }
    }
}
