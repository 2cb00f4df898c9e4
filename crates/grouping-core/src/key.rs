//! Key extraction: how an item is turned into the scalar used for grouping.

/// A primitive numeric type that can be grouped directly.
///
/// Values are widened to `f64` with `as`. 64-bit and pointer-sized integers
/// above 2^53 in magnitude lose precision, so distinct values can map to the
/// same key; use a [`KeyFn`] with an explicit conversion when that matters.
pub trait Scalar: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Maps a stored item to the value it is grouped by.
///
/// Implementations must be pure: the same item always yields the same key.
/// Any `Fn(&T) -> f64` closure is a `KeyFn<T>`.
pub trait KeyFn<T> {
    fn key(&self, item: &T) -> f64;
}

impl<T, F> KeyFn<T> for F
where
    F: Fn(&T) -> f64,
{
    #[inline]
    fn key(&self, item: &T) -> f64 {
        self(item)
    }
}

/// Groups scalars by their own value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Scalar> KeyFn<T> for Identity {
    #[inline]
    fn key(&self, item: &T) -> f64 {
        item.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_widens_integers() {
        assert_eq!(Identity.key(&-3_i32), -3.0);
        assert_eq!(Identity.key(&200_u8), 200.0);
        assert_eq!(Identity.key(&1.5_f32), 1.5);
    }

    #[test]
    fn wide_integers_round_past_two_pow_53() {
        let exact = 1_u64 << 53;
        assert_eq!(Identity.key(&exact), 9_007_199_254_740_992.0);
        assert_eq!(Identity.key(&(exact + 1)), Identity.key(&exact));
        assert_ne!(Identity.key(&(exact + 2)), Identity.key(&exact));
    }

    #[test]
    fn closures_are_key_functions() {
        let width = |pair: &(String, u32)| pair.1 as f64;
        assert_eq!(width.key(&("a".to_string(), 7)), 7.0);
    }
}
