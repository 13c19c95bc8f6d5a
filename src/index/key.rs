//! Erased index keys
//!
//! Field values extracted by key selectors are erased into `IndexKey`
//! so that indexes over different field types share one map shape.
//! Ordering is deterministic: Bool < Int < Uint < Float < Str.

/// An erased field value usable as an index key.
///
/// Floats are stored as total-order bits so that `Eq`/`Ord`/`Hash`
/// are well defined.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Boolean value (false < true)
    Bool(bool),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value outside the i64 range
    Uint(u64),
    /// Float value (stored as bits for total ordering)
    Float(u64),
    /// String value
    Str(String),
}

impl IndexKey {
    /// Create a key from a boolean.
    pub fn from_bool(v: bool) -> Self {
        IndexKey::Bool(v)
    }

    /// Create a key from a signed integer.
    pub fn from_int(v: i64) -> Self {
        IndexKey::Int(v)
    }

    /// Create a key from an unsigned integer.
    ///
    /// Values that fit in i64 normalize to `Int` so that `42u64` and
    /// `42i64` extract to the same key.
    pub fn from_uint(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => IndexKey::Int(i),
            Err(_) => IndexKey::Uint(v),
        }
    }

    /// Create a key from a float.
    ///
    /// Uses the bit representation for total ordering.
    pub fn from_float(v: f64) -> Self {
        let bits = v.to_bits();
        // Negative floats flip all bits, positive floats flip the sign
        // bit, yielding a totally ordered unsigned encoding.
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Float(ordered)
    }

    /// Create a key from a string.
    pub fn from_string(v: impl Into<String>) -> Self {
        IndexKey::Str(v.into())
    }
}

/// Conversion from extracted field values into index keys.
///
/// Selectors may return `Option<K>`; a `None` key means the record has
/// no value for the indexed field and is skipped during index builds.
pub trait IntoIndexKey {
    /// Converts the value, or reports that no key exists.
    fn into_index_key(self) -> Option<IndexKey>;
}

impl IntoIndexKey for IndexKey {
    fn into_index_key(self) -> Option<IndexKey> {
        Some(self)
    }
}

impl<K: IntoIndexKey> IntoIndexKey for Option<K> {
    fn into_index_key(self) -> Option<IndexKey> {
        self.and_then(IntoIndexKey::into_index_key)
    }
}

macro_rules! impl_into_index_key {
    ($($ty:ty => $ctor:expr),* $(,)?) => {
        $(
            impl IntoIndexKey for $ty {
                fn into_index_key(self) -> Option<IndexKey> {
                    Some($ctor(self))
                }
            }
        )*
    };
}

impl_into_index_key! {
    bool => IndexKey::from_bool,
    i8 => |v| IndexKey::from_int(i64::from(v)),
    i16 => |v| IndexKey::from_int(i64::from(v)),
    i32 => |v| IndexKey::from_int(i64::from(v)),
    i64 => IndexKey::from_int,
    u8 => |v| IndexKey::from_int(i64::from(v)),
    u16 => |v| IndexKey::from_int(i64::from(v)),
    u32 => |v| IndexKey::from_int(i64::from(v)),
    u64 => IndexKey::from_uint,
    usize => |v| IndexKey::from_uint(v as u64),
    f32 => |v| IndexKey::from_float(f64::from(v)),
    f64 => IndexKey::from_float,
    char => |v: char| IndexKey::from_string(v.to_string()),
    String => IndexKey::from_string,
    &str => IndexKey::from_string,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_and_uint_normalize() {
        assert_eq!(42u64.into_index_key(), 42i64.into_index_key());
        assert_eq!(7u8.into_index_key(), IndexKey::from_int(7).into_index_key());
    }

    #[test]
    fn test_float_ordering() {
        let neg = IndexKey::from_float(-1.5);
        let zero = IndexKey::from_float(0.0);
        let pos = IndexKey::from_float(2.5);

        assert!(neg < zero);
        assert!(zero < pos);
    }

    #[test]
    fn test_float_equality() {
        assert_eq!(IndexKey::from_float(1.25), IndexKey::from_float(1.25));
        assert_ne!(IndexKey::from_float(1.25), IndexKey::from_float(1.26));
    }

    #[test]
    fn test_option_none_is_absent() {
        let absent: Option<i64> = None;
        assert_eq!(absent.into_index_key(), None);
        assert_eq!(Some(3i64).into_index_key(), 3i64.into_index_key());
    }

    #[test]
    fn test_str_keys_match_string_keys() {
        assert_eq!("alice".into_index_key(), String::from("alice").into_index_key());
    }

    #[test]
    fn test_cross_variant_ordering_deterministic() {
        let bool_key = IndexKey::from_bool(true);
        let int_key = IndexKey::from_int(0);
        let str_key = IndexKey::from_string("a");

        assert!(bool_key < int_key);
        assert!(int_key < str_key);
    }
}
