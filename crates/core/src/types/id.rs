//! Newtype IDs for type-safe entity references.
//!
//! Orders and cart lines are identified by opaque strings handed out by the
//! systems that own them (the order service, the cart store). Use the
//! `define_id!` macro to wrap them so an order ID can never be passed where a
//! cart item ID is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `Display`, `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use bazaar_core::define_id;
/// define_id!(WidgetId);
///
/// let id = WidgetId::new("w-1");
/// assert_eq!(id.as_str(), "w-1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(OrderId);
define_id!(ProductId);
define_id!(CartItemId);
define_id!(CartId);

impl OrderId {
    /// Number of leading characters shown in compact order references.
    pub const SHORT_LEN: usize = 8;

    /// The leading characters of the ID, used in tables (`#abc12345...`).
    ///
    /// Cuts on a character boundary, so multi-byte IDs never panic.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(Self::SHORT_LEN)
            .and_then(|(idx, _)| self.0.get(..idx))
            .unwrap_or(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_order_id_truncates_to_eight_chars() {
        let id = OrderId::new("abc12345-6789-4def-8000-000000000001");
        assert_eq!(id.short(), "abc12345");
    }

    #[test]
    fn test_short_order_id_keeps_short_ids_whole() {
        assert_eq!(OrderId::new("A-17").short(), "A-17");
    }

    #[test]
    fn test_short_order_id_respects_char_boundaries() {
        let id = OrderId::new("ordér-ñumber-1");
        assert_eq!(id.short(), "ordér-ñu");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = CartItemId::new("line-1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"line-1\"");
    }
}
