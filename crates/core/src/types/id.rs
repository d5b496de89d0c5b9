//! Non-empty string newtypes for line item identity and labels.
//!
//! Use the `define_label!` macro to create validated string wrappers that
//! prevent accidentally mixing a product id with a display name.

/// Errors that can occur when parsing a label type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The input string is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Human-readable name of the label type.
        kind: &'static str,
    },
}

/// Macro to define a validated, non-empty string wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain JSON string, rejecting empty input
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `parse()`, `as_str()`
/// - `FromStr`, `TryFrom<String>`, `AsRef<str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use storecart_core::define_label;
/// define_label!(Sku, "sku");
/// define_label!(Title, "title");
///
/// let sku = Sku::parse("A-100").unwrap();
/// assert_eq!(sku.as_str(), "A-100");
/// assert!(Title::parse("").is_err());
///
/// // These are different types, so this won't compile:
/// // let _: Title = sku;
/// ```
#[macro_export]
macro_rules! define_label {
    ($name:ident, $kind:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse a value, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns `LabelError::Empty` when the input has no visible
            /// characters.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::LabelError> {
                if s.trim().is_empty() {
                    return Err($crate::LabelError::Empty { kind: $kind });
                }
                Ok(Self(s.to_owned()))
            }

            /// Returns the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::LabelError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::LabelError;

            fn try_from(value: String) -> ::core::result::Result<Self, Self::Error> {
                if value.trim().is_empty() {
                    return Err($crate::LabelError::Empty { kind: $kind });
                }
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Product identifier as carried by the add-to-cart control.
define_label!(ProductId, "product id");
// Display label shown in the cart table.
define_label!(ItemName, "item name");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = ProductId::parse("p1").unwrap();
        assert_eq!(id.as_str(), "p1");
        assert_eq!(id.to_string(), "p1");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(
            ProductId::parse("").unwrap_err(),
            LabelError::Empty { kind: "product id" }
        );
        assert!(ItemName::parse("   ").is_err());
    }

    #[test]
    fn test_error_message_names_kind() {
        let err = ItemName::parse("").unwrap_err();
        assert_eq!(err.to_string(), "item name cannot be empty");
    }

    #[test]
    fn test_serde_is_plain_string() {
        let name = ItemName::parse("Widget").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Widget\"");

        let back: ItemName = serde_json::from_str("\"Widget\"").unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
        assert!(serde_json::from_str::<ProductId>("42").is_err());
    }
}
