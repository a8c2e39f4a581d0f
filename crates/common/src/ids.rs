use serde::{Deserialize, Serialize};

/// Declares a database-generated integer identifier.
///
/// Each id is a distinct type so an `ItemId` can never be passed where an
/// `OrderId` is expected, while still serializing as a bare JSON number.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id from its raw database value.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a menu item.
    ItemId
);

define_id!(
    /// Identifier of an order header.
    OrderId
);

define_id!(
    /// Identifier of a single order line.
    OrderItemId
);
