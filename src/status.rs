//! Vendor status-code tables.
//!
//! Every response body carries a numeric `status` in an application-specific
//! space. Success is `200..=299`; anything else is looked up in the table of
//! the endpoint that produced it. Tables are closed enums with an `Unknown`
//! fallback so that matching on them is exhaustive.

use std::fmt::{Debug, Display};

/// Whether an envelope status denotes success.
pub fn is_success(status: i64) -> bool {
    (200..300).contains(&status)
}

/// A closed enumeration of documented vendor status codes.
pub trait StatusTable: Copy + Debug + Display + Send + Sync + 'static {
    /// Short name of the table, used in error messages.
    const LABEL: &'static str;

    /// Every documented variant, in table order.
    const KNOWN: &'static [Self];

    /// Look up a code, falling back to the `Unknown` variant.
    fn from_code(code: i64) -> Self;

    /// The numeric code.
    fn code(&self) -> i64;

    /// The documented description, `None` for unknown codes.
    fn description(&self) -> Option<&'static str>;
}

/// Declare a status table.
///
/// ```rust,ignore
/// status_table! {
///     /// Doc comment.
///     pub enum MyStatus: "my table" {
///         NotFound = 404 => "Not found",
///     }
/// }
/// ```
macro_rules! status_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $label:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $desc:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A code the vendor table does not document.
            Unknown(i64),
        }

        impl $crate::status::StatusTable for $name {
            const LABEL: &'static str = $label;
            const KNOWN: &'static [Self] = &[$(Self::$variant),+];

            fn from_code(code: i64) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            fn code(&self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => *code,
                }
            }

            fn description(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($desc),)+
                    Self::Unknown(_) => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::status::StatusTable as _;
                match self.description() {
                    Some(description) => f.write_str(description),
                    None => write!(f, "Unknown status code: {}", self.code()),
                }
            }
        }
    };
}

pub(crate) use status_table;

status_table! {
    /// Codes shared by endpoints the vendor documents no dedicated table for.
    pub enum CommonStatus: "common" {
        /// Caller is not allowed to access the resource
        Forbidden = 403 => "Forbidden",
        /// Resource not found
        NotFound = 404 => "Not found",
        /// The vending machine is offline
        OfflineEquipment = 10416 => "Offline equipment",
        /// Unknown vending machine code
        SelfDealerNotExist = 40506 => "Self dealer does not exist",
        /// The machine does not belong to this merchant
        NoOperatingPermissions = 40531 => "No operating permissions",
    }
}
