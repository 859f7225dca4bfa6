//! Label conversions for fieldless domain enums
//!
//! Resource kinds and invitation directions travel as lowercase labels in
//! configuration keys, log fields and remote request paths. This macro gives
//! such an enum a single label table and derives `as_str`, `Display` and a
//! case-insensitive `FromStr` from it.
//!
//! # Example
//!
//! ```rust
//! use linkreach_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Feed {
//!     Inbox,
//!     Archive,
//! }
//!
//! impl_domain_label_conversions!(Feed {
//!     Inbox => "inbox",
//!     Archive => "archive",
//! });
//!
//! assert_eq!(Feed::Archive.as_str(), "archive");
//! assert_eq!("INBOX".parse::<Feed>(), Ok(Feed::Inbox));
//! ```

/// Implements `as_str`, `ALL`, Display and FromStr for label enums
///
/// Labels must be lowercase; parsing lowercases its input before matching.
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Stable lowercase label.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
