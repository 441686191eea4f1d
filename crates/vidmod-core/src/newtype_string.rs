//! Macro for defining schema identifier newtypes.
//!
//! Component, table and column names share one invariant: a non-empty
//! identifier made of ASCII letters, digits and underscores. Backends
//! interpolate these names into DDL, so the invariant is checked once at
//! construction and never again.

/// Return `true` if `s` is a usable schema identifier.
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Define a strongly-typed schema identifier newtype.
///
/// Generates:
/// - The struct with `Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize`
/// - Custom `Deserialize` (rejects non-identifiers)
/// - `new()` (panics on invalid input), `try_new()` (returns Option), `as_str()`
/// - `Display`, `AsRef<str>`, `Deref<Target=str>`, `Borrow<str>`
/// - `From<&str>` for literal-heavy catalog code, `PartialEq<str>`, `PartialEq<&str>`
macro_rules! define_identifier {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::try_new(s).ok_or_else(|| {
                    serde::de::Error::custom(concat!(
                        stringify!($Name),
                        " must be a non-empty identifier of [A-Za-z0-9_]"
                    ))
                })
            }
        }

        impl $Name {
            /// Create a new instance, panicking if the name is not an identifier.
            ///
            /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
            pub fn new(name: impl Into<String>) -> Self {
                let s = name.into();
                assert!(
                    $crate::newtype_string::is_identifier(&s),
                    concat!(stringify!($Name), " must be a non-empty identifier: {:?}"),
                    s
                );
                Self(s)
            }

            /// Try to create a new instance, returning `None` if the name is not an identifier.
            pub fn try_new(name: impl Into<String>) -> Option<Self> {
                let s = name.into();
                if $crate::newtype_string::is_identifier(&s) {
                    Some(Self(s))
                } else {
                    None
                }
            }

            /// Return the underlying name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl From<&str> for $Name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_identifier;
