//! Closed label enums shared by inputs and derived fields.
//!
//! Every categorical field in this crate is a small enum with one canonical
//! text label. The label is what gets serialized; parsing also accepts the
//! long labels used by v0.2 snapshots. Anything else is an
//! [`InvalidInput`](super::ClimateError::InvalidInput).

/// Declares a label enum with `ALL`, `label()`, `Display`, `FromStr` and serde
/// support routed through the label text.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($field:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "&'static str")]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Canonical labels joined for error messages and `info` output.
            pub fn expected() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.label())
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::climate::ClimateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($label) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::climate::ClimateError::InvalidInput {
                    field: $field,
                    value: s.to_string(),
                    expected: Self::expected(),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::climate::ClimateError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(v: $name) -> Self {
                v.label()
            }
        }
    };
}

pub(crate) use labeled_enum;
