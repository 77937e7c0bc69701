use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Filename of an image that lives in the asset catalog directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageFilename(pub String);

impl ImageFilename {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ImageFilename {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ImageFilename {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Declares a closed set of names with a lowercase input key and a display
/// form. The display form is what goes on the wire.
macro_rules! name_table {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($key:literal, $display:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn display_name(self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }

            /// Case-insensitive lookup by input key.
            pub fn parse(raw: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.key().eq_ignore_ascii_case(raw))
            }

            pub fn keys() -> Vec<&'static str> {
                Self::ALL.iter().map(|value| value.key()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.display_name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.display_name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} '{raw}'",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

name_table!(
    /// Visual transition played when the display switches images.
    TransitionName {
        None => ("none", "None"),
        Blend => ("blend", "Blend"),
        Blur => ("blur", "Blur"),
        Wipe => ("wipe", "Wipe"),
        Slide => ("slide", "Slide"),
        Glitch => ("glitch", "Glitch"),
    }
);

name_table!(
    /// Post-processing filter applied to the current image. Several may be
    /// active at once and they compose in selection order.
    EffectName {
        Blur => ("blur", "Blur"),
        Bloom => ("bloom", "Bloom"),
        RgbShift => ("rgbshift", "RgbShift"),
        Vignette => ("vignette", "Vignette"),
        VignetteBlur => ("vignetteblur", "VignetteBlur"),
        MotionBlur => ("motionblur", "MotionBlur"),
        Glitch => ("glitch", "Glitch"),
    }
);

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
