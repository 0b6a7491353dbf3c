//! Container configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable read by [`Config::from_env`].
pub const ALLOW_OVERRIDE_ENV: &str = "FUNBOX_ALLOW_OVERRIDE";

/// Stores the configuration of a [`Container`](super::Container).
///
/// The only option is whether defining an existing key replaces it
/// (`allow_override`) or fails with
/// [`Error::DuplicateKey`](crate::Error::DuplicateKey). Overrides are
/// disallowed by default.
///
/// # Examples
///
/// ```rust
/// use funbox::container::Config;
///
/// assert!(Config::default().cant_override());
/// assert!(Config::new().with_allow_override(true).can_override());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    allow_override: bool,
}

impl Config {
    /// Creates the default configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            allow_override: false,
        }
    }

    /// Returns a copy with `allow_override` set.
    #[inline]
    #[must_use]
    pub const fn with_allow_override(mut self, allow_override: bool) -> Self {
        self.allow_override = allow_override;
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// `FUNBOX_ALLOW_OVERRIDE` set to `1`, `true` or `yes` (any case)
    /// enables overrides; anything else, or no variable, keeps the default.
    pub fn from_env() -> Self {
        let allow_override = std::env::var(ALLOW_OVERRIDE_ENV)
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);
        Self::new().with_allow_override(allow_override)
    }

    /// Returns `true` when existing keys may be redefined.
    #[inline]
    pub const fn can_override(&self) -> bool {
        self.allow_override
    }

    /// Returns `true` when redefining an existing key is an error.
    #[inline]
    pub const fn cant_override(&self) -> bool {
        !self.can_override()
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
