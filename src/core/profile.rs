//! Cargo build profiles.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The cargo profile passed to `--profile`.
///
/// Any string is accepted; names other than `dev` and `release` are custom
/// profiles and are handed to cargo verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Profile {
    /// `dev`, built into `target/debug`
    #[default]
    Dev,
    /// `release`
    Release,
    /// A custom profile from the crate's `Cargo.toml`
    Custom(String),
}

impl Profile {
    /// Get the profile name as cargo knows it.
    pub fn as_str(&self) -> &str {
        match self {
            Profile::Dev => "dev",
            Profile::Release => "release",
            Profile::Custom(name) => name,
        }
    }

    /// Name of the directory below the target dir that cargo writes to.
    pub fn target_dir_name(&self) -> &str {
        match self {
            Profile::Dev => "debug",
            other => other.as_str(),
        }
    }
}

impl FromStr for Profile {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Profile::from(s.to_string()))
    }
}

impl From<String> for Profile {
    fn from(s: String) -> Self {
        match s.as_str() {
            "dev" => Profile::Dev,
            "release" => Profile::Release,
            _ => Profile::Custom(s),
        }
    }
}

impl From<&str> for Profile {
    fn from(s: &str) -> Self {
        Profile::from(s.to_string())
    }
}

impl From<Profile> for String {
    fn from(profile: Profile) -> Self {
        profile.as_str().to_string()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
