//! Target names - what the host extension loader will `require`.
//!
//! A target name may be nested (`my_gem/my_ext`). The part before the last
//! `/` becomes the install prefix below the host's arch directory, and the
//! leaf is the name of the shared library.

use std::fmt;

use crate::core::errors::ConfigError;

/// A validated, split extension target name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetName {
    /// Install prefix, always starting with `/` when non-empty.
    prefix: String,
    /// Library name without any prefix.
    leaf: String,
}

impl TargetName {
    /// Parse a target name, splitting off the install prefix.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::InvalidTarget {
                name: name.to_string(),
                reason: "the target name is empty",
            });
        }

        let (prefix, leaf) = match name.rsplit_once('/') {
            Some((prefix, leaf)) => {
                let prefix = prefix.trim_start_matches('/');
                if prefix.is_empty() {
                    (String::new(), leaf)
                } else {
                    (format!("/{}", prefix), leaf)
                }
            }
            None => (String::new(), name),
        };

        if leaf.is_empty() {
            return Err(ConfigError::InvalidTarget {
                name: name.to_string(),
                reason: "the extension name after the last `/` is empty",
            });
        }

        Ok(TargetName {
            prefix,
            leaf: leaf.to_string(),
        })
    }

    /// The install prefix (`""` or `/nested/dir`).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The library name.
    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// Whether the target installs below a nested directory.
    pub fn is_nested(&self) -> bool {
        !self.prefix.is_empty()
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nested() {
            write!(f, "{}/{}", &self.prefix[1..], self.leaf)
        } else {
            write!(f, "{}", self.leaf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_name() {
        let name = TargetName::parse("my_ext").unwrap();
        assert_eq!(name.prefix(), "");
        assert_eq!(name.leaf(), "my_ext");
        assert!(!name.is_nested());
    }

    #[test]
    fn test_nested_name() {
        let name = TargetName::parse("a/b/c").unwrap();
        assert_eq!(name.prefix(), "/a/b");
        assert_eq!(name.leaf(), "c");
        assert_eq!(name.to_string(), "a/b/c");
    }

    #[test]
    fn test_leading_separator_not_doubled() {
        let name = TargetName::parse("/my_gem/my_ext").unwrap();
        assert_eq!(name.prefix(), "/my_gem");
        assert_eq!(name.leaf(), "my_ext");

        let name = TargetName::parse("/my_ext").unwrap();
        assert_eq!(name.prefix(), "");
        assert_eq!(name.leaf(), "my_ext");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            TargetName::parse(""),
            Err(ConfigError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_trailing_separator_rejected() {
        assert!(TargetName::parse("my_gem/").is_err());
        assert!(TargetName::parse("/").is_err());
    }
}
