//! Shared library naming conventions.
//!
//! Cargo names a `cdylib` artifact after the crate, with an OS specific
//! prefix and extension. The generated Makefile copies that artifact, so the
//! name computed here has to match what cargo emits for the build target.

use std::fmt;

/// Operating system family that decides the library file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    /// Linux, the BSDs and other ELF platforms
    Unix,
    /// macOS and other Apple platforms
    MacOs,
    /// Windows (MSVC and GNU)
    Windows,
}

impl TargetOs {
    /// The OS this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_vendor = "apple") {
            TargetOs::MacOs
        } else {
            TargetOs::Unix
        }
    }

    /// Classify a target triple such as `aarch64-apple-darwin`.
    pub fn from_triple(triple: &str) -> Self {
        let parts: Vec<&str> = triple.split('-').collect();
        if parts.contains(&"windows") {
            TargetOs::Windows
        } else if parts.contains(&"apple") || parts.contains(&"darwin") {
            TargetOs::MacOs
        } else {
            TargetOs::Unix
        }
    }

    /// Get the OS family name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Unix => "unix",
            TargetOs::MacOs => "macos",
            TargetOs::Windows => "windows",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix and extension of a shared library file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DylibNaming {
    /// File prefix (`lib` on Unix-likes)
    pub prefix: String,
    /// File extension without the dot
    pub extension: String,
}

impl DylibNaming {
    /// Naming convention for an OS family.
    pub fn for_os(os: TargetOs) -> Self {
        let (prefix, extension) = match os {
            TargetOs::Unix => ("lib", "so"),
            TargetOs::MacOs => ("lib", "dylib"),
            TargetOs::Windows => ("", "dll"),
        };
        DylibNaming {
            prefix: prefix.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Naming convention for a target triple.
    pub fn for_triple(triple: &str) -> Self {
        Self::for_os(TargetOs::from_triple(triple))
    }

    /// Naming convention of the machine running the generator.
    pub fn host() -> Self {
        Self::for_os(TargetOs::host())
    }

    /// Replace the extension, e.g. with the host-reported `SOEXT`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// File name of the library for crate name `name`.
    pub fn file_name(&self, name: &str) -> String {
        format!("{}{}.{}", self.prefix, name, self.extension)
    }
}
