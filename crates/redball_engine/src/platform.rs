//! Platform detection and capability queries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform the game is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Android phones and tablets
    Android,
    /// iPhone and iPad
    Ios,
    /// Desktop Windows
    Windows,
    /// Desktop macOS
    MacOs,
    /// Desktop Linux
    Linux,
    /// Anything else
    Unknown,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    /// Mobile platforms run with a reduced rendering budget
    ///
    /// Post-process passes are skipped on constrained platforms.
    pub fn is_constrained(self) -> bool {
        matches!(self, Self::Android | Self::Ios)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("Unknown platform: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_is_constrained() {
        assert!(Platform::Android.is_constrained());
        assert!(Platform::Ios.is_constrained());
        assert!(!Platform::Windows.is_constrained());
        assert!(!Platform::Linux.is_constrained());
    }

    #[test]
    fn test_parse_round_trip() {
        for platform in [Platform::Android, Platform::Ios, Platform::MacOs] {
            assert_eq!(platform.to_string().parse::<Platform>(), Ok(platform));
        }
        assert!("amiga".parse::<Platform>().is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_current_platform() {
        assert_eq!(Platform::current(), Platform::Linux);
    }
}
