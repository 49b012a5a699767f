//! Permission levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PermsError;

/// Access policy attached to a key.
///
/// Serialized with the short labels used by declarations: `"r"`, `"w"`,
/// `"rw"` and `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "r", alias = "read")]
    Read,
    #[serde(rename = "w", alias = "write")]
    Write,
    #[default]
    #[serde(rename = "rw", alias = "read-write")]
    ReadWrite,
    #[serde(rename = "none")]
    None,
}

impl Permission {
    /// All permission levels.
    pub const ALL: [Permission; 4] = [
        Permission::Read,
        Permission::Write,
        Permission::ReadWrite,
        Permission::None,
    ];

    /// Whether this level allows reading.
    pub const fn can_read(self) -> bool {
        matches!(self, Permission::Read | Permission::ReadWrite)
    }

    /// Whether this level allows writing.
    pub const fn can_write(self) -> bool {
        matches!(self, Permission::Write | Permission::ReadWrite)
    }

    /// Whether this level allows the given kind of access.
    pub const fn allows(self, access: Access) -> bool {
        match access {
            Access::Read => self.can_read(),
            Access::Write => self.can_write(),
        }
    }

    /// The short label.
    pub const fn label(self) -> &'static str {
        match self {
            Permission::Read => "r",
            Permission::Write => "w",
            Permission::ReadWrite => "rw",
            Permission::None => "none",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Permission {
    type Err = PermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" | "read" => Ok(Permission::Read),
            "w" | "write" => Ok(Permission::Write),
            "rw" | "read-write" => Ok(Permission::ReadWrite),
            "none" => Ok(Permission::None),
            other => Err(PermsError::InvalidPermission(other.to_string())),
        }
    }
}

/// The kind of access being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("readable"),
            Access::Write => f.write_str("writable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_matrix() {
        assert!(Permission::Read.can_read());
        assert!(!Permission::Read.can_write());

        assert!(!Permission::Write.can_read());
        assert!(Permission::Write.can_write());

        assert!(Permission::ReadWrite.can_read());
        assert!(Permission::ReadWrite.can_write());

        assert!(!Permission::None.can_read());
        assert!(!Permission::None.can_write());
    }

    #[test]
    fn test_default_is_read_write() {
        assert_eq!(Permission::default(), Permission::ReadWrite);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("r".parse::<Permission>().unwrap(), Permission::Read);
        assert_eq!("write".parse::<Permission>().unwrap(), Permission::Write);
        assert_eq!("read-write".parse::<Permission>().unwrap(), Permission::ReadWrite);
        assert_eq!("none".parse::<Permission>().unwrap(), Permission::None);

        let err = "rwx".parse::<Permission>().unwrap_err();
        assert_eq!(err, PermsError::InvalidPermission("rwx".into()));
    }

    #[test]
    fn test_display_matches_parse() {
        for permission in Permission::ALL {
            let label = permission.to_string();
            assert_eq!(label.parse::<Permission>().unwrap(), permission);
        }
    }

    #[test]
    fn test_serde_short_labels() {
        let json = serde_json::to_string(&Permission::ReadWrite).unwrap();
        assert_eq!(json, "\"rw\"");

        let parsed: Permission = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(parsed, Permission::Read);

        assert!(serde_json::from_str::<Permission>("\"x\"").is_err());
    }

    #[test]
    fn test_allows() {
        assert!(Permission::Read.allows(Access::Read));
        assert!(!Permission::Read.allows(Access::Write));
        assert_eq!(Access::Write.to_string(), "writable");
    }
}
