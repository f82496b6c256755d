use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::StoreError;

/// Mode recorded for a tree entry
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum EntryMode {
    Regular,
    Executable,
    Directory,
}

impl EntryMode {
    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Regular => 0o100644,
            EntryMode::Executable => 0o100755,
            EntryMode::Directory => 0o40000,
        }
    }

    /// Octal form as written inside tree objects, without leading zeros
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
            EntryMode::Directory => "40000",
        }
    }

    /// Zero-padded 6-digit form used for display
    pub fn as_padded_str(&self) -> String {
        format!("{:06o}", self.as_u32())
    }

    pub fn from_octal_str(mode: &str) -> Result<Self, StoreError> {
        // git historically wrote directories as 040000; accept both
        match mode {
            "100644" => Ok(EntryMode::Regular),
            "100755" => Ok(EntryMode::Executable),
            "40000" | "040000" => Ok(EntryMode::Directory),
            _ => Err(StoreError::MalformedObject(format!(
                "invalid entry mode {:?}",
                mode
            ))),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Kind of object an entry with this mode points at
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Regular | EntryMode::Executable => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
        }
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.as_u32()
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(EntryMode::Regular, "100644", "100644")]
    #[case(EntryMode::Executable, "100755", "100755")]
    #[case(EntryMode::Directory, "40000", "040000")]
    fn renders_modes(#[case] mode: EntryMode, #[case] raw: &str, #[case] padded: &str) {
        assert_eq!(mode.as_str(), raw);
        assert_eq!(mode.as_padded_str(), padded);
        assert_eq!(EntryMode::from_octal_str(raw).unwrap(), mode);
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(EntryMode::from_octal_str("120000").is_err());
        assert!(EntryMode::from_octal_str("").is_err());
    }
}
