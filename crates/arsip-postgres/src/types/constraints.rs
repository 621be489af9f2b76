//! Documents table constraint violations.

use strum::{Display, EnumString};

/// Named `CHECK` constraints of the `documents` table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString, Display)]
pub enum DocumentConstraints {
    #[strum(serialize = "documents_name_not_empty")]
    NameNotEmpty,
    #[strum(serialize = "documents_name_length_max")]
    NameLengthMax,
    #[strum(serialize = "documents_file_path_not_empty")]
    FilePathNotEmpty,
}

impl DocumentConstraints {
    /// Creates a new [`DocumentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the request field the constraint guards.
    pub fn field(self) -> &'static str {
        match self {
            Self::NameNotEmpty | Self::NameLengthMax => "name",
            Self::FilePathNotEmpty => "file",
        }
    }

    /// Returns a user-facing description of the violation.
    pub fn message(self) -> &'static str {
        match self {
            Self::NameNotEmpty => "Document name cannot be empty",
            Self::NameLengthMax => "Document name cannot exceed 255 characters",
            Self::FilePathNotEmpty => "Document must reference a stored file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_constraint_names() {
        assert_eq!(
            DocumentConstraints::new("documents_name_not_empty"),
            Some(DocumentConstraints::NameNotEmpty)
        );
        assert_eq!(DocumentConstraints::new("documents_pkey"), None);
        assert_eq!(DocumentConstraints::NameLengthMax.field(), "name");
    }
}
