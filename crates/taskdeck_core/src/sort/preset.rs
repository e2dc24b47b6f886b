//! Fixed sort options offered by the list view's sort picker.

use crate::sort::strategy::{SortCriteria, SortDirection, SortProperty};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Picker value did not match any known preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortPreset(pub String);

impl Display for UnknownSortPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort option `{}`; expected one of {}",
            self.0,
            SortPreset::ALL
                .iter()
                .map(|preset| preset.value())
                .collect::<Vec<_>>()
                .join("|")
        )
    }
}

impl Error for UnknownSortPreset {}

/// One entry of the sort picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortPreset {
    #[default]
    Default,
    NameAsc,
    NameDesc,
    DueDateAsc,
    DueDateDesc,
    CompletedFirst,
}

impl SortPreset {
    /// Picker entries in display order.
    pub const ALL: [SortPreset; 6] = [
        Self::Default,
        Self::NameAsc,
        Self::NameDesc,
        Self::DueDateAsc,
        Self::DueDateDesc,
        Self::CompletedFirst,
    ];

    /// Stable machine value.
    pub fn value(self) -> &'static str {
        match self {
            Self::Default => "none",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::DueDateAsc => "date-asc",
            Self::DueDateDesc => "date-desc",
            Self::CompletedFirst => "completed",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default Order",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::DueDateAsc => "Due Date (Earliest)",
            Self::DueDateDesc => "Due Date (Latest)",
            Self::CompletedFirst => "Completed First",
        }
    }

    pub fn criteria(self) -> SortCriteria {
        let (property, direction) = match self {
            Self::Default => (SortProperty::None, SortDirection::None),
            Self::NameAsc => (SortProperty::Name, SortDirection::Asc),
            Self::NameDesc => (SortProperty::Name, SortDirection::Desc),
            Self::DueDateAsc => (SortProperty::DueDate, SortDirection::Asc),
            Self::DueDateDesc => (SortProperty::DueDate, SortDirection::Desc),
            Self::CompletedFirst => (SortProperty::Completion, SortDirection::Asc),
        };
        SortCriteria::new(property, direction)
    }
}

impl FromStr for SortPreset {
    type Err = UnknownSortPreset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.value() == normalized)
            .ok_or(UnknownSortPreset(normalized))
    }
}

impl Display for SortPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}
