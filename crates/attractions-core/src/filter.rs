//! Filter selection state for the category and state dropdowns.

use crate::attraction::AttractionRecord;

/// Value of the "everything" option in both filter controls.
pub const ALL: &str = "all";

/// One filter dimension: either unrestricted or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Maps a control value to a selection; `"all"` is the unrestricted option.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// The control value this selection corresponds to.
    #[must_use]
    pub fn as_value(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(v) => v,
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_value())
    }
}

/// Current category/state selection. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Selection,
    pub state: Selection,
}

impl FilterState {
    #[must_use]
    pub fn new(category: Selection, state: Selection) -> Self {
        Self { category, state }
    }

    /// Whether `record` passes both dimensions. Matching is exact and
    /// case-sensitive; a record without a state only passes `Selection::All`.
    #[must_use]
    pub fn matches(&self, record: &AttractionRecord) -> bool {
        let category_match = match &self.category {
            Selection::All => true,
            Selection::Only(category) => record.has_category(category),
        };
        let state_match = match &self.state {
            Selection::All => true,
            Selection::Only(state) => record.state.as_deref() == Some(state.as_str()),
        };
        category_match && state_match
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_all() && self.state.is_all()
    }
}
