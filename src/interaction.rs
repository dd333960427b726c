use crate::catalog::NoteRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown highlight category `{0}` (expected top, middle, base or none)")]
pub struct UnknownCategory(pub String);

/// Which role group, if any, the sink is asked to emphasize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightCategory {
    Top,
    Middle,
    Base,
    #[default]
    None,
}

impl HighlightCategory {
    pub fn role(self) -> Option<NoteRole> {
        match self {
            HighlightCategory::Top => Some(NoteRole::Top),
            HighlightCategory::Middle => Some(NoteRole::Middle),
            HighlightCategory::Base => Some(NoteRole::Base),
            HighlightCategory::None => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightCategory::Top => "top",
            HighlightCategory::Middle => "middle",
            HighlightCategory::Base => "base",
            HighlightCategory::None => "none",
        }
    }
}

impl fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(HighlightCategory::Top),
            "middle" => Ok(HighlightCategory::Middle),
            "base" => Ok(HighlightCategory::Base),
            "none" | "" => Ok(HighlightCategory::None),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Hover, selection and category emphasis reported back by a sink.
///
/// Only colors and emphasis depend on this; graph and layout never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub highlighted: Option<String>,
    pub selected: Option<String>,
    pub category: HighlightCategory,
}

impl InteractionState {
    pub fn new(category: HighlightCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Pointer entered a node.
    pub fn hover(&mut self, id: &str) {
        self.highlighted = Some(id.to_string());
    }

    /// Pointer left a node.
    pub fn unhover(&mut self) {
        self.highlighted = None;
    }

    /// Clicking the selected node clears the selection.
    pub fn toggle_selection(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }

    pub fn set_category(&mut self, category: HighlightCategory) {
        self.category = category;
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted.as_deref() == Some(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }
}
