use crate::catalog::NoteRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub label_color: String,
    pub link_color: String,
    pub node_stroke: String,
    pub selected_stroke: String,
    pub dimmed_color: String,
    pub highlight_top: String,
    pub highlight_middle: String,
    pub highlight_base: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            label_color: "#000000".to_string(),
            link_color: "#DFDFDF".to_string(),
            node_stroke: "#fff".to_string(),
            selected_stroke: "#333".to_string(),
            dimmed_color: "#D3D3D3".to_string(),
            highlight_top: "#5F156E".to_string(),
            highlight_middle: "#5B21A2".to_string(),
            highlight_base: "#7F4CD6".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#14161B".to_string(),
            label_color: "#E6E8EE".to_string(),
            link_color: "#3A3F4B".to_string(),
            node_stroke: "#14161B".to_string(),
            selected_stroke: "#F5F5F5".to_string(),
            dimmed_color: "#4A4F5C".to_string(),
            highlight_top: "#C77DDB".to_string(),
            highlight_middle: "#A98BF0".to_string(),
            highlight_base: "#8FB4FF".to_string(),
        }
    }

    pub fn highlight_color(&self, role: NoteRole) -> &str {
        match role {
            NoteRole::Top => &self.highlight_top,
            NoteRole::Middle => &self.highlight_middle,
            NoteRole::Base => &self.highlight_base,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
