use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Season;

/// Fixed position of one catalog note on the circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutSlot {
    pub index: usize,
    /// Radians, `index * 2π / N`.
    pub angle: f64,
    /// Same angle in degrees, computed as `index * 360 / N`.
    pub degrees: f64,
    pub x: f64,
    pub y: f64,
}

/// Slot assignment for a whole catalog on one canvas size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotTable {
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
    pub radius: f64,
    pub label_radius: f64,
    pub slots: BTreeMap<String, LayoutSlot>,
}

impl SlotTable {
    pub fn get(&self, id: &str) -> Option<&LayoutSlot> {
        self.slots.get(id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub season: Season,
    pub color: String,
    pub connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLayout {
    pub source: String,
    pub target: String,
    pub weight: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LinkLayout {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLayout {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub anchor: TextAnchor,
}

/// Positioned primitives handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
    pub radius: f64,
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
    pub labels: Vec<LabelLayout>,
}

impl Layout {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: (width / 2.0, height / 2.0),
            radius: 0.0,
            nodes: Vec::new(),
            links: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn label(&self, id: &str) -> Option<&LabelLayout> {
        self.labels.iter().find(|label| label.id == id)
    }

    pub fn max_weight(&self) -> u32 {
        self.links.iter().map(|link| link.weight).max().unwrap_or(1)
    }
}
