// Label placement for radial layouts. Pure geometry, no SVG dependency.

use super::types::{LabelLayout, LayoutSlot, SlotTable, TextAnchor};

/// Rotation and anchor for a label sitting at `degrees` on the circle.
///
/// Labels on the left half (strictly between 90° and 270°) are flipped by
/// 180° and anchored at their end so the text never reads upside down.
pub fn label_rotation(degrees: f64) -> (f64, TextAnchor) {
    if degrees > 90.0 && degrees < 270.0 {
        (degrees + 180.0, TextAnchor::End)
    } else {
        (degrees, TextAnchor::Start)
    }
}

pub(super) fn place_label(id: &str, slot: &LayoutSlot, table: &SlotTable) -> LabelLayout {
    let (cx, cy) = table.center;
    let (rotation, anchor) = label_rotation(slot.degrees);
    LabelLayout {
        id: id.to_string(),
        x: cx + table.label_radius * slot.angle.cos(),
        y: cy + table.label_radius * slot.angle.sin(),
        rotation,
        anchor,
    }
}
