use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::config::LayoutConfig;

use super::error::LayoutError;
use super::types::{LayoutSlot, SlotTable};

/// Assigns every note in `catalog_order` a slot on the circle.
///
/// The step is derived from the whole catalog, so a note keeps its angle no
/// matter which subset of notes a particular graph contains.
pub fn compute_slots(
    catalog_order: &[&str],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Result<SlotTable, LayoutError> {
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(LayoutError::InvalidCanvas { width, height });
    }

    let center = (width / 2.0, height / 2.0);
    let radius = width.min(height) / config.radius_divisor;
    let label_radius = radius + config.label_offset;

    let count = catalog_order.len();
    let step = if count == 0 { 0.0 } else { 2.0 * PI / count as f64 };

    let mut slots = BTreeMap::new();
    for (index, id) in catalog_order.iter().enumerate() {
        let angle = index as f64 * step;
        let degrees = index as f64 * 360.0 / count as f64;
        slots.insert(
            id.to_string(),
            LayoutSlot {
                index,
                angle,
                degrees,
                x: center.0 + radius * angle.cos(),
                y: center.1 + radius * angle.sin(),
            },
        );
    }

    Ok(SlotTable {
        width,
        height,
        center,
        radius,
        label_radius,
        slots,
    })
}
