mod error;
mod label_placement;
mod radial;
mod types;

pub use error::LayoutError;
pub use label_placement::label_rotation;
pub use radial::compute_slots;
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::Graph;

/// Places a filtered graph on the circle described by `catalog_order`.
///
/// An empty graph yields an empty layout rather than an error. A note that the
/// graph references but `catalog_order` lacks is a [`LayoutError::NoteNotInCatalog`].
pub fn compute_layout(
    graph: &Graph,
    catalog_order: &[&str],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let table = compute_slots(catalog_order, width, height, config)?;
    layout_with_slots(graph, &table)
}

/// Same as [`compute_layout`] for callers that keep a slot table per canvas size.
pub fn layout_with_slots(graph: &Graph, table: &SlotTable) -> Result<Layout, LayoutError> {
    if graph.is_empty() {
        return Ok(Layout::empty(table.width, table.height));
    }

    let slot = |id: &str| {
        table
            .get(id)
            .ok_or_else(|| LayoutError::NoteNotInCatalog(id.to_string()))
    };

    let mut nodes = Vec::with_capacity(graph.nodes.len());
    let mut labels = Vec::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        let pos = slot(&node.id)?;
        nodes.push(NodeLayout {
            id: node.id.clone(),
            x: pos.x,
            y: pos.y,
            season: node.season,
            color: node.color.clone(),
            connections: node.connections,
        });
        labels.push(label_placement::place_label(&node.id, pos, table));
    }

    let mut links = Vec::with_capacity(graph.links.len());
    for link in &graph.links {
        let from = slot(&link.source)?;
        let to = slot(&link.target)?;
        links.push(LinkLayout {
            source: link.source.clone(),
            target: link.target.clone(),
            weight: link.weight,
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        });
    }

    Ok(Layout {
        width: table.width,
        height: table.height,
        center: table.center,
        radius: table.radius,
        nodes,
        links,
        labels,
    })
}
