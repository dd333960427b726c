use crate::interaction::InteractionState;
use crate::layout::{Layout, TextAnchor};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub brand: Option<String>,
    pub threshold: u32,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
    pub labels: Vec<LabelDump>,
    pub interaction: InteractionState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub season: String,
    pub color: String,
    pub connection_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDump {
    pub source_id: String,
    pub target_id: String,
    pub weight: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub rotation_degrees: f64,
    pub text_anchor: TextAnchor,
}

impl LayoutDump {
    pub fn from_layout(
        layout: &Layout,
        brand: Option<&str>,
        threshold: u32,
        interaction: &InteractionState,
    ) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
                season: node.season.to_string(),
                color: node.color.clone(),
                connection_count: node.connections,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                source_id: link.source.clone(),
                target_id: link.target.clone(),
                weight: link.weight,
                x1: link.x1,
                y1: link.y1,
                x2: link.x2,
                y2: link.y2,
            })
            .collect();

        let labels = layout
            .labels
            .iter()
            .map(|label| LabelDump {
                id: label.id.clone(),
                x: label.x,
                y: label.y,
                rotation_degrees: label.rotation,
                text_anchor: label.anchor,
            })
            .collect();

        LayoutDump {
            brand: brand.map(str::to_string),
            threshold,
            width: layout.width,
            height: layout.height,
            radius: layout.radius,
            nodes,
            links,
            labels,
            interaction: interaction.clone(),
        }
    }
}

pub fn write_layout_dump(path: &Path, dump: &LayoutDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
