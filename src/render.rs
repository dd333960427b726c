use crate::catalog::NoteCatalog;
use crate::config::RenderConfig;
use crate::interaction::InteractionState;
use crate::layout::{LabelLayout, Layout, LinkLayout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Per-view styling that is not part of the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewStyle {
    pub label_font_size: f64,
}

pub fn render_svg(
    layout: &Layout,
    theme: &Theme,
    config: &RenderConfig,
    view: ViewStyle,
    interaction: &InteractionState,
) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" style=\"font: 10px {}\">",
        escape_xml(&theme.font_family)
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if layout.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    debug_assert!(
        layout
            .links
            .iter()
            .all(|link| layout.node(&link.source).is_some() && layout.node(&link.target).is_some()),
        "link endpoint missing from layout nodes"
    );

    let max_weight = layout.max_weight().max(1);
    let hover_color = interaction
        .highlighted
        .as_deref()
        .and_then(|id| layout.node(id))
        .map(|node| node.color.as_str());

    svg.push_str("<g class=\"links\">");
    for link in &layout.links {
        svg.push_str(&link_svg(link, max_weight, hover_color, theme, config, interaction));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &layout.nodes {
        svg.push_str(&node_svg(node, theme, config, interaction));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"labels\">");
    for label in &layout.labels {
        svg.push_str(&label_svg(label, theme, view));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn link_svg(
    link: &LinkLayout,
    max_weight: u32,
    hover_color: Option<&str>,
    theme: &Theme,
    config: &RenderConfig,
    interaction: &InteractionState,
) -> String {
    let stroke = match (interaction.highlighted.as_deref(), hover_color) {
        (Some(id), Some(color)) if link.touches(id) => color,
        _ => theme.link_color.as_str(),
    };
    let stroke_width = link_stroke_width(link.weight, max_weight, config);
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{stroke}\" stroke-opacity=\"1\" stroke-width=\"{stroke_width:.2}\" data-source=\"{}\" data-target=\"{}\" data-weight=\"{}\"/>",
        link.x1,
        link.y1,
        link.x2,
        link.y2,
        escape_xml(&link.source),
        escape_xml(&link.target),
        link.weight
    )
}

pub fn link_stroke_width(weight: u32, max_weight: u32, config: &RenderConfig) -> f64 {
    f64::from(weight) / f64::from(max_weight.max(1)) * config.link_width_scale + config.link_min_width
}

fn node_svg(
    node: &NodeLayout,
    theme: &Theme,
    config: &RenderConfig,
    interaction: &InteractionState,
) -> String {
    let radius = if interaction.is_highlighted(&node.id) {
        config.highlighted_node_radius
    } else {
        config.node_radius
    };
    let stroke = if interaction.is_selected(&node.id) {
        theme.selected_stroke.as_str()
    } else {
        theme.node_stroke.as_str()
    };
    format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{radius}\" fill=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\" data-id=\"{}\" data-connections=\"{}\"/>",
        node.x,
        node.y,
        node_fill(node, theme, interaction),
        config.node_stroke_width,
        escape_xml(&node.id),
        node.connections
    )
}

/// Season color, or role-group emphasis while a highlight category is active.
pub fn node_fill<'a>(node: &'a NodeLayout, theme: &'a Theme, interaction: &InteractionState) -> &'a str {
    let Some(role) = interaction.category.role() else {
        return &node.color;
    };
    let group = NoteCatalog::global().role_notes(role);
    if group.iter().any(|id| *id == node.id) {
        theme.highlight_color(role)
    } else {
        &theme.dimmed_color
    }
}

fn label_svg(label: &LabelLayout, theme: &Theme, view: ViewStyle) -> String {
    format!(
        "<text font-size=\"{}px\" dy=\"0.35em\" fill=\"{}\" text-anchor=\"{}\" transform=\"translate({:.2}, {:.2}) rotate({})\">{}</text>",
        view.label_font_size,
        theme.label_color,
        label.anchor.as_str(),
        label.x,
        label.y,
        format_degrees(label.rotation),
        escape_xml(&label.id)
    )
}

fn format_degrees(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .unwrap_or(usvg::Size::from_wh(800.0, 800.0).unwrap());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
