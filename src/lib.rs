pub mod builder;
pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod interaction;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod theme;

pub use builder::{GraphBuilder, build_graph};
pub use catalog::{CatalogError, NoteCatalog, NoteRole, Season};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, ThresholdConfig, load_config};
pub use interaction::{HighlightCategory, InteractionState};
pub use ir::{FormulationRecord, Graph, GraphLink, GraphNode};
pub use layout::{Layout, LayoutError, compute_layout};
pub use parser::{ParseOutput, RecordError, SourceError, parse_records};
pub use render::{ViewStyle, render_svg};
pub use theme::Theme;

/// Everything needed to turn records into one rendered view.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
    /// `None` renders the all-brands view.
    pub brand: Option<String>,
    /// Overrides the threshold table.
    pub threshold: Option<u32>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub interaction: InteractionState,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn dark() -> Self {
        let mut options = Self::default();
        options.config.theme = Theme::dark();
        options.config.render.background = options.config.theme.background.clone();
        options
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
            .unwrap_or_else(|| self.config.thresholds.threshold_for(self.brand.as_deref()))
    }
}

#[derive(Debug, Clone)]
pub struct RenderedView {
    pub graph: Graph,
    pub layout: Layout,
    pub threshold: u32,
    pub svg: String,
}

/// Builds, lays out and renders one view from already-parsed records.
pub fn render_view(
    records: &[FormulationRecord],
    options: &RenderOptions,
) -> Result<RenderedView, LayoutError> {
    let config = &options.config;
    let brand = options.brand.as_deref();
    let threshold = options.threshold();
    let width = options.width.unwrap_or(config.render.width);
    let height = options.height.unwrap_or(config.render.height);

    let graph = build_graph(records, brand, threshold);
    let layout = compute_layout(
        &graph,
        NoteCatalog::global().sorted_order(),
        width,
        height,
        &config.layout,
    )?;
    let view = ViewStyle {
        label_font_size: config.layout.label_font_size(brand),
    };
    let svg = render_svg(&layout, &config.theme, &config.render, view, &options.interaction);

    Ok(RenderedView {
        graph,
        layout,
        threshold,
        svg,
    })
}

/// Parses delimited perfume data and renders it to an SVG string.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let parsed = parse_records(input)?;
    let view = render_view(&parsed.records, &options)?;
    Ok(view.svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_threshold_wins_over_table() {
        let options = RenderOptions {
            brand: Some("dior".to_string()),
            threshold: Some(3),
            ..RenderOptions::default()
        };
        assert_eq!(options.threshold(), 3);
        let options = RenderOptions {
            brand: Some("dior".to_string()),
            ..RenderOptions::default()
        };
        assert_eq!(options.threshold(), 22);
    }

    #[test]
    fn render_with_options_produces_svg() {
        let input = "Brand,Top,Middle,Base\ngucci,\"rose, musk\",iris,\n";
        let options = RenderOptions {
            threshold: Some(0),
            ..RenderOptions::dark()
        };
        let svg = render_with_options(input, options).unwrap();
        assert!(svg.contains(">rose</text>"));
        assert!(svg.contains(&Theme::dark().background));
        assert!(svg.contains("font-size=\"14px\""));
    }
}
