use crate::config::{Config, load_config, positive};
use crate::interaction::{HighlightCategory, InteractionState};
use crate::ir::FormulationRecord;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_records;
use crate::render::write_output_svg;
use crate::{RenderOptions, RenderedView, render_view};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "notegraph",
    version,
    about = "Radial co-occurrence graph of perfume notes"
)]
pub struct Args {
    /// Input CSV with Brand, Top, Middle and Base columns, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width (defaults to the config value)
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height (defaults to the config value)
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Only use records of this brand (exact match)
    #[arg(short = 'b', long = "brand")]
    pub brand: Option<String>,

    /// Minimum link weight, exclusive. Overrides the brand threshold table.
    #[arg(short = 't', long = "threshold")]
    pub threshold: Option<u32>,

    /// Emphasize one role group of notes
    #[arg(long = "highlight-category", default_value = "none")]
    pub highlight_category: HighlightCategory,

    /// Render as if the pointer hovered this note
    #[arg(long = "hover")]
    pub hover: Option<String>,

    /// Render with this note selected
    #[arg(long = "select")]
    pub select: Option<String>,

    /// Write the all-brands view plus one view per configured brand into DIR
    #[arg(
        long = "all-brands",
        value_name = "DIR",
        conflicts_with_all = ["brand", "threshold", "output", "dump_layout"]
    )]
    pub all_brands: Option<PathBuf>,

    /// Write the positioned nodes, links and labels as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    let width = args.width.map(|w| positive("width", w)).transpose()?;
    let height = args.height.map(|h| positive("height", h)).transpose()?;

    let input = read_input(args.input.as_deref())?;
    let parsed = parse_records(&input)?;
    if !parsed.skipped.is_empty() {
        warn!(
            skipped = parsed.skipped.len(),
            kept = parsed.records.len(),
            "some records could not be parsed"
        );
    }

    let interaction = InteractionState {
        highlighted: args.hover.clone(),
        selected: args.select.clone(),
        category: args.highlight_category,
    };

    if let Some(dir) = args.all_brands.as_deref() {
        // Explicit sizes apply to the overview; brand views keep their own canvas.
        if let Some(width) = width {
            config.render.width = width;
        }
        if let Some(height) = height {
            config.render.height = height;
        }
        return render_all_brands(&parsed.records, config, interaction, dir, args.output_format);
    }

    let (width, height) = view_canvas(&config, args.brand.as_deref(), width, height);
    config.render.width = width;
    config.render.height = height;
    let options = RenderOptions {
        config,
        brand: args.brand.clone(),
        threshold: args.threshold,
        width: Some(width),
        height: Some(height),
        interaction,
    };
    let view = render_and_log(&parsed.records, &options)?;

    if let Some(path) = args.dump_layout.as_deref() {
        let dump = LayoutDump::from_layout(
            &view.layout,
            options.brand.as_deref(),
            view.threshold,
            &options.interaction,
        );
        write_layout_dump(path, &dump)?;
    }

    match args.output_format {
        OutputFormat::Svg => write_output_svg(&view.svg, args.output.as_deref()),
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&view.svg, &output, &options.config)
        }
    }
}

/// Canvas for a single view: brand views default to the brand canvas,
/// the overview to the main one. Explicit sizes always win.
fn view_canvas(
    config: &Config,
    brand: Option<&str>,
    width: Option<f64>,
    height: Option<f64>,
) -> (f64, f64) {
    let (default_width, default_height) = match brand {
        Some(_) => (config.render.brand_width, config.render.brand_height),
        None => (config.render.width, config.render.height),
    };
    (width.unwrap_or(default_width), height.unwrap_or(default_height))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("perfume_note_graph=info"));
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn render_and_log(records: &[FormulationRecord], options: &RenderOptions) -> Result<RenderedView> {
    let view = render_view(records, options)?;
    info!(
        brand = options.brand.as_deref().unwrap_or("all"),
        threshold = view.threshold,
        nodes = view.graph.nodes.len(),
        links = view.graph.links.len(),
        "rendered view"
    );
    Ok(view)
}

fn render_all_brands(
    records: &[FormulationRecord],
    config: Config,
    interaction: InteractionState,
    dir: &Path,
    format: OutputFormat,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut views = vec![(None, config.render.width, config.render.height)];
    views.extend(
        config
            .thresholds
            .brand_names()
            .map(|brand| (Some(brand.to_string()), config.render.brand_width, config.render.brand_height)),
    );

    for (brand, width, height) in views {
        let options = RenderOptions {
            config: config.clone(),
            brand,
            threshold: None,
            width: Some(width),
            height: Some(height),
            interaction: interaction.clone(),
        };
        let view = render_and_log(records, &options)?;
        let path = dir.join(view_file_name(options.brand.as_deref(), format));
        match format {
            OutputFormat::Svg => write_output_svg(&view.svg, Some(&path))?,
            OutputFormat::Png => {
                let mut render_cfg = options.config.clone();
                render_cfg.render.width = width;
                render_cfg.render.height = height;
                write_png(&view.svg, &path, &render_cfg)?
            }
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn view_file_name(brand: Option<&str>, format: OutputFormat) -> String {
    let stem = match brand {
        Some(brand) => brand
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect::<String>(),
        None => "all-brands".to_string(),
    };
    format!("{}.{}", stem, format.extension())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_flags() {
        let args = Args::try_parse_from([
            "notegraph",
            "-i",
            "perfumes.csv",
            "-b",
            "dior",
            "--highlight-category",
            "base",
            "--hover",
            "rose",
            "-w",
            "500",
        ])
        .unwrap();
        assert_eq!(args.brand.as_deref(), Some("dior"));
        assert_eq!(args.highlight_category, HighlightCategory::Base);
        assert_eq!(args.hover.as_deref(), Some("rose"));
        assert_eq!(args.width, Some(500.0));
        assert_eq!(args.output_format, OutputFormat::Svg);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Args::try_parse_from(["notegraph", "--highlight-category", "heart"]).is_err());
    }

    #[test]
    fn all_brands_rejects_single_view_flags() {
        for flag in [
            ["-b", "dior"],
            ["-t", "3"],
            ["-o", "out.svg"],
            ["--dump-layout", "layout.json"],
        ] {
            let result = Args::try_parse_from(["notegraph", "--all-brands", "out", flag[0], flag[1]]);
            assert!(result.is_err(), "{} should conflict with --all-brands", flag[0]);
        }
        assert!(Args::try_parse_from(["notegraph", "--all-brands", "out", "-w", "900"]).is_ok());
    }

    #[test]
    fn brand_views_default_to_the_brand_canvas() {
        let config = Config::default();
        assert_eq!(view_canvas(&config, Some("dior"), None, None), (500.0, 500.0));
        assert_eq!(view_canvas(&config, None, None, None), (800.0, 800.0));
        assert_eq!(view_canvas(&config, Some("dior"), Some(640.0), None), (640.0, 500.0));
    }

    #[test]
    fn view_file_names_are_filesystem_safe() {
        assert_eq!(view_file_name(None, OutputFormat::Svg), "all-brands.svg");
        assert_eq!(
            view_file_name(Some("yves-saint-laurent"), OutputFormat::Png),
            "yves-saint-laurent.png"
        );
        assert_eq!(view_file_name(Some("a/b c"), OutputFormat::Svg), "a_b_c.svg");
    }

    #[test]
    fn all_brands_writes_one_file_per_view() {
        let dir = std::env::temp_dir().join(format!("notegraph-all-{}", std::process::id()));
        let records = vec![FormulationRecord::new("dior", "bergamot, lemon", "rose", ""); 3];
        render_all_brands(
            &records,
            Config::default(),
            InteractionState::default(),
            &dir,
            OutputFormat::Svg,
        )
        .unwrap();
        assert!(dir.join("all-brands.svg").exists());
        assert!(dir.join("dior.svg").exists());
        assert!(dir.join("jo-malone-london.svg").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
