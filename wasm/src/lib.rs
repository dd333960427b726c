use perfume_note_graph::{HighlightCategory, InteractionState, RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteGraphRenderOptions {
    theme: Option<String>,
    brand: Option<String>,
    threshold: Option<u32>,
    width: Option<f64>,
    height: Option<f64>,
    highlight_category: Option<String>,
    hover: Option<String>,
    select: Option<String>,
}

fn build_render_options(options: NoteGraphRenderOptions) -> Result<RenderOptions, String> {
    let mut render_options = if options.theme.as_deref() == Some("dark") {
        RenderOptions::dark()
    } else {
        RenderOptions::classic()
    };

    let category = match options.highlight_category.as_deref() {
        Some(raw) => raw
            .parse::<HighlightCategory>()
            .map_err(|error| error.to_string())?,
        None => HighlightCategory::None,
    };
    render_options.interaction = InteractionState {
        highlighted: options.hover,
        selected: options.select,
        category,
    };

    // Brand views default to the smaller canvas.
    if options.brand.is_some() {
        render_options.width = Some(render_options.config.render.brand_width);
        render_options.height = Some(render_options.config.render.brand_height);
    }
    if options.width.is_some() {
        render_options.width = options.width;
    }
    if options.height.is_some() {
        render_options.height = options.height;
    }
    render_options.brand = options.brand;
    render_options.threshold = options.threshold;

    Ok(render_options)
}

#[wasm_bindgen]
pub fn render_note_graph_svg(csv: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<NoteGraphRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        NoteGraphRenderOptions::default()
    };

    let render_options = build_render_options(options).map_err(|error| JsValue::from_str(&error))?;
    render_with_options(csv, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
