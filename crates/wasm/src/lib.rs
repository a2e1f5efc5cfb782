use lwdraw_core::symbol::SymbolOptions;
use lwdraw_core::{Color, Point};
use wasm_bindgen::prelude::*;

/// Parse extended dot-bracket notation and return the pairs as JSON.
#[wasm_bindgen]
pub fn parse_pairs(structure: &str) -> String {
    lwdraw_core::pairs_json(structure)
}

/// Parse an annotation document and return it as JSON.
#[wasm_bindgen]
pub fn parse_document(text: &str) -> String {
    lwdraw_core::document_json(text)
}

/// Draw one base-pair symbol and return the drawing commands as JSON.
///
/// `opts_json` is parsed as `SymbolOptions` with `#[serde(default)]`,
/// so any omitted field uses the default value. `color` accepts the same
/// formats as the CLI; an unreadable color falls back to black.
#[wasm_bindgen]
pub fn draw_symbol_with_options(
    code: &str,
    orig_x: f64,
    orig_y: f64,
    dest_x: f64,
    dest_y: f64,
    color: &str,
    opts_json: &str,
) -> String {
    let opts: SymbolOptions = serde_json::from_str(opts_json).unwrap_or_default();
    let color: Color = color.parse().unwrap_or_default();
    lwdraw_core::symbol_json(
        Point::new(orig_x, orig_y),
        Point::new(dest_x, dest_y),
        code,
        &opts,
        color,
    )
}
