mod error;
mod notation;
mod parser;
pub mod surface;
pub mod symbol;
mod types;

use log::debug;

pub use error::StructureError;
pub use notation::parse_document;
pub use parser::{
    bracket_order, parse, parse_classification, Bracket, ALPHABET_SIZE, CLOSING, OPENING,
};
pub use types::*;

use surface::{DrawingSurface, RecordingSurface};
use symbol::{SymbolGeometry, SymbolOptions};

/// Draw the annotation symbol of every pair in `structure` whose partners
/// use different edges.
///
/// `positions[k]` is the center of nucleotide `k`, as computed by an
/// external layout. Same-edge pairs (canonical cWW among them) have no
/// symbol and are skipped. A pair's own [`PairStyle`] overrides the
/// surface color and `opts.thickness`. Returns the number of symbols drawn.
///
/// Every position is checked before anything is drawn, so on error the
/// surface is untouched.
pub fn annotate(
    structure: &AnnotatedStructure,
    positions: &[Point],
    surface: &mut dyn DrawingSurface,
    opts: &SymbolOptions,
) -> Result<usize, StructureError> {
    let mut placed: Vec<(Point, Point, &AnnotatedPair)> = Vec::new();
    for pair in &structure.pairs {
        let c = pair.classification;
        if c.is_same_edge() {
            debug!(
                "skipping {c} pair {}-{}",
                pair.relation.five_prime(),
                pair.relation.three_prime()
            );
            continue;
        }
        let orig = position_of(positions, pair.relation.five_prime())?;
        let dest = position_of(positions, pair.relation.three_prime())?;
        placed.push((orig, dest, pair));
    }

    let default_color = surface.current_color();
    for (orig, dest, pair) in &placed {
        let pair_opts = SymbolOptions {
            thickness: pair.style.thickness.unwrap_or(opts.thickness),
            ..opts.clone()
        };
        let geometry = SymbolGeometry::compute(*orig, *dest, &pair.classification, &pair_opts);
        geometry.render_in(surface, pair.style.color.unwrap_or(default_color));
    }
    Ok(placed.len())
}

fn position_of(positions: &[Point], position: usize) -> Result<Point, StructureError> {
    positions
        .get(position)
        .copied()
        .ok_or(StructureError::MissingPosition { position })
}

/// Parse extended dot-bracket notation, returning the pair list as JSON.
/// Empty string on invalid input.
pub fn pairs_json(structure: &str) -> String {
    parse(structure)
        .ok()
        .and_then(|pairs| serde_json::to_string(&pairs).ok())
        .unwrap_or_default()
}

/// Parse an annotation document, returning it as JSON.
/// Empty string on invalid input.
pub fn document_json(text: &str) -> String {
    parse_document(text)
        .ok()
        .and_then(|s| serde_json::to_string(&s).ok())
        .unwrap_or_default()
}

/// Draw one symbol and return the recorded commands as JSON.
///
/// Empty string on an invalid code or a same-edge classification.
pub fn symbol_json(
    orig: Point,
    dest: Point,
    code: &str,
    opts: &SymbolOptions,
    color: Color,
) -> String {
    let Ok(classification) = parse_classification(code) else {
        return String::new();
    };
    if classification.is_same_edge() || orig == dest {
        return String::new();
    }
    let mut surface = RecordingSurface::with_color(color);
    let geometry = SymbolGeometry::compute(orig, dest, &classification, opts);
    geometry.render(&mut surface);
    serde_json::to_string(&surface.commands).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawCommand;

    fn line_positions(n: usize) -> Vec<Point> {
        (0..n).map(|k| Point::new(k as f64 * 10.0, 0.0)).collect()
    }

    #[test]
    fn test_annotate_skips_same_edge() {
        let s = parse_document("cWW (......)\ncWH .(....).\ntHS ..(..)..").unwrap();
        let mut surface = RecordingSurface::new();
        let drawn = annotate(&s, &line_positions(8), &mut surface, &SymbolOptions::default())
            .unwrap();
        assert_eq!(drawn, 2);
        // three commands per symbol
        assert_eq!(surface.commands.len(), 6);
    }

    #[test]
    fn test_annotate_pair_styles() {
        let doc = "cWH (....). color=#ff0000\ntHW .(..).. thickness=3\ncSW ..()... color=0,0,255";
        let s = parse_document(doc).unwrap();
        let mut surface = RecordingSurface::with_color(Color::rgb(9, 9, 9));
        let drawn = annotate(&s, &line_positions(7), &mut surface, &SymbolOptions::default())
            .unwrap();
        assert_eq!(drawn, 3);

        let inner: Vec<&DrawCommand> = surface.commands.iter().skip(2).step_by(3).collect();
        assert!(matches!(
            inner[0],
            DrawCommand::FillPolygon { color, .. } if *color == Color::rgb(255, 0, 0)
        ));
        // trans pair: outline only, in its own thickness
        assert!(matches!(
            inner[1],
            DrawCommand::DrawCircle { thickness, .. } if *thickness == 3.0
        ));
        assert!(matches!(
            inner[2],
            DrawCommand::FillCircle { color, thickness, .. }
                if *color == Color::rgb(0, 0, 255) && *thickness == 1.0
        ));
        // the surface color is left as it was
        assert_eq!(surface.current_color(), Color::rgb(9, 9, 9));
    }

    #[test]
    fn test_annotate_default_style_uses_surface_color() {
        let s = parse_document("cWH (.)").unwrap();
        let mut surface = RecordingSurface::with_color(Color::rgb(9, 9, 9));
        annotate(&s, &line_positions(3), &mut surface, &SymbolOptions::default()).unwrap();
        assert!(matches!(
            &surface.commands[2],
            DrawCommand::FillPolygon { color, .. } if *color == Color::rgb(9, 9, 9)
        ));
    }

    #[test]
    fn test_annotate_missing_position() {
        let s = parse_document("cWH (....)").unwrap();
        let mut surface = RecordingSurface::new();
        let err = annotate(&s, &line_positions(4), &mut surface, &SymbolOptions::default())
            .unwrap_err();
        assert_eq!(err, StructureError::MissingPosition { position: 5 });
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_pairs_json() {
        assert_eq!(pairs_json("(.)"), r#"[{"i":2,"j":0}]"#);
        assert_eq!(pairs_json("."), "[]");
        assert_eq!(pairs_json("(("), "");
    }

    #[test]
    fn test_symbol_json() {
        let json = symbol_json(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            "tWH",
            &SymbolOptions::default(),
            Color::BLACK,
        );
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let ops: Vec<&str> = v
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["op"].as_str().unwrap())
            .collect();
        assert_eq!(ops, ["fill_circle", "draw_circle", "draw_polygon"]);
    }

    #[test]
    fn test_symbol_json_rejects_bad_input() {
        let o = Point::new(0.0, 0.0);
        let d = Point::new(1.0, 0.0);
        let opts = SymbolOptions::default();
        assert!(symbol_json(o, d, "cWW", &opts, Color::BLACK).is_empty());
        assert!(symbol_json(o, d, "cWX", &opts, Color::BLACK).is_empty());
        assert!(symbol_json(o, o, "cWH", &opts, Color::BLACK).is_empty());
    }
}
