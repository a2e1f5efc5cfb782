use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StructureError;

/// Molecular face of a nucleotide taking part in a pairing interaction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    WatsonCrick,
    Hoogsteen,
    Sugar,
}

impl Edge {
    /// Single-letter code as used in `cWH`-style annotations.
    pub fn letter(self) -> char {
        match self {
            Edge::WatsonCrick => 'W',
            Edge::Hoogsteen => 'H',
            Edge::Sugar => 'S',
        }
    }
}

/// Relative orientation of the two interacting bases.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stericity {
    Cis,
    Trans,
}

impl Stericity {
    pub fn letter(self) -> char {
        match self {
            Stericity::Cis => 'c',
            Stericity::Trans => 't',
        }
    }
}

/// Leontis-Westhof classification of one base pair.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BasePairClassification {
    pub edge5: Edge,
    pub edge3: Edge,
    pub stericity: Stericity,
}

impl BasePairClassification {
    pub fn new(edge5: Edge, edge3: Edge, stericity: Stericity) -> Self {
        Self {
            edge5,
            edge3,
            stericity,
        }
    }

    /// Both partners interact through the same edge (e.g. canonical cWW).
    /// Such pairs have no annotation symbol.
    pub fn is_same_edge(&self) -> bool {
        self.edge5 == self.edge3
    }

    pub fn is_cis(&self) -> bool {
        self.stericity == Stericity::Cis
    }
}

impl fmt::Display for BasePairClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.stericity.letter(),
            self.edge5.letter(),
            self.edge3.letter()
        )
    }
}

impl FromStr for BasePairClassification {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_classification(s)
    }
}

/// A matched bracket pair.
///
/// `i` is the position of the closing bracket and `j` the position of the
/// opener it closes, so `i > j` always holds for parser output.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PairRelation {
    pub i: usize,
    pub j: usize,
}

impl PairRelation {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Position closer to the 5' end.
    pub fn five_prime(&self) -> usize {
        self.i.min(self.j)
    }

    /// Position closer to the 3' end.
    pub fn three_prime(&self) -> usize {
        self.i.max(self.j)
    }
}

/// 2D point in drawing-surface coordinates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rotate around the origin by `angle` radians.
    pub fn rotate(self, angle: f64) -> Point {
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        Point::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    pub fn translate(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

impl FromStr for Point {
    type Err = String;

    /// Parse `x,y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
        let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
        let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
        Ok(Point::new(x, y))
    }
}

/// Opaque RGB color handed to the drawing surface.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#RRGGBB`, `#RGB`, `R,G,B` and a few color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Color::BLACK),
            "white" => return Ok(Color::WHITE),
            "red" => return Ok(Color::rgb(255, 0, 0)),
            "green" => return Ok(Color::rgb(0, 255, 0)),
            "blue" => return Ok(Color::rgb(0, 0, 255)),
            _ => {}
        }

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(format!("unknown color format: {s:?}"));
            }
            let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|e| format!("{s:?}: {e}"));
            return match hex.len() {
                6 => Ok(Color::rgb(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                // #RGB expands each digit: #f80 == #ff8800
                3 => Ok(Color::rgb(
                    channel(&hex[0..1])? * 17,
                    channel(&hex[1..2])? * 17,
                    channel(&hex[2..3])? * 17,
                )),
                _ => Err(format!("unknown color format: {s:?}")),
            };
        }

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let channel = |p: &str| p.trim().parse::<u8>().map_err(|e| format!("{s:?}: {e}"));
            return Ok(Color::rgb(
                channel(parts[0])?,
                channel(parts[1])?,
                channel(parts[2])?,
            ));
        }

        Err(format!("unknown color format: {s:?}"))
    }
}

/// Per-pair overrides of the symbol style. Unset fields fall back to the
/// surface color and the shared `SymbolOptions`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PairStyle {
    pub color: Option<Color>,
    pub thickness: Option<f64>,
}

/// A pair relation together with its classification.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AnnotatedPair {
    pub relation: PairRelation,
    pub classification: BasePairClassification,
    #[serde(default)]
    pub style: PairStyle,
}

/// Result of reading an annotation document: an optional sequence and
/// every classified pair, in document order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AnnotatedStructure {
    pub sequence: Option<String>,
    pub pairs: Vec<AnnotatedPair>,
}
