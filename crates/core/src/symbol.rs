use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::surface::DrawingSurface;
use crate::types::{BasePairClassification, Color, Edge, Point};

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Options controlling symbol size and style.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SymbolOptions {
    /// Stroke width of every outline (default: 1.0)
    pub thickness: f64,
    /// Diameter of the reference circle; squares and triangles get the same
    /// area (default: 10.0)
    pub circle_diameter: f64,
    /// For Sugar/Watson-Crick and Sugar/Hoogsteen pairs: if true the
    /// triangle is big and outer, if false it is inscribed and points the
    /// other way (default: true)
    pub sugar_triangle_outer: bool,
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            circle_diameter: 10.0,
            sugar_triangle_outer: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    /// Shape encoding an edge.
    pub fn for_edge(edge: Edge) -> Shape {
        match edge {
            Edge::WatsonCrick => Shape::Circle,
            Edge::Hoogsteen => Shape::Square,
            Edge::Sugar => Shape::Triangle,
        }
    }
}

/// Which shape is drawn outside, which inside, and whether the bond
/// direction is flipped before orienting the symbol.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolKind {
    pub outer: Shape,
    pub inner: Shape,
    pub reversed: bool,
}

/// Map an edge combination to its nested-shape symbol.
///
/// The 5' edge gives the outer shape and the 3' edge the inner one. When
/// `sugar_triangle_outer` is false, Sugar/WC and Sugar/Hoogsteen swap to a
/// small inner triangle with the anchors reversed, so the triangle still
/// points from the sugar-edge partner.
///
/// # Panics
///
/// If both edges are equal: same-edge pairs have no symbol.
pub fn symbol_kind(edge5: Edge, edge3: Edge, sugar_triangle_outer: bool) -> SymbolKind {
    assert_ne!(edge5, edge3, "same-edge pairs have no annotation symbol");

    if edge5 == Edge::Sugar && !sugar_triangle_outer {
        return SymbolKind {
            outer: Shape::for_edge(edge3),
            inner: Shape::Triangle,
            reversed: true,
        };
    }
    SymbolKind {
        outer: Shape::for_edge(edge5),
        inner: Shape::for_edge(edge3),
        reversed: false,
    }
}

/// Base sizes giving a circle, a square and an equilateral triangle the
/// same area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSizes {
    pub radius: f64,
    pub square_side: f64,
    pub triangle_side: f64,
}

impl UnitSizes {
    pub fn from_diameter(circle_diameter: f64) -> Self {
        let radius = circle_diameter / 2.0;
        Self {
            radius,
            square_side: PI.sqrt() * radius,
            triangle_side: 2.0 * (PI / 3f64.sqrt()).sqrt() * radius,
        }
    }
}

/// A circle or a closed polygon.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Primitive {
    Circle { center: Point, radius: f64 },
    Polygon { points: Vec<Point> },
}

impl Primitive {
    /// Rotate around the origin, then translate.
    fn transform(self, angle: f64, offset: Point) -> Primitive {
        let place = |p: Point| p.rotate(angle).translate(offset);
        match self {
            Primitive::Circle { center, radius } => Primitive::Circle {
                center: place(center),
                radius,
            },
            Primitive::Polygon { points } => Primitive::Polygon {
                points: points.into_iter().map(place).collect(),
            },
        }
    }

    fn fill(&self, surface: &mut dyn DrawingSurface, thickness: f64, color: Color) {
        match self {
            Primitive::Circle { center, radius } => {
                surface.fill_circle(*center, *radius, thickness, color)
            }
            Primitive::Polygon { points } => surface.fill_polygon(points, color),
        }
    }

    fn stroke(&self, surface: &mut dyn DrawingSurface, thickness: f64) {
        match self {
            Primitive::Circle { center, radius } => {
                surface.draw_circle(*center, *radius, thickness)
            }
            Primitive::Polygon { points } => surface.draw_polygon(points, thickness),
        }
    }
}

/// Placed shapes of one base-pair symbol.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SymbolGeometry {
    pub kind: SymbolKind,
    pub center: Point,
    pub angle: f64,
    pub thickness: f64,
    pub outer: Primitive,
    pub inner: Primitive,
    /// Inner shape is filled (cis) rather than outlined (trans)
    pub filled: bool,
}

impl SymbolGeometry {
    /// Lay out the symbol for a pair whose nucleotides sit at `orig` and
    /// `dest`. The symbol is centered on their midpoint with its local
    /// x-axis along `orig -> dest`.
    ///
    /// `orig` and `dest` must differ; the bond direction is undefined
    /// otherwise.
    ///
    /// # Panics
    ///
    /// If the classification has the same edge on both sides.
    pub fn compute(
        orig: Point,
        dest: Point,
        classification: &BasePairClassification,
        opts: &SymbolOptions,
    ) -> SymbolGeometry {
        debug_assert!(orig != dest, "symbol anchors must be distinct points");

        let kind = symbol_kind(
            classification.edge5,
            classification.edge3,
            opts.sugar_triangle_outer,
        );
        let (from, to) = if kind.reversed {
            (dest, orig)
        } else {
            (orig, dest)
        };
        let center = orig.midpoint(dest);
        let angle = rotation_angle(from, to);
        let filled = classification.is_cis();
        let sizes = UnitSizes::from_diameter(opts.circle_diameter);

        let (outer, inner) = nested_shapes(kind, sizes, opts.thickness, filled);

        SymbolGeometry {
            kind,
            center,
            angle,
            thickness: opts.thickness,
            outer: outer.transform(angle, center),
            inner: inner.transform(angle, center),
            filled,
        }
    }

    /// Issue the drawing commands: outer shape painted white and outlined,
    /// then the inner shape filled (cis) or outlined (trans) in the
    /// surface's current color.
    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        let color = surface.current_color();
        self.render_in(surface, color);
    }

    /// Like [`render`](Self::render), filling a cis inner shape with `color`.
    pub fn render_in(&self, surface: &mut dyn DrawingSurface, color: Color) {
        self.outer.fill(surface, self.thickness, Color::WHITE);
        self.outer.stroke(surface, self.thickness);

        if self.filled {
            self.inner.fill(surface, self.thickness, color);
        } else {
            self.inner.stroke(surface, self.thickness);
        }
    }
}

/// Compute and draw the annotation symbol of one base pair.
pub fn draw_symbol(
    surface: &mut dyn DrawingSurface,
    orig: Point,
    dest: Point,
    classification: &BasePairClassification,
    opts: &SymbolOptions,
) -> SymbolGeometry {
    let geometry = SymbolGeometry::compute(orig, dest, classification, opts);
    geometry.render(surface);
    geometry
}

/// Angle between the x-axis and the vector `orig -> dest`.
pub fn rotation_angle(orig: Point, dest: Point) -> f64 {
    (dest.y - orig.y).atan2(dest.x - orig.x)
}

/// Outer and inner shapes in local coordinates, centered on the origin.
///
/// Inner shapes shrink by the stroke thickness when outlined so the two
/// outlines never touch; outer shapes grow by 1.5 thicknesses around the
/// inner one.
fn nested_shapes(
    kind: SymbolKind,
    sizes: UnitSizes,
    t: f64,
    filled: bool,
) -> (Primitive, Primitive) {
    match (kind.outer, kind.inner) {
        (Shape::Circle, Shape::Square) => {
            let side = sizes.square_side;
            let radius = side * SQRT_2 / 2.0 + 1.5 * t;
            let inner_side = if filled { side } else { side - t };
            (
                circle(radius),
                rectangle(-inner_side / 2.0, inner_side / 2.0, inner_side / 2.0),
            )
        }
        (Shape::Circle, Shape::Triangle) => {
            let side = sizes.triangle_side;
            let height = side * 3f64.sqrt() / 2.0;
            let radius = 2.0 * height / 3.0 + 1.5 * t;
            let inner_side = if filled { side } else { side - t };
            (circle(radius), triangle(inner_side, 0.0))
        }
        (Shape::Square, Shape::Circle) => {
            let radius = sizes.radius;
            let side = 2.0 * radius + 3.0 * t;
            let inner_radius = if filled { radius } else { radius - t };
            (
                rectangle(-side / 2.0, side / 2.0, side / 2.0),
                circle(inner_radius),
            )
        }
        (Shape::Square, Shape::Triangle) => {
            let triangle_side = sizes.triangle_side;
            let side = triangle_side + 3.0 * t;
            let inner_side = if filled {
                triangle_side
            } else {
                triangle_side - 2.0 * t
            };
            (
                rectangle(-side / 2.0, side / 2.0, side / 2.0),
                triangle(inner_side, -t),
            )
        }
        (Shape::Triangle, Shape::Circle) => {
            let radius = sizes.radius;
            let height = 3.0 * radius;
            let side = 2.0 * height / 3f64.sqrt();
            let inner_radius = if filled { radius } else { radius - t };
            (triangle(side, 0.0), circle(inner_radius))
        }
        (Shape::Triangle, Shape::Square) => {
            // largest square inscribed in an equilateral triangle
            let square_side = sizes.square_side;
            let side = square_side * (2.0 + 3f64.sqrt()) / 3f64.sqrt();
            let base = -(side * 3f64.sqrt() / 2.0) / 3.0;
            let inner_side = if filled {
                square_side
            } else {
                square_side - t
            };
            (
                triangle(side, 0.0),
                rectangle(base + t, base + inner_side, inner_side / 2.0),
            )
        }
        (outer, inner) => panic!("no nested symbol for {inner:?} in {outer:?}"),
    }
}

fn circle(radius: f64) -> Primitive {
    Primitive::Circle {
        center: Point::new(0.0, 0.0),
        radius,
    }
}

/// Axis-aligned rectangle spanning `x_min..x_max` and `-half_height..half_height`.
fn rectangle(x_min: f64, x_max: f64, half_height: f64) -> Primitive {
    Primitive::Polygon {
        points: vec![
            Point::new(x_min, -half_height),
            Point::new(x_min, half_height),
            Point::new(x_max, half_height),
            Point::new(x_max, -half_height),
        ],
    }
}

/// Equilateral triangle pointing along +x with its centroid at `(shift, 0)`.
fn triangle(side: f64, shift: f64) -> Primitive {
    let height = side * 3f64.sqrt() / 2.0;
    Primitive::Polygon {
        points: vec![
            Point::new(-height / 3.0 + shift, -side / 2.0),
            Point::new(-height / 3.0 + shift, side / 2.0),
            Point::new(2.0 * height / 3.0 + shift, 0.0),
        ],
    }
}
