// src/debug/visualization/svg.rs
use crate::{
    math::types::{Bounds2D, Point},
    model::{DiagramListener, DiagramModel},
};
use bevy::log::debug;
use svg::{
    Document,
    node::element::{Circle, Polygon, Rectangle, Style},
};

/// Was in die Debug-SVG gezeichnet wird
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Breite und Höhe der SVG in Pixeln
    pub pixel_size: f64,
    pub show_cells: bool,
    pub show_triangles: bool,
    /// Index eines Delaunay-Dreiecks, das samt Umkreis hervorgehoben wird
    pub highlight_triangle: Option<usize>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            pixel_size: 800.0,
            show_cells: true,
            show_triangles: true,
            highlight_triangle: None,
        }
    }
}

// ===================================================================================
// HILFS-STRUCT für die SVG-Erstellung
// ===================================================================================
/// Sammelt die Elemente und rechnet Strichstärken relativ zur ViewBox.
struct SvgBuilder {
    document: Document,
    stroke_w_normal: f64,
    stroke_w_thin: f64,
    point_radius: f64,
}

impl SvgBuilder {
    fn new(display_bounds: &Bounds2D, pixel_size: f64) -> Self {
        let extent = (display_bounds.width() + display_bounds.height()) / 2.0;
        let stroke_w_normal = extent * 0.005;
        let stroke_w_thin = extent * 0.002;
        let point_radius = extent * 0.008;

        let style = Style::new(format!(
            r#"
    .background {{ fill: #f0f0f0; }}
    .clip-bounds {{ fill: none; stroke: #888888; stroke-width: {stroke_w_thin}; stroke-dasharray: 2,2; }}
    .voronoi-cell {{ fill-opacity: 0.45; stroke: #333333; stroke-width: {stroke_w_normal}; }}
    .delaunay-triangle {{ fill: none; stroke: #0000cc; stroke-width: {stroke_w_thin}; }}
    .highlight-triangle {{ fill: rgba(255, 120, 0, 0.3); stroke: #cc5500; stroke-width: {stroke_w_normal}; }}
    .circumcircle {{ fill: none; stroke: #cc5500; stroke-width: {stroke_w_thin}; stroke-dasharray: 4,2; }}
    .kernel {{ stroke: #000000; stroke-width: {stroke_w_thin}; }}
"#
        ));

        let document = Document::new()
            .set("width", pixel_size)
            .set("height", pixel_size)
            .set(
                "viewBox",
                (
                    display_bounds.min.x,
                    display_bounds.min.y,
                    display_bounds.width(),
                    display_bounds.height(),
                ),
            )
            .add(style)
            .add(rect(display_bounds, "background"));

        Self {
            document,
            stroke_w_normal,
            stroke_w_thin,
            point_radius,
        }
    }

    fn draw_polygon(&mut self, vertices: &[Point], class: &str, fill: Option<&str>) {
        if vertices.len() < 2 {
            return;
        }
        let points: Vec<String> = vertices
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect();
        let mut polygon = Polygon::new()
            .set("points", points.join(" "))
            .set("class", class);
        if let Some(fill) = fill {
            polygon = polygon.set("fill", fill);
        }
        self.add(polygon);
    }

    fn draw_circle(&mut self, center: Point, radius: f64, class: &str, fill: Option<&str>) {
        let mut circle = Circle::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("r", radius)
            .set("class", class);
        if let Some(fill) = fill {
            circle = circle.set("fill", fill);
        }
        self.add(circle);
    }

    fn draw_rect(&mut self, bounds: &Bounds2D, class: &str) {
        self.add(rect(bounds, class));
    }

    fn add<N: Into<Box<dyn svg::Node>>>(&mut self, node: N) {
        // Document::add nimmt self by value
        let document = std::mem::replace(&mut self.document, Document::new());
        self.document = document.add(node);
    }

    fn finish(self) -> Document {
        debug!(
            "Debug SVG built (stroke {:.3}/{:.3})",
            self.stroke_w_normal, self.stroke_w_thin
        );
        self.document
    }
}

fn rect(bounds: &Bounds2D, class: &str) -> Rectangle {
    Rectangle::new()
        .set("x", bounds.min.x)
        .set("y", bounds.min.y)
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("class", class)
}

/// Zeichenfläche: das Clip-Rechteck, ersatzweise die Kernel, ersatzweise eine Einheitsbox
fn display_bounds<L: ?Sized + DiagramListener>(model: &DiagramModel<L>) -> Bounds2D {
    if let Some(clip) = model.clip_rectangle() {
        return clip.bounds();
    }
    Bounds2D::from_points_iter(model.kernel_positions())
        .map(|b| b.expand(b.width().max(b.height()) * 0.1 + 1.0))
        .unwrap_or_else(|| Bounds2D::from_points(Point::new(0.0, 0.0), Point::new(1.0, 1.0)))
}

/// Rendert ein Diagramm als SVG-Dokument im Speicher.
///
/// Zellen werden in der Farbe ihres Kernels gefüllt. Mit `highlight_triangle`
/// wird ein Delaunay-Dreieck samt Umkreis markiert.
pub fn diagram_to_svg<L: ?Sized + DiagramListener>(
    model: &DiagramModel<L>,
    options: &SvgOptions,
) -> Document {
    let bounds = display_bounds(model);
    let mut svg = SvgBuilder::new(&bounds, options.pixel_size);

    if let Some(clip) = model.clip_rectangle() {
        svg.draw_rect(&clip.bounds(), "clip-bounds");
    }

    if options.show_cells {
        for (cell, kernel) in model.voronoi_mesh().faces().zip(model.kernels()) {
            let fill = kernel.color.to_hex();
            svg.draw_polygon(&cell, "voronoi-cell", Some(fill.as_str()));
        }
    }

    if options.show_triangles {
        for triangle in model.delaunay_mesh().triangles() {
            svg.draw_polygon(&triangle.vertices(), "delaunay-triangle", None);
        }
    }

    if let Some((triangle, center, radius)) = options
        .highlight_triangle
        .and_then(|i| model.circumcircle_of_triangle(i))
    {
        svg.draw_polygon(&triangle.vertices(), "highlight-triangle", None);
        svg.draw_circle(center, radius, "circumcircle", None);
    }

    let kernel_radius = svg.point_radius;
    for kernel in model.kernels() {
        svg.draw_circle(
            kernel.position,
            kernel_radius,
            "kernel",
            Some(kernel.color.to_hex().as_str()),
        );
    }

    svg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiagramConfig;

    fn model() -> DiagramModel {
        let mut model = DiagramModel::new(
            DiagramConfig::new()
                .with_clip_size(10.0, 10.0)
                .with_color_seed(11),
        )
        .unwrap();
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)] {
            model.insert(x, y).unwrap();
        }
        model
    }

    #[test]
    fn test_svg_contains_cells_triangles_and_kernels() {
        let text = diagram_to_svg(&model(), &SvgOptions::default()).to_string();
        assert_eq!(text.matches("class=\"voronoi-cell\"").count(), 3);
        assert_eq!(text.matches("class=\"delaunay-triangle\"").count(), 1);
        assert_eq!(text.matches("class=\"kernel\"").count(), 3);
        assert!(text.contains("viewBox=\"0 0 10 10\""));
    }

    #[test]
    fn test_highlight_draws_circumcircle() {
        let options = SvgOptions {
            highlight_triangle: Some(0),
            show_cells: false,
            ..SvgOptions::default()
        };
        let text = diagram_to_svg(&model(), &options).to_string();
        assert_eq!(text.matches("class=\"circumcircle\"").count(), 1);
        assert_eq!(text.matches("class=\"voronoi-cell\"").count(), 0);

        let missing = SvgOptions {
            highlight_triangle: Some(5),
            ..SvgOptions::default()
        };
        let text = diagram_to_svg(&model(), &missing).to_string();
        assert!(!text.contains("class=\"circumcircle\""));
    }
}
