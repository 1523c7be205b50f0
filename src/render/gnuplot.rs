use ::gnuplot::{Axes2D, AxesCommon, Caption, Color, Figure, Fix, PointSymbol};

use super::*;

/// Draws on the 2D axes of a gnuplot figure
pub struct GnuplotCanvas<'a> {
    axes: &'a mut Axes2D,
}

impl<'a> GnuplotCanvas<'a> {
    pub fn new(axes: &'a mut Axes2D) -> Self {
        Self { axes }
    }
}

impl Canvas for GnuplotCanvas<'_> {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.axes.lines(
            [from.x, to.x],
            [from.y, to.y],
            &[Color(stroke.color().into())],
        );
    }
}

/// Plot the scene: its walls, the light of every source, every free ray,
/// and the visibility polygon of each source.
pub fn render_gnu_plot(fg: &mut Figure, scene: &Scene) {
    let ax = fg.axes2d();
    ax.set_aspect_ratio(Fix(1.0));

    let mut canvas = GnuplotCanvas::new(ax);
    scene.draw(&mut canvas);
    for polygon in scene.visibility_polygons() {
        draw_polygon(&polygon, &mut canvas);
    }

    let (x, y): (Vec<_>, Vec<_>) = scene
        .sources
        .iter()
        .map(|source| (source.position().x, source.position().y))
        .unzip();
    canvas.axes.points(
        x,
        y,
        &[
            Caption("Light source"),
            PointSymbol('O'),
            Color("goldenrod".into()),
        ],
    );
}
