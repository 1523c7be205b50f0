use super::*;

pub mod gnuplot;

/// What a line stands for, so surfaces can style it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stroke {
    Wall,
    /// The short marker drawn by [`Ray::show`]
    Ray,
    /// From a light's origin to the point it hits
    Light,
    /// An edge of a visibility polygon
    Polygon,
}

impl Stroke {
    pub fn color(self) -> &'static str {
        match self {
            Stroke::Wall => "black",
            Stroke::Ray => "red",
            Stroke::Light => "#c0e0a000",
            Stroke::Polygon => "orange",
        }
    }
}

/// A drawing surface
pub trait Canvas {
    /// Stroke a straight line between two points
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);
}

pub type Line = (Point, Point, Stroke);

/// Records the lines instead of drawing them
impl Canvas for Vec<Line> {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push((from, to, stroke));
    }
}

pub trait Draw {
    fn draw(&self, canvas: &mut dyn Canvas);
}

impl<T: Draw> Draw for [T] {
    fn draw(&self, canvas: &mut dyn Canvas) {
        self.iter().for_each(|item| item.draw(canvas))
    }
}

impl Draw for Scene {
    /// Walls, then the light of every source up to its hits, then every free ray
    fn draw(&self, canvas: &mut dyn Canvas) {
        self.walls.draw(canvas);

        for (source, hits) in self.sources.iter().zip(self.cast()) {
            for hit in hits.into_iter().flatten() {
                canvas.line(*source.position(), hit, Stroke::Light);
            }
        }

        for (ray, hit) in self.rays.iter().zip(self.cast_rays()) {
            if let Some(hit) = hit {
                canvas.line(ray.origin, hit, Stroke::Light);
            }
            ray.show(canvas);
        }
    }
}

/// Strokes the closed outline of `polygon`
pub fn draw_polygon(polygon: &[Point], canvas: &mut dyn Canvas) {
    for (i, pt) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        canvas.line(*pt, next, Stroke::Polygon);
    }
}
