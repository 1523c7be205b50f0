use nalgebra::Unit;
use std::error::Error;

use super::*;
use crate::render::{Canvas, Draw, Stroke};

/// Length of the segment drawn by [`Ray::show`]
pub const MARKER_LENGTH: Float = 10.0;

/// A light ray, represented as a half-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The starting point of the half-line
    pub origin: Point,
    /// The direction of the half-line
    pub direction: Unit<Point>,
}

impl Ray {
    /// A ray starting at `origin`, heading at `angle` radians from the x axis
    pub fn new(origin: Point, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            origin,
            // SAFETY: cos² + sin² = 1
            direction: Unit::new_unchecked(Point::new(cos, sin)),
        }
    }

    /// Aim the ray at `target`.
    ///
    /// If `target` is the ray's origin there is no direction to aim at: the
    /// current direction is kept and `false` is returned.
    pub fn look_at(&mut self, target: Point) -> bool {
        match Unit::try_new(target - self.origin, 0.0) {
            Some(direction) => {
                self.direction = direction;
                true
            }
            None => {
                log::trace!("cannot aim ray at its own origin {:?}", self.origin);
                false
            }
        }
    }

    /// Get the point at distance `t` (can be negative) from the ray's origin
    pub fn at(&self, t: Float) -> Point {
        self.origin + self.direction.into_inner() * t
    }

    /// The point where this ray crosses `wall`, if any.
    ///
    /// Solves the line-line intersection of the wall's supporting line and
    /// the ray's supporting line. With `t` the parameter along the wall and
    /// `u` the one along the ray, only `0 < t < 1` (wall endpoints excluded)
    /// and `u > 0` (in front of the origin) count as hits.
    ///
    /// Parallel and collinear configurations are detected with an exact
    /// comparison of the determinant against zero. Nearly parallel lines
    /// therefore go through the division and may yield far-away, imprecise
    /// points.
    pub fn cast(&self, wall: &Wall) -> Option<Point> {
        let (x1, y1) = (wall.a.x, wall.a.y);
        let (x2, y2) = (wall.b.x, wall.b.y);

        let tip = self.origin + self.direction.as_ref();
        let (x3, y3) = (self.origin.x, self.origin.y);
        let (x4, y4) = (tip.x, tip.y);

        let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if den == 0.0 {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / den;
        let u = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / den;

        (t > 0.0 && t < 1.0 && u > 0.0).then(|| wall.at(t))
    }

    /// The hit closest to the ray's origin among all `walls`
    pub fn closest_hit(&self, walls: &[Wall]) -> Option<Point> {
        walls
            .iter()
            .filter_map(|wall| self.cast(wall))
            .map(|pt| ((pt - self.origin).norm_squared(), pt))
            .min_by(|(d1, _), (d2, _)| d1.total_cmp(d2))
            .map(|(_, pt)| pt)
    }

    /// Draw a short marker from the origin along the direction
    pub fn show(&self, canvas: &mut (impl Canvas + ?Sized)) {
        canvas.line(self.origin, self.at(MARKER_LENGTH), Stroke::Ray);
    }
}

impl Draw for Ray {
    fn draw(&self, canvas: &mut dyn Canvas) {
        self.show(canvas)
    }
}

impl JsonSer for Ray {
    /// Serialize a ray into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "origin": self.origin.as_slice(),
            "direction": self.direction.as_ref().as_slice(),
        })
    }
}

impl JsonDes for Ray {
    /// Deserialize a new ray from a JSON object.
    ///
    /// The JSON object must follow one of the following formats:
    ///
    /// ```json
    /// {
    ///     "origin": [9., 8.],
    ///     "angle": 1.57, // radians
    /// }
    /// ```
    ///
    /// ```json
    /// {
    ///     "origin": [9., 8.],
    ///     "direction": [9., 8.], // must have at least one non-zero value
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let origin = json.get("origin").ok_or("Missing ray origin")?;
        let origin = util::json_point(origin).ok_or("Invalid ray origin")?;

        if let Some(angle) = json.get("angle") {
            let angle = angle
                .as_f64()
                .ok_or("Invalid ray angle (not a number)")?;
            return Ok(Self::new(origin, angle));
        }

        let direction = json
            .get("direction")
            .ok_or("Missing ray direction or angle")?;
        let direction = util::json_point(direction).ok_or("Invalid ray direction")?;

        let direction =
            Unit::try_new(direction, Float::EPSILON).ok_or("Unable to normalize ray direction")?;

        Ok(Self { origin, direction })
    }
}

impl Random for Ray {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self {
            origin: util::random_point(rng, 7.0),
            direction: util::random_direction(rng),
        }
    }
}
