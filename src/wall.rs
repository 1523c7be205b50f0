use std::error::Error;

use super::*;
use crate::render::{Canvas, Draw, Stroke};

/// An opaque segment light can't go through
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub a: Point,
    pub b: Point,
}

impl Wall {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// The point at parameter `t` along the wall: `a` for `t = 0`, `b` for `t = 1`
    pub fn at(&self, t: Float) -> Point {
        let (x1, y1) = (self.a.x, self.a.y);
        let (x2, y2) = (self.b.x, self.b.y);
        Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
    }

    pub fn length(&self) -> Float {
        (self.b - self.a).norm()
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.a, self.b]
    }

    /// The four edges of the `width` by `height` canvas whose corner is at the origin,
    /// counter-clockwise
    pub fn boundary(width: Float, height: Float) -> [Self; 4] {
        let corners = [
            Point::new(0., 0.),
            Point::new(width, 0.),
            Point::new(width, height),
            Point::new(0., height),
        ];
        core::array::from_fn(|i| Self::new(corners[i], corners[(i + 1) % corners.len()]))
    }
}

impl Draw for Wall {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.line(self.a, self.b, Stroke::Wall);
    }
}

impl JsonSer for Wall {
    /// Serialize a wall into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "a": self.a.as_slice(),
            "b": self.b.as_slice(),
        })
    }
}

impl JsonDes for Wall {
    /// Deserialize a new wall from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "a": [1., 2.],
    ///     "b": [3., 4.],
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let a = util::json_point_field(json, "a").ok_or("Missing or invalid wall endpoint a")?;
        let b = util::json_point_field(json, "b").ok_or("Missing or invalid wall endpoint b")?;

        Ok(Self { a, b })
    }
}

impl Random for Wall {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self {
            a: util::random_point(rng, 10.0),
            b: util::random_point(rng, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boundary_is_closed() {
        let walls = Wall::boundary(800., 600.);
        for (wall, next) in walls.iter().zip(walls.iter().cycle().skip(1)) {
            assert_eq!(wall.b, next.a);
        }
        let perimeter: Float = walls.iter().map(Wall::length).sum();
        assert_eq!(perimeter, 2800.);
    }

    #[test]
    fn test_at() {
        let wall = Wall::new([1., 1.].into(), [3., 5.].into());
        assert_eq!(wall.at(0.), wall.a);
        assert_eq!(wall.at(1.), wall.b);
        assert_eq!(wall.at(0.5), Point::new(2., 3.));
    }

    #[test]
    fn test_json_to_wall() {
        let wall = Wall::from_json(&json!({
            "a": [1., 2.],
            "b": [3., 4.],
        }))
        .unwrap();
        assert_eq!(wall.endpoints(), [Point::new(1., 2.), Point::new(3., 4.)]);
        assert_eq!(Wall::from_json(&wall.to_json()).unwrap(), wall);
    }

    #[test]
    fn test_invalid_json_wall() {
        assert!(Wall::from_json(&json!({ "a": [1., 2.] })).is_err());
        assert!(Wall::from_json(&json!({ "a": [1., 2.], "b": [3., 4., 5.] })).is_err());
        assert!(Wall::from_json(&json!({ "a": [1., 2.], "b": ["3", 4.] })).is_err());
    }
}
