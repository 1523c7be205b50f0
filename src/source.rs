use core::f64::consts::TAU;
use std::error::Error;

use super::*;
use crate::render::{Canvas, Draw};

/// Angular offset of the two extra rays aimed beside every wall endpoint,
/// so light slips past corners onto whatever lies behind them.
const CORNER_OFFSET: Float = 1e-5;

/// A point light emitting a fan of rays evenly spread over a full turn
#[derive(Clone, Debug, PartialEq)]
pub struct LightSource {
    position: Point,
    rays: Vec<Ray>,
}

impl LightSource {
    pub const DEFAULT_RAY_COUNT: usize = 360;
    /// Upper limit on `ray_count` accepted from JSON
    pub const MAX_RAY_COUNT: usize = 1 << 16;

    pub fn new(position: Point, ray_count: usize) -> Self {
        let step = TAU / ray_count as Float;
        Self {
            position,
            rays: (0..ray_count)
                .map(|i| Ray::new(position, i as Float * step))
                .collect(),
        }
    }

    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Move the source and all of its rays, keeping their directions
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
        for ray in &mut self.rays {
            ray.origin = position;
        }
    }

    /// The nearest hit of each ray, in ray order
    pub fn look(&self, walls: &[Wall]) -> Vec<Option<Point>> {
        self.rays.iter().map(|ray| ray.closest_hit(walls)).collect()
    }

    /// The corners of the region lit by this source, sorted by angle around it.
    ///
    /// Rather than sampling the fan, a ray is aimed at each wall endpoint and
    /// at both sides of it.
    pub fn visibility_polygon(&self, walls: &[Wall]) -> Vec<Point> {
        let mut points = Vec::with_capacity(walls.len() * 6);

        for endpoint in walls.iter().flat_map(Wall::endpoints) {
            let mut ray = Ray::new(self.position, 0.);
            if !ray.look_at(endpoint) {
                continue;
            }

            let angle = ray.direction.y.atan2(ray.direction.x);
            let aims = [
                ray,
                Ray::new(self.position, angle - CORNER_OFFSET),
                Ray::new(self.position, angle + CORNER_OFFSET),
            ];

            points.extend(aims.iter().filter_map(|ray| ray.closest_hit(walls)));
        }

        let angle_of = |pt: &Point| {
            let v = pt - self.position;
            v.y.atan2(v.x)
        };
        points.sort_by(|p, q| angle_of(p).total_cmp(&angle_of(q)));

        log::trace!(
            "visibility polygon of {:?}: {} points",
            self.position,
            points.len()
        );

        points
    }
}

impl Draw for LightSource {
    fn draw(&self, canvas: &mut dyn Canvas) {
        self.rays.iter().for_each(|ray| ray.show(canvas));
    }
}

impl JsonSer for LightSource {
    /// Serialize a light source into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.position.as_slice(),
            "ray_count": self.rays.len(),
        })
    }
}

impl JsonDes for LightSource {
    /// Deserialize a new light source from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "position": [1., 2.],
    ///     "ray_count": 360, // optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let position = util::json_point_field(json, "position")
            .ok_or("Missing or invalid light source position")?;

        let ray_count = match json.get("ray_count") {
            Some(count) => {
                let count = count
                    .as_u64()
                    .ok_or("`ray_count` must be a non-negative integer")?;
                usize::try_from(count)
                    .ok()
                    .filter(|&count| count <= Self::MAX_RAY_COUNT)
                    .ok_or("`ray_count` is too large")?
            }
            None => Self::DEFAULT_RAY_COUNT,
        };

        Ok(Self::new(position, ray_count))
    }
}

impl Random for LightSource {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self::new(util::random_point(rng, 9.0), Self::DEFAULT_RAY_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_rays_point_along_axes() {
        let source = LightSource::new(Point::new(1., 1.), 4);
        let expected = [[1., 0.], [0., 1.], [-1., 0.], [0., -1.]];

        assert_eq!(source.rays().len(), 4);
        for (ray, dir) in source.rays().iter().zip(expected) {
            assert_eq!(ray.origin, Point::new(1., 1.));
            assert!((ray.direction.into_inner() - Point::from(dir)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_no_rays() {
        let source = LightSource::new(Point::new(0., 0.), 0);
        assert!(source.rays().is_empty());
        assert!(source.look(&Wall::boundary(10., 10.)).is_empty());
    }

    #[test]
    fn test_move_to_keeps_directions() {
        let mut source = LightSource::new(Point::new(0., 0.), 12);
        let before: Vec<_> = source.rays().iter().map(|ray| ray.direction).collect();

        source.move_to(Point::new(5., -3.));

        assert_eq!(*source.position(), Point::new(5., -3.));
        for (ray, dir) in source.rays().iter().zip(before) {
            assert_eq!(ray.origin, Point::new(5., -3.));
            assert_eq!(ray.direction, dir);
        }
    }

    #[test]
    fn test_look_inside_box() {
        let source = LightSource::new(Point::new(5., 2.), 4);
        let hits = source.look(&Wall::boundary(10., 10.));
        let expected = [[10., 2.], [5., 10.], [0., 2.], [5., 0.]];

        assert_eq!(hits.len(), 4);
        for (hit, pt) in hits.iter().zip(expected) {
            let hit = hit.expect("every ray must hit the box");
            assert!((hit - Point::from(pt)).norm() < 1e-9);
        }
    }

    #[test]
    fn test_look_with_shadow() {
        // a wall between the source and the right side of the box
        let mut walls = Wall::boundary(10., 10.).to_vec();
        walls.push(Wall::new([7., 0.5].into(), [7., 9.5].into()));

        let source = LightSource::new(Point::new(5., 5.), 4);
        let right = source.look(&walls)[0].expect("the ray must hit the inner wall");
        assert!((right - Point::new(7., 5.)).norm() < 1e-9);
    }

    #[test]
    fn test_visibility_polygon_in_square() {
        let walls = Wall::boundary(100., 100.);
        let source = LightSource::new(Point::new(50., 50.), 0);

        let polygon = source.visibility_polygon(&walls);

        // every corner is aimed at twice (once per wall), the beside-rays always hit
        assert!((16..=24).contains(&polygon.len()));

        for pt in &polygon {
            assert!(
                walls
                    .iter()
                    .flat_map(Wall::endpoints)
                    .any(|corner| (corner - pt).norm() < 1e-2),
                "{pt:?} is not near a corner",
            );
        }

        let angles: Vec<_> = polygon
            .iter()
            .map(|pt| (pt.y - 50.).atan2(pt.x - 50.))
            .collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_visibility_polygon_skips_endpoint_at_source() {
        let mut walls = Wall::boundary(10., 10.).to_vec();
        walls.push(Wall::new([5., 5.].into(), [6., 5.].into()));

        let source = LightSource::new(Point::new(5., 5.), 0);
        let polygon = source.visibility_polygon(&walls);
        assert!(!polygon.is_empty());
        assert!(polygon.iter().all(|pt| *pt != Point::new(5., 5.)));
    }

    #[test]
    fn test_json_to_source() {
        let source = LightSource::from_json(&json!({ "position": [1., 2.] })).unwrap();
        assert_eq!(*source.position(), Point::new(1., 2.));
        assert_eq!(source.rays().len(), LightSource::DEFAULT_RAY_COUNT);

        let source =
            LightSource::from_json(&json!({ "position": [1., 2.], "ray_count": 8 })).unwrap();
        assert_eq!(source.rays().len(), 8);
        assert_eq!(LightSource::from_json(&source.to_json()).unwrap(), source);

        assert!(LightSource::from_json(&json!({ "ray_count": 8 })).is_err());
        assert!(LightSource::from_json(&json!({ "position": [1., 2.], "ray_count": -1 })).is_err());
    }

    #[test]
    fn test_json_ray_count_limit() {
        let max = LightSource::MAX_RAY_COUNT;
        let source =
            LightSource::from_json(&json!({ "position": [0., 0.], "ray_count": max })).unwrap();
        assert_eq!(source.rays().len(), max);

        for count in [max as u64 + 1, u64::MAX] {
            assert!(
                LightSource::from_json(&json!({ "position": [0., 0.], "ray_count": count }))
                    .is_err()
            );
        }
    }
}
