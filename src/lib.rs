pub mod json;
pub mod ray;
pub mod render;
pub mod source;
pub mod wall;

// re-export deps for convenience
pub use gnuplot;
pub use nalgebra;
pub use rand;
pub use serde_json;

use core::iter;
use nalgebra::{Unit, Vector2};
use std::error::Error;

use json::{JsonDes, JsonSer};
use ray::Ray;
use source::LightSource;
use wall::Wall;

pub type Float = f64;

/// A 2D point, or a free vector when used as a direction
pub type Point = Vector2<Float>;

pub trait Random {
    /// Generate a randomized instance of this type using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self
    where
        Self: Sized;
}

/// A set of opaque walls lit by point light sources, plus free-standing rays.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    pub walls: Vec<Wall>,
    pub sources: Vec<LightSource>,
    pub rays: Vec<Ray>,
}

impl Scene {
    /// The nearest wall hit of every ray of every light source,
    /// grouped by source, in ray order.
    pub fn cast(&self) -> Vec<Vec<Option<Point>>> {
        self.sources
            .iter()
            .map(|source| source.look(&self.walls))
            .collect()
    }

    /// The nearest wall hit of every free ray, in order.
    pub fn cast_rays(&self) -> Vec<Option<Point>> {
        self.rays
            .iter()
            .map(|ray| ray.closest_hit(&self.walls))
            .collect()
    }

    /// One visibility polygon per light source
    pub fn visibility_polygons(&self) -> Vec<Vec<Point>> {
        self.sources
            .iter()
            .map(|source| source.visibility_polygon(&self.walls))
            .collect()
    }
}

impl Random for Scene {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MIN_NUM_WALLS: usize = 4;
        const MAX_NUM_WALLS: usize = 32;
        const MAX_NUM_SOURCES: usize = 3;
        const MAX_NUM_RAYS: usize = 4;

        let num_walls = rng.gen_range(MIN_NUM_WALLS..=MAX_NUM_WALLS);
        let num_sources = rng.gen_range(1..=MAX_NUM_SOURCES);
        let num_rays = rng.gen_range(0..=MAX_NUM_RAYS);

        Self {
            walls: iter::repeat_with(|| Wall::random(rng))
                .take(num_walls)
                .collect(),
            sources: iter::repeat_with(|| LightSource::random(rng))
                .take(num_sources)
                .collect(),
            rays: iter::repeat_with(|| Ray::random(rng))
                .take(num_rays)
                .collect(),
        }
    }
}

impl JsonDes for Scene {
    /// Deserialize a scene from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "bounds": [800., 600.], // optional, adds the four walls of the canvas
    ///     "walls": [ ... ],       // see `Wall::from_json`
    ///     "sources": [ ... ],     // optional, see `LightSource::from_json`
    ///     "rays": [ ... ],        // optional, see `Ray::from_json`
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let mut walls = Vec::<Wall>::from_json(json.get("walls").ok_or("walls field expected")?)?;

        if let Some(bounds) = json.get("bounds") {
            let size = util::json_point(bounds).ok_or("`bounds` must be an array of two numbers")?;
            walls.extend(Wall::boundary(size.x, size.y));
        }

        let sources = json
            .get("sources")
            .map(Vec::<LightSource>::from_json)
            .transpose()?
            .unwrap_or_default();

        let rays = json
            .get("rays")
            .map(Vec::<Ray>::from_json)
            .transpose()?
            .unwrap_or_default();

        log::debug!(
            "loaded scene: {} walls, {} light sources, {} rays",
            walls.len(),
            sources.len(),
            rays.len(),
        );

        Ok(Self {
            walls,
            sources,
            rays,
        })
    }
}

impl JsonSer for Scene {
    /// Canvas bounds are written out as ordinary walls.
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "walls": self.walls.to_json(),
            "sources": self.sources.to_json(),
            "rays": self.rays.to_json(),
        })
    }
}

pub mod util {
    use super::*;

    /// A point drawn uniformly from the square `[-half_extent, half_extent]²`
    pub fn random_point<T: rand::Rng + ?Sized>(rng: &mut T, half_extent: Float) -> Point {
        let half_extent = half_extent.abs();
        Point::new(
            rng.gen_range(-half_extent..=half_extent),
            rng.gen_range(-half_extent..=half_extent),
        )
    }

    /// A random unit vector
    pub fn random_direction<T: rand::Rng + ?Sized>(rng: &mut T) -> Unit<Point> {
        loop {
            if let Some(v) = Unit::try_new(random_point(rng, 1.0), Float::EPSILON * 8.0) {
                break v;
            }
        }
    }

    /// Reads a `[x, y]` pair of numbers
    pub fn json_point(json: &serde_json::Value) -> Option<Point> {
        match json.as_array()?.as_slice() {
            [x, y] => Some(Point::new(x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }

    /// Reads the field `key` of `json` as a `[x, y]` pair
    pub fn json_point_field(json: &serde_json::Value, key: &str) -> Option<Point> {
        json.get(key).and_then(json_point)
    }

    /// Deserializes every element of a JSON array, failing on the first bad one
    pub fn json_list<T>(
        json: &serde_json::Value,
        parse: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
    ) -> Result<Vec<T>, Box<dyn Error>> {
        let items = json.as_array().ok_or("expected a json array")?;
        items.iter().map(parse).collect()
    }
}
