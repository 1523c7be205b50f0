use std::error::Error;

use super::util;

/// Conversion of scene objects into their JSON representation
pub trait JsonSer {
    fn to_json(&self) -> serde_json::Value;
}

/// A list serializes as a JSON array of its elements
impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        self.iter().map(T::to_json).collect()
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

/// Parsing of scene objects from JSON
pub trait JsonDes {
    /// Fails with a short description of the first missing or invalid field.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        util::json_list(json, T::from_json)
    }
}
