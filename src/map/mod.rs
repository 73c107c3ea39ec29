mod geometry;
mod projection;
mod renderer;
mod shape;
mod spatial;

pub use projection::Viewport;
pub use renderer::{DisplaySettings, MapLabel, MapLayers, MapRenderer};
pub use shape::{RegionShape, Ring};
