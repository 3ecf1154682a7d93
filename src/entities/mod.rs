mod layer;
mod spot;

pub use layer::{Layer, RasterOverlay};
pub use spot::{MaxIdRecord, Spot, SpotId, SpotRecord};
