//! Provider-agnostic irradiance models.

mod coordinates;
mod series;

pub use coordinates::Coordinates;
pub use series::IrradianceSeries;
