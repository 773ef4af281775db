//! Domain types: AQI severity bands and prediction inputs.

pub mod aqi;
pub mod features;

pub use aqi::{category_color, AqiCategory, NEUTRAL_COLOR};
pub use features::FeatureSet;
