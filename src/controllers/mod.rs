//! Flow controllers.
//!
//! Each controller orchestrates one user-triggered sequence of remote calls
//! and the resulting view updates. Calls within a controller are sequential;
//! controllers are independent of each other and mutate disjoint view
//! regions, so one flow failing never corrupts a sibling view.

pub mod auth;
pub mod eda;
pub mod forecast;
pub mod prediction;

pub use auth::{AuthController, Redirect};
pub use eda::EdaController;
pub use forecast::ForecastController;
pub use prediction::PredictionController;
