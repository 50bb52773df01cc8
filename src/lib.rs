pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{ApiSettings, FoursquareInvoker};
pub use config::VenuesConfig;
pub use crate::core::venues::VenuesClient;
pub use domain::model::{ApiRequest, Coordinate, ParamValue, Params, ResponseKeys};
pub use domain::ports::ApiInvoker;
pub use utils::error::{Result, VenuesError};
