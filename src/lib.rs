pub mod config;
pub mod error;
pub mod io;
pub mod performance;
pub mod stack;
pub mod study;
pub mod sweep;
pub mod vehicle;

pub use config::{EngineConstants, SpecificImpulse};
pub use error::ModelError;
pub use study::{evaluate, ConfigurationReport, TradeStudy};
pub use vehicle::{presets, Configuration, ConfigurationBuilder, FirstStage, TradeDesigns};
