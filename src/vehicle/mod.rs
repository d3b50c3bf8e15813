pub mod configuration;
pub mod stage;

pub use configuration::{presets, Configuration, ConfigurationBuilder, TradeDesigns};
pub use stage::FirstStage;
