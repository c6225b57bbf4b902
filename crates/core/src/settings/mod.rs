//! Settings module - validated engine configuration.

mod settings_model;

pub use settings_model::CheckInSettings;
