//! Attribute store configuration

mod loader;

pub use loader::{
    AttributesConfig, ConfigFormat, ConfigLoader, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH,
};
