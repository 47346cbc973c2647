pub mod settings;

pub use settings::{
    config_path, load_config, load_config_from, save_config_to, Config, TrackerSettings,
};
