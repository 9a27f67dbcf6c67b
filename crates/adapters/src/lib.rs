pub mod fs;
pub mod json;
pub mod presenters;
pub mod settings;
pub mod sink;

pub use fs::{FsImageUploader, SystemClock};
pub use json::{load_config_file, save_config_file};
pub use presenters::{present_panel, EnglishCatalog};
pub use settings::{load_settings_file, PanelSettings};
pub use sink::ChannelConfigSink;
