use std::sync::mpsc::Sender;

use image_panel_application::{ApplicationError, ConfigSink};
use image_panel_domain::PanelConfig;

/// Forwards outbound configurations to the host loop, which persists them
/// and hands them back to the panel on its next turn.
#[derive(Debug, Clone)]
pub struct ChannelConfigSink {
    sender: Sender<PanelConfig>,
}

impl ChannelConfigSink {
    pub fn new(sender: Sender<PanelConfig>) -> Self {
        Self { sender }
    }
}

impl ConfigSink for ChannelConfigSink {
    fn config_changed(&self, config: &PanelConfig) -> Result<(), ApplicationError> {
        self.sender
            .send(config.clone())
            .map_err(|_| ApplicationError::Host("config receiver dropped".to_string()))
    }
}
