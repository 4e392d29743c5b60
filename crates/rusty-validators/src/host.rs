// File: src/host.rs
// Purpose: Collaborators handed to every validator instance

use crate::config::Config;
use crate::files::{FileResolver, UploadStore};
use crate::registry::PluginRegistry;
use crate::sniff::{ContentSniffer, MagicSniffer};
use std::sync::Arc;

/// Everything a validator may need from its host
///
/// Cheap to clone; each validator keeps its own copy.
#[derive(Clone)]
pub struct HostContext {
    pub registry: Arc<PluginRegistry>,
    pub sniffer: Arc<dyn ContentSniffer>,
    pub files: Arc<dyn FileResolver>,
    pub config: Arc<Config>,
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

impl HostContext {
    /// Host with the magic-number sniffer and a directory upload store
    pub fn new(registry: Arc<PluginRegistry>, config: Config) -> Self {
        let files = UploadStore::from_config(&config.uploads);

        Self {
            registry,
            sniffer: Arc::new(MagicSniffer::new()),
            files: Arc::new(files),
            config: Arc::new(config),
        }
    }

    pub fn with_sniffer(mut self, sniffer: impl ContentSniffer + 'static) -> Self {
        self.sniffer = Arc::new(sniffer);
        self
    }

    pub fn with_files(mut self, files: impl FileResolver + 'static) -> Self {
        self.files = Arc::new(files);
        self
    }

    /// Default text for a missing mandatory value
    pub fn missing_value_message(&self) -> &str {
        &self.config.messages.missing_value
    }
}
