//! The startup configuration for the API-NGR-notify documentation page.

use crate::model::{DocumentSource, Layout, Plugin, Preset, SwaggerUiConfig};

/// Path the notify specification document is served from.
pub const NOTIFY_DOCUMENT_URL: &str = "/assets/api-ngr-notify-1.0.0.yaml";

/// Display name of the notify specification document.
pub const NOTIFY_DOCUMENT_NAME: &str = "API-NGR-notify";

/// Element id the widget mounts into.
pub const DEFAULT_MOUNT_ID: &str = "swagger-ui";

/// Builds the configuration the page hands to the widget once it is ready.
///
/// Construction is pure: there is no validation, no retry and no shared state,
/// so every call yields an equal aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartupConfigurator;

impl StartupConfigurator {
    pub fn new() -> Self {
        Self
    }

    /// Build the configuration aggregate.
    pub fn configure(&self) -> SwaggerUiConfig {
        SwaggerUiConfig {
            sources: vec![DocumentSource::new(NOTIFY_DOCUMENT_URL, NOTIFY_DOCUMENT_NAME)],
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            deep_linking: true,
            presets: vec![Preset::Apis, Preset::Standalone],
            plugins: vec![Plugin::DownloadUrl],
            layout: Layout::Standalone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn offers_single_notify_document() {
        let config = StartupConfigurator::new().configure();

        assert_eq!(
            config.sources(),
            &[DocumentSource {
                url: "/assets/api-ngr-notify-1.0.0.yaml".to_string(),
                name: "API-NGR-notify".to_string(),
            }]
        );
    }

    #[test]
    fn mounts_with_deep_linking() {
        let config = StartupConfigurator::new().configure();

        assert_eq!(config.mount_id(), "swagger-ui");
        assert_eq!(config.mount_selector(), "#swagger-ui");
        assert!(config.deep_linking());
    }

    #[test]
    fn enables_presets_plugins_and_layout() {
        let config = StartupConfigurator::new().configure();

        assert_eq!(config.presets(), &[Preset::Apis, Preset::Standalone]);
        assert_eq!(config.plugins(), &[Plugin::DownloadUrl]);
        assert_eq!(config.layout().as_str(), "StandaloneLayout");
    }

    #[test]
    fn construction_is_idempotent() {
        let configurator = StartupConfigurator::new();

        let first = configurator.configure();
        let second = configurator.configure();

        assert_eq!(first, second);
        assert_eq!(first, StartupConfigurator::default().configure());
    }
}
