//! Configuration aggregate handed to the Swagger UI widget.

use serde::{Deserialize, Serialize};

/// A named OpenAPI document the widget can fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    /// Path or URL of the specification document
    pub url: String,

    /// Label shown in the widget's document selector
    pub name: String,
}

impl DocumentSource {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// Capability presets shipped with the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Core API rendering (`SwaggerUIBundle.presets.apis`)
    Apis,

    /// Top bar and document selector (`SwaggerUIStandalonePreset`)
    Standalone,
}

impl Preset {
    /// JavaScript expression referencing the preset in the widget bundle.
    pub fn js_reference(self) -> &'static str {
        match self {
            Preset::Apis => "SwaggerUIBundle.presets.apis",
            Preset::Standalone => "SwaggerUIStandalonePreset",
        }
    }
}

/// Extension plugins shipped with the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plugin {
    /// Loads documents from the `urls` list and the top bar's URL field
    DownloadUrl,
}

impl Plugin {
    /// JavaScript expression referencing the plugin in the widget bundle.
    pub fn js_reference(self) -> &'static str {
        match self {
            Plugin::DownloadUrl => "SwaggerUIBundle.plugins.DownloadUrl",
        }
    }
}

/// Layout modes the widget knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Full page layout with the top bar (requires the standalone preset)
    #[default]
    #[serde(rename = "StandaloneLayout")]
    Standalone,

    /// Bare operations list
    #[serde(rename = "BaseLayout")]
    Base,
}

impl Layout {
    /// Name of the layout component as the widget expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Standalone => "StandaloneLayout",
            Layout::Base => "BaseLayout",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full configuration passed to the widget constructor.
///
/// Built once at startup and never mutated afterwards, so it only exposes
/// read accessors. `sources` always holds at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwaggerUiConfig {
    pub(crate) sources: Vec<DocumentSource>,
    pub(crate) mount_id: String,
    pub(crate) deep_linking: bool,
    pub(crate) presets: Vec<Preset>,
    pub(crate) plugins: Vec<Plugin>,
    pub(crate) layout: Layout,
}

impl SwaggerUiConfig {
    /// Documents offered by the widget, in selector order.
    pub fn sources(&self) -> &[DocumentSource] {
        &self.sources
    }

    /// Id of the element the widget renders into.
    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// CSS selector for the mount element (`#swagger-ui`).
    pub fn mount_selector(&self) -> String {
        format!("#{}", self.mount_id)
    }

    /// Whether operations get URL fragments for direct linking.
    pub fn deep_linking(&self) -> bool {
        self.deep_linking
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }
}
