//! Template engine for the hosting page and the widget initializer.

use minijinja::{context, AutoEscape, Environment};
use notify_docs_config::{Preset, SwaggerUiConfig};

/// Context for rendering the hosting page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageContext {
    /// Page title
    pub title: String,
    /// Base URL of the swagger-ui-dist files, without trailing slash
    pub widget_url: String,
    /// Id of the element the widget mounts into
    pub mount_id: String,
    /// Whether the standalone preset script must be loaded
    pub standalone: bool,
    /// Additional scripts loaded after the initializer
    pub extra_scripts: Vec<String>,
}

impl PageContext {
    pub fn new(title: &str, widget_url: &str, ui: &SwaggerUiConfig) -> Self {
        Self {
            title: title.to_string(),
            widget_url: widget_url.trim_end_matches('/').to_string(),
            mount_id: ui.mount_id().to_string(),
            standalone: ui.presets().contains(&Preset::Standalone),
            extra_scripts: vec![],
        }
    }

    /// Add a script tag after the initializer.
    pub fn with_script(mut self, src: impl Into<String>) -> Self {
        self.extra_scripts.push(src.into());
        self
    }
}

/// A document source with its fields pre-encoded as JavaScript string literals.
#[derive(Debug, serde::Serialize)]
struct EncodedSource {
    url: String,
    name: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Initializer values are encoded as JS literals before rendering
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned(
            "swagger-initializer.js".to_string(),
            INITIALIZER_TEMPLATE.to_string(),
        )
        .expect("Failed to add initializer template");

        Self { env }
    }

    /// Render the hosting page.
    pub fn render_page(&self, context: &PageContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &context.title,
            widget_url => &context.widget_url,
            mount_id => &context.mount_id,
            standalone => context.standalone,
            extra_scripts => &context.extra_scripts,
        })
    }

    /// Render the script that hands `ui` to the widget once the page has loaded.
    pub fn render_initializer(&self, ui: &SwaggerUiConfig) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("swagger-initializer.js")?;

        let sources: Vec<EncodedSource> = ui
            .sources()
            .iter()
            .map(|source| EncodedSource {
                url: js_string(&source.url),
                name: js_string(&source.name),
            })
            .collect();

        let presets: Vec<&str> = ui.presets().iter().map(|p| p.js_reference()).collect();
        let plugins: Vec<&str> = ui.plugins().iter().map(|p| p.js_reference()).collect();

        tmpl.render(context! {
            sources => sources,
            dom_id => js_string(&ui.mount_selector()),
            deep_linking => ui.deep_linking(),
            presets => presets,
            plugins => plugins,
            layout => js_string(ui.layout().as_str()),
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a value as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <link rel="stylesheet" type="text/css" href="{{ widget_url|safe }}/swagger-ui.css">
  <link rel="stylesheet" type="text/css" href="index.css">
</head>
<body>
  <div id="{{ mount_id }}"></div>
  <script src="{{ widget_url|safe }}/swagger-ui-bundle.js" charset="UTF-8"></script>
  {% if standalone %}<script src="{{ widget_url|safe }}/swagger-ui-standalone-preset.js" charset="UTF-8"></script>
  {% endif %}<script src="swagger-initializer.js" charset="UTF-8"></script>
  {% for script in extra_scripts %}<script src="{{ script|safe }}"></script>
  {% endfor %}
</body>
</html>
"##;

const INITIALIZER_TEMPLATE: &str = r##"window.onload = function () {
    window.ui = SwaggerUIBundle({
        urls: [
{%- for source in sources %}
            {
                "url": {{ source.url }},
                "name": {{ source.name }}
            }{% if not loop.last %},{% endif %}
{%- endfor %}
        ],
        dom_id: {{ dom_id }},
        deepLinking: {{ deep_linking }},
        presets: [
{%- for preset in presets %}
            {{ preset }}{% if not loop.last %},{% endif %}
{%- endfor %}
        ],
        plugins: [
{%- for plugin in plugins %}
            {{ plugin }}{% if not loop.last %},{% endif %}
{%- endfor %}
        ],
        layout: {{ layout }}
    });
};
"##;
