//! Renderers turning a BEMJSON tree into markup or stylesheet text.

mod html;
mod style;

pub use html::HtmlRenderer;
pub use style::{StyleRenderer, StyleSyntax};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::BemNode;

/// Naming and layout conventions shared by all renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub mod_separator: String,
    pub elem_separator: String,
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            mod_separator: settings.mod_separator.clone(),
            elem_separator: settings.elem_separator.clone(),
            indent: settings.indent.clone(),
        }
    }
}

impl RenderOptions {
    /// `block` or `block__elem`.
    pub fn entity_class(&self, block: &str, elem: Option<&str>) -> String {
        match elem {
            Some(elem) => format!("{}{}{}", block, self.elem_separator, elem),
            None => block.to_string(),
        }
    }

    /// `entity--suffix`.
    pub fn modifier_class(&self, entity: &str, suffix: &str) -> String {
        format!("{}{}{}", entity, self.mod_separator, suffix)
    }
}

/// Output side of a conversion.
pub trait Renderer {
    fn render(&self, node: &BemNode) -> ApplicationResult<String>;
}
