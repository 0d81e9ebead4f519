//! Indented HTML output with BEM class names.

use serde_json::Value;
use tracing::instrument;

use crate::application::render::{RenderOptions, Renderer};
use crate::application::ApplicationResult;
use crate::domain::bemjson::modifier_suffixes;
use crate::domain::{BemNode, Content, ContentItem};

const DEFAULT_TAG: &str = "div";
const VOID_TAGS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn render_node(&self, node: &BemNode, context: Option<&str>, level: usize, out: &mut Vec<String>) {
        let indent = self.options.indent.repeat(level);
        let tag = node.tag.as_deref().unwrap_or(DEFAULT_TAG);
        let block = node.resolve_block(context);
        let open = format!("<{}{}>", tag, self.attributes(node, block));

        if VOID_TAGS.contains(&tag) {
            out.push(format!("{}{}", indent, open));
            return;
        }

        match &node.content {
            None => out.push(format!("{}{}</{}>", indent, open, tag)),
            Some(Content::Items(items)) if items.is_empty() => {
                out.push(format!("{}{}</{}>", indent, open, tag))
            }
            Some(Content::Text(text)) => {
                out.push(format!("{}{}{}</{}>", indent, open, escape_text(text), tag))
            }
            Some(Content::Node(child)) => {
                out.push(format!("{}{}", indent, open));
                self.render_node(child, block, level + 1, out);
                out.push(format!("{}</{}>", indent, tag));
            }
            Some(Content::Items(items)) => {
                out.push(format!("{}{}", indent, open));
                let child_indent = self.options.indent.repeat(level + 1);
                for item in items {
                    match item {
                        ContentItem::Text(text) => {
                            out.push(format!("{}{}", child_indent, escape_text(text)))
                        }
                        ContentItem::Node(child) => self.render_node(child, block, level + 1, out),
                    }
                }
                out.push(format!("{}</{}>", indent, tag));
            }
        }
    }

    /// Class list followed by `attrs`, each with a leading space.
    fn attributes(&self, node: &BemNode, block: Option<&str>) -> String {
        let mut classes = Vec::new();
        match (block, node.elem.as_deref()) {
            (Some(block), Some(elem)) => {
                let entity = self.options.entity_class(block, Some(elem));
                for suffix in modifier_suffixes(&node.elem_mods) {
                    classes.push(self.options.modifier_class(&entity, &suffix));
                }
                classes.insert(0, entity);
            }
            (None, Some(elem)) => classes.push(elem.to_string()),
            (Some(block), None) if node.block.is_some() => {
                for suffix in modifier_suffixes(&node.mods) {
                    classes.push(self.options.modifier_class(block, &suffix));
                }
                classes.insert(0, block.to_string());
            }
            _ => {}
        }
        if let Some(cls) = node.cls.as_deref().filter(|c| !c.trim().is_empty()) {
            classes.push(cls.trim().to_string());
        }

        let mut attrs = String::new();
        if !classes.is_empty() {
            attrs.push_str(&format!(" class=\"{}\"", escape_attr(&classes.join(" "))));
        }
        for (name, value) in &node.attrs {
            match value {
                Value::Bool(true) => attrs.push_str(&format!(" {}", name)),
                Value::String(s) => attrs.push_str(&format!(" {}=\"{}\"", name, escape_attr(s))),
                Value::Number(n) => attrs.push_str(&format!(" {}=\"{}\"", name, n)),
                _ => {}
            }
        }
        attrs
    }
}

impl Renderer for HtmlRenderer {
    #[instrument(level = "debug", skip_all)]
    fn render(&self, node: &BemNode) -> ApplicationResult<String> {
        let mut lines = Vec::new();
        self.render_node(node, None, 0, &mut lines);
        let mut html = lines.join("\n");
        html.push('\n');
        Ok(html)
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
