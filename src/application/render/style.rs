//! Stylesheet skeletons: one empty rule per BEM entity and modifier.

use itertools::Itertools;
use tracing::instrument;

use crate::application::render::{RenderOptions, Renderer};
use crate::application::ApplicationResult;
use crate::domain::bemjson::modifier_suffixes;
use crate::domain::BemNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSyntax {
    /// Nested rules with `&` parent references
    Scss,
    /// Flat selectors
    Css,
}

#[derive(Debug, Default)]
struct ElemRule {
    name: String,
    mods: Vec<String>,
}

#[derive(Debug, Default)]
struct BlockRule {
    name: String,
    mods: Vec<String>,
    elems: Vec<ElemRule>,
}

fn push_unique(list: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}

pub struct StyleRenderer {
    syntax: StyleSyntax,
    options: RenderOptions,
}

impl StyleRenderer {
    pub fn new(syntax: StyleSyntax, options: RenderOptions) -> Self {
        Self { syntax, options }
    }

    /// Gather entities in first-appearance order.
    fn collect(node: &BemNode, context: Option<&str>, rules: &mut Vec<BlockRule>) {
        let block = node.resolve_block(context);

        if let Some(block_name) = block {
            let position = match rules.iter().position(|r| r.name == block_name) {
                Some(position) => position,
                None => {
                    rules.push(BlockRule {
                        name: block_name.to_string(),
                        ..Default::default()
                    });
                    rules.len() - 1
                }
            };
            let rule = &mut rules[position];

            match node.elem.as_deref() {
                Some(elem_name) => {
                    let elem_position = match rule.elems.iter().position(|e| e.name == elem_name) {
                        Some(position) => position,
                        None => {
                            rule.elems.push(ElemRule {
                                name: elem_name.to_string(),
                                ..Default::default()
                            });
                            rule.elems.len() - 1
                        }
                    };
                    push_unique(
                        &mut rule.elems[elem_position].mods,
                        modifier_suffixes(&node.elem_mods),
                    );
                }
                None if node.block.is_some() => {
                    push_unique(&mut rule.mods, modifier_suffixes(&node.mods));
                }
                None => {}
            }
        }

        for child in node.child_nodes() {
            Self::collect(child, block, rules);
        }
    }

    fn render_scss(&self, rules: &[BlockRule]) -> String {
        let indent = &self.options.indent;
        let elem_indent = indent.repeat(2);
        let mod_rule = |pad: &str, suffix: &str| {
            format!("{pad}&{}{suffix} {{\n{pad}}}\n", self.options.mod_separator)
        };

        rules
            .iter()
            .map(|rule| {
                let mut out = format!(".{} {{\n", rule.name);
                for suffix in &rule.mods {
                    out.push_str(&mod_rule(indent, suffix));
                }
                for elem in &rule.elems {
                    out.push_str(&format!(
                        "{indent}&{}{} {{\n",
                        self.options.elem_separator, elem.name
                    ));
                    for suffix in &elem.mods {
                        out.push_str(&mod_rule(&elem_indent, suffix));
                    }
                    out.push_str(&format!("{indent}}}\n"));
                }
                out.push_str("}\n");
                out
            })
            .join("\n")
    }

    fn render_css(&self, rules: &[BlockRule]) -> String {
        let mut selectors = Vec::new();
        for rule in rules {
            selectors.push(rule.name.clone());
            for suffix in &rule.mods {
                selectors.push(self.options.modifier_class(&rule.name, suffix));
            }
            for elem in &rule.elems {
                let entity = self.options.entity_class(&rule.name, Some(elem.name.as_str()));
                selectors.push(entity.clone());
                for suffix in &elem.mods {
                    selectors.push(self.options.modifier_class(&entity, suffix));
                }
            }
        }
        selectors
            .iter()
            .map(|selector| format!(".{} {{\n}}\n", selector))
            .join("\n")
    }
}

impl Renderer for StyleRenderer {
    #[instrument(level = "debug", skip_all, fields(syntax = ?self.syntax))]
    fn render(&self, node: &BemNode) -> ApplicationResult<String> {
        let mut rules = Vec::new();
        Self::collect(node, None, &mut rules);
        Ok(match self.syntax {
            StyleSyntax::Scss => self.render_scss(&rules),
            StyleSyntax::Css => self.render_css(&rules),
        })
    }
}
