//! Conversion service
//!
//! Routes selected text through the converter registered for its
//! (source, target) format pair. This is the host boundary: `convert` never
//! returns an error, it reports failures through the notifier instead.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::render::{
    HtmlRenderer, RenderOptions, Renderer, StyleRenderer, StyleSyntax,
};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    BemNode, DomainError, ExpansionReport, Format, NodeArena, NumberExpander, TreeBuilder,
    TreeSanitizer,
};
use crate::infrastructure::traits::Notifier;

/// Warning shown when multiplicity expansion stops early.
pub const TOO_MANY_NODES: &str = "Too many nodes! Try to simplify your code.";

/// Converts source text into target text.
pub type ConverterFn = fn(&ConversionService, &str, Format) -> ApplicationResult<String>;

/// Explicit table of supported (source, target) pairs.
#[derive(Default)]
pub struct ConverterTable {
    converters: HashMap<(Format, Format), ConverterFn>,
}

impl ConverterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter; a pair can only be registered once.
    pub fn register(&mut self, from: Format, to: Format, converter: ConverterFn) -> ApplicationResult<()> {
        if self.converters.insert((from, to), converter).is_some() {
            return Err(ApplicationError::InvalidConverterTable {
                message: format!("{} -> {} registered twice", from, to),
            });
        }
        Ok(())
    }

    /// Every source with converters must also convert to its default target.
    pub fn validate(&self) -> ApplicationResult<()> {
        for from in Format::ALL {
            let has_any = self.converters.keys().any(|(source, _)| *source == from);
            if !has_any {
                continue;
            }
            match from.default_target() {
                Some(to) if self.converters.contains_key(&(from, to)) => {}
                Some(to) => {
                    return Err(ApplicationError::InvalidConverterTable {
                        message: format!("{} has converters but none for its default {}", from, to),
                    })
                }
                None => {
                    return Err(ApplicationError::InvalidConverterTable {
                        message: format!("{} is an output-only format", from),
                    })
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, from: Format, to: Format) -> Option<ConverterFn> {
        self.converters.get(&(from, to)).copied()
    }

    /// Registered pairs, sorted.
    pub fn pairs(&self) -> Vec<(Format, Format)> {
        let mut pairs: Vec<_> = self.converters.keys().copied().collect();
        pairs.sort();
        pairs
    }

    /// The converters bemtools ships with, validated.
    pub fn standard() -> ApplicationResult<Self> {
        let mut table = Self::new();
        for to in [Format::Json, Format::Html, Format::Scss, Format::Css] {
            table.register(Format::Pseudocode, to, pseudocode_to_target)?;
        }
        for to in [Format::Html, Format::Scss, Format::Css] {
            table.register(Format::Json, to, json_to_target)?;
        }
        table.validate()?;
        Ok(table)
    }
}

fn pseudocode_to_target(svc: &ConversionService, text: &str, to: Format) -> ApplicationResult<String> {
    let node = svc.pseudocode_to_bem(text)?;
    svc.render(&node, to)
}

fn json_to_target(svc: &ConversionService, text: &str, to: Format) -> ApplicationResult<String> {
    let node = svc.json_to_bem(text)?;
    svc.render(&node, to)
}

/// What to convert; unset formats are detected or defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionRequest {
    pub from: Option<Format>,
    pub to: Option<Format>,
}

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub from: Format,
    pub to: Format,
    pub output: String,
}

/// Service converting between shorthand, BEMJSON, HTML and stylesheets.
pub struct ConversionService {
    settings: Arc<Settings>,
    notifier: Arc<dyn Notifier>,
    table: ConverterTable,
}

impl ConversionService {
    /// Create a new conversion service with the standard converter table.
    pub fn new(settings: Arc<Settings>, notifier: Arc<dyn Notifier>) -> ApplicationResult<Self> {
        Ok(Self {
            settings,
            notifier,
            table: ConverterTable::standard()?,
        })
    }

    pub fn table(&self) -> &ConverterTable {
        &self.table
    }

    /// Convert and report; `None` means no output was produced.
    #[instrument(level = "debug", skip(self, text))]
    pub fn convert(&self, text: &str, request: ConversionRequest) -> Option<Conversion> {
        match self.try_convert(text, request) {
            Ok(conversion) => Some(conversion),
            Err(e) => {
                warn!("conversion failed: {}", e);
                self.notifier.error(&e.to_string());
                None
            }
        }
    }

    /// Convert, returning failures to the caller.
    pub fn try_convert(&self, text: &str, request: ConversionRequest) -> ApplicationResult<Conversion> {
        let from = request
            .from
            .or_else(|| Format::detect(text))
            .ok_or(ApplicationError::NoSelection)?;
        let to = request.to.or_else(|| from.default_target()).unwrap_or(from);
        debug!("convert {} -> {}", from, to);

        let converter = self
            .table
            .get(from, to)
            .ok_or(ApplicationError::UnsupportedConversion { from, to })?;
        let output = converter(self, text, to)?;

        self.notifier.info(&format!(
            "{} code has been generated.",
            to.as_str().to_uppercase()
        ));
        Ok(Conversion { from, to, output })
    }

    /// Build and expand the shorthand tree, reporting an expansion overrun.
    #[instrument(level = "debug", skip(self, text))]
    pub fn parse_tree(&self, text: &str) -> ApplicationResult<(NodeArena, ExpansionReport)> {
        let builder = TreeBuilder::new(&self.settings.default_tag, self.settings.max_depth);
        let mut arena = builder.build(text)?;

        let expander = NumberExpander::new(
            self.settings.expansion,
            self.settings.loop_limit,
            self.settings.max_nodes,
        );
        let report = expander.expand(&mut arena);
        if !report.is_complete() {
            self.notifier.warning(TOO_MANY_NODES);
        }
        debug!(
            "expanded in {} steps, {} nodes added",
            report.steps, report.nodes_added
        );
        Ok((arena, report))
    }

    /// Shorthand → sanitized BEMJSON tree.
    pub fn pseudocode_to_bem(&self, text: &str) -> ApplicationResult<BemNode> {
        let (arena, _) = self.parse_tree(text)?;
        let raw = arena.to_raw_value(self.settings.max_depth)?;
        let clean = TreeSanitizer::new(self.settings.max_depth).clean(raw)?;
        Ok(BemNode::from_value(clean)?)
    }

    /// BEMJSON text → sanitized BEMJSON tree.
    pub fn json_to_bem(&self, text: &str) -> ApplicationResult<BemNode> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DomainError::InvalidJson(e.to_string()))?;
        let clean = TreeSanitizer::new(self.settings.max_depth).clean(value)?;
        Ok(BemNode::from_value(clean)?)
    }

    fn render(&self, node: &BemNode, to: Format) -> ApplicationResult<String> {
        let options = RenderOptions::from(self.settings.as_ref());
        let output = match to {
            Format::Html => HtmlRenderer::new(options).render(node)?,
            Format::Scss => StyleRenderer::new(StyleSyntax::Scss, options).render(node)?,
            Format::Css => StyleRenderer::new(StyleSyntax::Css, options).render(node)?,
            Format::Json => node.to_pretty_json()?,
            Format::Pseudocode => {
                return Err(ApplicationError::UnsupportedConversion {
                    from: Format::Json,
                    to,
                })
            }
        };
        if output.trim().is_empty() {
            return Err(ApplicationError::Render {
                target: to,
                message: "nothing to render".to_string(),
            });
        }
        Ok(output)
    }
}
