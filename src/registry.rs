//! Tool registry: name → descriptor, in registration order
//!
//! Built once at startup and shared read-only afterwards.

use std::collections::HashMap;

use rmcp::model::{ListToolsResult, Tool};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tool_definitions::{SPACE_ALIASES, ToolDefaults, ToolDescriptor, get_all_tools};
use crate::tool_generator::generate_tool_registration;

#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full catalog: each canonical tool followed by its "space" alias, if any
    pub fn with_catalog(defaults: &ToolDefaults) -> Result<Self> {
        let mut registry = Self::new();

        for tool in get_all_tools(defaults) {
            let canonical = tool.name;
            registry.register(tool)?;

            for &(alias, _) in SPACE_ALIASES.iter().filter(|(_, target)| *target == canonical) {
                registry.register_alias(alias, canonical)?;
            }
        }

        debug!(tools = registry.tools.len(), "Tool catalog registered");
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        if self.index.contains_key(descriptor.name) {
            return Err(Error::DuplicateTool(descriptor.name.to_string()));
        }

        self.index.insert(descriptor.name, self.tools.len());
        self.tools.push(descriptor);
        Ok(())
    }

    /// Register `alias` as an independent copy of `canonical`
    pub fn register_alias(&mut self, alias: &'static str, canonical: &str) -> Result<()> {
        let source = self.resolve(canonical)?;
        let mut descriptor = source.clone();

        descriptor.alias_of = Some(source.canonical_name());
        descriptor.name = alias;
        descriptor.description = format!(
            "{}\n\nAlias of '{}' using Webex \"space\" terminology.",
            source.description.trim_end(),
            source.canonical_name()
        );

        self.register(descriptor)
    }

    pub fn resolve(&self, name: &str) -> Result<&ToolDescriptor> {
        self.index
            .get(name)
            .and_then(|position| self.tools.get(*position))
            .ok_or_else(|| Error::UnknownTool(name.to_string()))
    }

    /// Descriptors in registration order
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn list_tools(&self) -> ListToolsResult {
        let tools: Vec<Tool> = self.list().iter().map(generate_tool_registration).collect();

        ListToolsResult {
            next_cursor: None,
            tools,
        }
    }
}
