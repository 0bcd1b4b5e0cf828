//! Tool catalog composed from independently written modules.
//!
//! Each [`ToolModule`] owns a set of [`ToolSpec`]s. Modules are kept in
//! registration order: listing concatenates their tools and a call is
//! handled by the first module owning the requested name. A module never
//! replaces or wraps another one.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, warn};
use rmcp::model::{JsonObject, Tool};
use rmcp::schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::ToolError;
use crate::pipeline::{ToolCallResult, Validate, input_schema, validate_arguments};

type Handler = Arc<dyn Fn(Option<JsonObject>) -> BoxFuture<'static, ToolCallResult> + Send + Sync>;

/// One tool: its advertised descriptor and the pipeline behind it.
#[derive(Clone)]
pub struct ToolSpec {
    tool: Tool,
    handler: Handler,
}

impl ToolSpec {
    /// Declares a tool whose arguments deserialize into `P`.
    ///
    /// The input schema is derived from `P`. The handler only ever sees
    /// arguments that passed validation.
    pub fn new<P, F, Fut, T>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        P: JsonSchema + DeserializeOwned + Validate + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ToolError>> + Send + 'static,
        T: Serialize,
    {
        let schema = input_schema::<P>();
        let tool = Tool::new(name, description, schema.clone());
        let handler = Arc::new(handler);

        let pipeline: Handler = Arc::new(move |arguments: Option<JsonObject>| {
            let schema = schema.clone();
            let handler = handler.clone();
            async move {
                let params = match validate_arguments::<P>(&schema, arguments) {
                    Ok(params) => params,
                    Err(err) => {
                        debug!("Rejected arguments for {}: {}", name, err);
                        return ToolCallResult::failure(&ToolError::Validation(err));
                    }
                };
                let outcome = match handler(params).await {
                    Ok(data) => serde_json::to_value(data).map_err(ToolError::from),
                    Err(err) => Err(err),
                };
                ToolCallResult::from_outcome(outcome)
            }
            .boxed()
        });

        Self {
            tool,
            handler: pipeline,
        }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub async fn invoke(&self, arguments: Option<JsonObject>) -> ToolCallResult {
        (self.handler)(arguments).await
    }
}

/// A named group of tools contributed to the catalog.
#[derive(Clone)]
pub struct ToolModule {
    name: &'static str,
    tools: Vec<ToolSpec>,
}

impl ToolModule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    fn find(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|spec| spec.name() == name)
    }
}

/// Outcome of routing a call through the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Completed(ToolCallResult),
    UnknownTool(String),
}

/// Ordered registrations of tool modules.
#[derive(Clone, Default)]
pub struct ToolCatalog {
    modules: Vec<ToolModule>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module. Names already owned by an earlier registration
    /// stay with that registration; the later tool is still listed.
    pub fn register(&mut self, module: ToolModule) {
        for (index, spec) in module.tools.iter().enumerate() {
            let earlier_in_module = module.tools[..index]
                .iter()
                .any(|other| other.name() == spec.name());
            let owner = self
                .owner_of(spec.name())
                .or(earlier_in_module.then_some(module.name));
            if let Some(owner) = owner {
                warn!(
                    "Tool '{}' from module '{}' is shadowed by module '{}'",
                    spec.name(),
                    module.name,
                    owner
                );
            }
        }
        debug!(
            "Registered module '{}' with {} tools",
            module.name,
            module.tools.len()
        );
        self.modules.push(module);
    }

    pub fn with_module(mut self, module: ToolModule) -> Self {
        self.register(module);
        self
    }

    /// Every registered tool, in registration order, duplicates included.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.modules
            .iter()
            .flat_map(|module| module.tools.iter().map(|spec| spec.tool.clone()))
            .collect()
    }

    /// The tool that handles calls to `name`.
    pub fn find(&self, name: &str) -> Option<&ToolSpec> {
        self.modules.iter().find_map(|module| module.find(name))
    }

    pub fn owner_of(&self, name: &str) -> Option<&'static str> {
        self.modules
            .iter()
            .find(|module| module.find(name).is_some())
            .map(|module| module.name)
    }

    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> Dispatch {
        match self.find(name) {
            Some(spec) => Dispatch::Completed(spec.invoke(arguments).await),
            None => Dispatch::UnknownTool(name.to_string()),
        }
    }
}
