//! Static registry of the tools the catalog server exposes.

use serde_json::{json, Value};

/// Name of the zero-argument catalog listing tool.
pub const LIST_COMPONENTS: &str = "list_components";
/// Name of the free-text search tool.
pub const SEARCH_COMPONENTS: &str = "search_components";
/// Name of the lookup-by-identifier tool.
pub const GET_COMPONENT: &str = "get_component";

/// Description of one invocable tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema of the tool's input object.
    pub input_schema: Value,
}

/// Read-only mapping from tool name to descriptor.
///
/// The set is fixed at construction. Queries are pure and safe to issue
/// from any number of threads without synchronization.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// The registry for the reference catalog deployment.
    pub fn catalog() -> Self {
        Self {
            tools: vec![
                ToolDescriptor {
                    name: LIST_COMPONENTS,
                    description: "List every PC component in the catalog. Takes no parameters; \
                                  returns the full component list as JSON.",
                    input_schema: json!({
                        "type": "object",
                        "properties": {},
                        "required": []
                    }),
                },
                ToolDescriptor {
                    name: SEARCH_COMPONENTS,
                    description: "Search components by name or model. Returns matching \
                                  components, including their ids.",
                    input_schema: json!({
                        "type": "object",
                        "properties": {
                            "query": {
                                "type": "string",
                                "description": "Name or model to search for"
                            }
                        },
                        "required": ["query"]
                    }),
                },
                ToolDescriptor {
                    name: GET_COMPONENT,
                    description: "Get full details for one component, including price, by its \
                                  numeric id (obtained from a listing or search).",
                    input_schema: json!({
                        "type": "object",
                        "properties": {
                            "component_id": {
                                "type": "integer",
                                "description": "Numeric id of the component"
                            }
                        },
                        "required": ["component_id"]
                    }),
                },
            ],
        }
    }

    /// All descriptors, in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Look up a tool by name.
    pub fn describe(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Apply the registry's input coercion rules for a tool.
    ///
    /// `component_id` is numeric on the wire but agents routinely supply
    /// it as text. Text that parses as an integer is coerced; text that
    /// does not parse is passed through raw and left for the server to
    /// judge, never rejected here.
    pub fn normalize_input(&self, name: &str, mut input: Value) -> Value {
        if name == GET_COMPONENT {
            if let Some(id) = input.get("component_id").and_then(Value::as_str) {
                if let Ok(numeric) = id.trim().parse::<i64>() {
                    input["component_id"] = json!(numeric);
                }
            }
        }
        input
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::catalog()
    }
}
