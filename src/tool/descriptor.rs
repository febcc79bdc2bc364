//! Tool descriptor shapes for the transition tool.

use super::{
    transition_input_schema, TRANSITION_TOOL_DESCRIPTION, TRANSITION_TOOL_NAME,
    TRANSITION_TOOL_NAMESPACE,
};
use serde::{Deserialize, Serialize};

/// Tool catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Minimal descriptor handed to a model provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl From<ToolDescriptor> for ProviderToolDescriptor {
    fn from(descriptor: ToolDescriptor) -> Self {
        Self {
            name: descriptor.name,
            description: descriptor.description,
            input_schema: descriptor.input_schema,
        }
    }
}

/// Catalog descriptor for the transition tool offering `events`.
pub fn build_transition_tool_descriptor<S: AsRef<str>>(events: &[S]) -> ToolDescriptor {
    ToolDescriptor {
        name: TRANSITION_TOOL_NAME.to_string(),
        namespace: TRANSITION_TOOL_NAMESPACE.to_string(),
        description: TRANSITION_TOOL_DESCRIPTION.to_string(),
        input_schema: transition_input_schema(events),
    }
}

/// Provider descriptor for the transition tool offering `events`.
pub fn build_transition_provider_descriptor<S: AsRef<str>>(events: &[S]) -> ProviderToolDescriptor {
    build_transition_tool_descriptor(events).into()
}
