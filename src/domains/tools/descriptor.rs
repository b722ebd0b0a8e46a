//! Tool descriptors: name, description and parameter schema of each tool.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Map, Value, json};

use crate::dolibarr::HttpMethod;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    String,
    Number,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
        }
    }

    /// Whether `value` is an instance of this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Object => value.is_object(),
        }
    }
}

/// One parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
    /// Allowed string values, empty when unrestricted.
    pub allowed: &'static [&'static str],
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
            allowed: &[],
        }
    }

    pub fn optional(name: &'static str, kind: ParamType, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    /// Check a supplied value against the declared type and enumeration.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        if !self.kind.matches(value) {
            return Err(format!("expected {}, got {}", self.kind.as_str(), json_type(value)));
        }
        if !self.allowed.is_empty() {
            let ok = value
                .as_str()
                .is_some_and(|s| self.allowed.iter().any(|a| a.eq_ignore_ascii_case(s.trim())));
            if !ok {
                return Err(format!("must be one of {}", self.allowed.join(", ")));
            }
        }
        Ok(())
    }

    fn schema(&self) -> Value {
        let mut prop = json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if let Some(obj) = prop.as_object_mut() {
            if let Some(default) = &self.default {
                obj.insert("default".to_string(), default.clone());
            }
            if !self.allowed.is_empty() {
                obj.insert("enum".to_string(), json!(self.allowed));
            }
        }
        prop
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// HTTP method the tool maps to, used for client-facing hints.
    pub method: HttpMethod,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: &'static str, description: &'static str, method: HttpMethod) -> Self {
        Self {
            name,
            description,
            method,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn find_param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// JSON Schema of the argument object.
    pub fn input_schema(&self) -> JsonObject {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for p in &self.params {
            properties.insert(p.name.to_string(), p.schema());
            if p.required {
                required.push(Value::from(p.name));
            }
        }

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema.insert("additionalProperties".to_string(), json!(false));
        schema
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(self.input_schema()),
            annotations: Some(annotations_for_method(self.method)),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// MCP annotations derived from HTTP method semantics.
///
/// Every tool talks to an external system, so `open_world_hint` is always set.
pub fn annotations_for_method(method: HttpMethod) -> ToolAnnotations {
    let (read_only, destructive, idempotent) = match method {
        HttpMethod::Get => (true, false, true),
        HttpMethod::Post => (false, false, false),
        HttpMethod::Put | HttpMethod::Delete => (false, true, true),
    };
    ToolAnnotations {
        title: None,
        read_only_hint: Some(read_only),
        destructive_hint: Some(destructive),
        idempotent_hint: Some(idempotent),
        open_world_hint: Some(true),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolDescriptor {
        ToolDescriptor::new("get_users", "List users", HttpMethod::Get)
            .param(
                ParamSpec::optional("limit", ParamType::Integer, "Maximum results")
                    .with_default(json!(100)),
            )
            .param(ParamSpec::required("mode", ParamType::String, "Mode").one_of(&["A", "B"]))
    }

    #[test]
    fn test_type_matching() {
        assert!(ParamType::Integer.matches(&json!(3)));
        assert!(!ParamType::Integer.matches(&json!(3.5)));
        assert!(ParamType::Number.matches(&json!(3)));
        assert!(ParamType::Number.matches(&json!(3.5)));
        assert!(!ParamType::String.matches(&json!(3)));
        assert!(ParamType::Object.matches(&json!({})));
    }

    #[test]
    fn test_check_enumeration() {
        let desc = sample();
        let mode = desc.find_param("mode").unwrap();
        assert!(mode.check(&json!("a")).is_ok());
        assert!(mode.check(&json!("C")).is_err());
        assert!(mode.check(&json!(1)).is_err());
    }

    #[test]
    fn test_input_schema() {
        let schema = sample().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["limit"]["default"], 100);
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["A", "B"]));
        assert_eq!(schema["required"], json!(["mode"]));
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_to_tool_annotations() {
        let tool = sample().to_tool();
        assert_eq!(tool.name, "get_users");
        let ann = tool.annotations.unwrap();
        assert_eq!(ann.read_only_hint, Some(true));

        let delete = annotations_for_method(HttpMethod::Delete);
        assert_eq!(delete.destructive_hint, Some(true));
        assert_eq!(delete.read_only_hint, Some(false));
    }
}
