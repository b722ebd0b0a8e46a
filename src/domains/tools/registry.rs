//! Tool Registry - the catalog of every tool the server exposes.
//!
//! The registry owns the descriptors and validates argument bags against
//! them before anything is translated into an HTTP request.

use std::collections::HashMap;

use rmcp::model::{JsonObject, Tool};
use serde_json::Value;

use super::definitions::{CustomerTools, ProductTools, RawApiTool, SystemTools, UserTools};
use super::descriptor::ToolDescriptor;
use super::error::ToolError;

/// Tool registry - ordered catalog with name lookup.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Build the registry with the full catalog.
    pub fn new() -> Self {
        let mut tools = SystemTools::descriptors();
        tools.extend(UserTools::descriptors());
        tools.extend(CustomerTools::descriptors());
        tools.extend(ProductTools::descriptors());
        tools.push(RawApiTool::descriptor());
        Self::from_descriptors(tools)
    }

    fn from_descriptors(tools: Vec<ToolDescriptor>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name, i))
            .collect();
        Self { tools, index }
    }

    /// Descriptors in catalog order.
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Tool names in catalog order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Validate an argument bag.
    ///
    /// Checks run in order: unknown tool, missing required argument (first in
    /// declaration order), wrong type or value, unexpected argument. `null`
    /// counts as absent.
    pub fn validate(&self, name: &str, args: &JsonObject) -> Result<&ToolDescriptor, ToolError> {
        let descriptor = self.get(name).ok_or_else(|| ToolError::unknown_tool(name))?;

        let present = |key: &str| args.get(key).is_some_and(|v| !v.is_null());

        if let Some(missing) = descriptor
            .params
            .iter()
            .find(|p| p.required && !present(p.name))
        {
            return Err(ToolError::missing_argument(missing.name));
        }

        for param in &descriptor.params {
            match args.get(param.name) {
                None | Some(Value::Null) => {}
                Some(value) => param
                    .check(value)
                    .map_err(|reason| ToolError::invalid_argument(param.name, reason))?,
            }
        }

        if let Some(extra) = args.keys().find(|k| descriptor.find_param(k).is_none()) {
            return Err(ToolError::unexpected_argument(extra.as_str()));
        }

        Ok(descriptor)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_catalog_order() {
        let registry = ToolRegistry::new();
        assert_eq!(
            registry.tool_names(),
            vec![
                "test_connection",
                "get_status",
                "get_users",
                "get_user_by_id",
                "create_user",
                "update_user",
                "delete_user",
                "get_customers",
                "get_customer_by_id",
                "create_customer",
                "update_customer",
                "delete_customer",
                "get_products",
                "get_product_by_id",
                "create_product",
                "update_product",
                "delete_product",
                "dolibarr_raw_api",
            ]
        );
    }

    #[test]
    fn test_names_unique() {
        let registry = ToolRegistry::new();
        let names: HashSet<_> = registry.tool_names().into_iter().collect();
        assert_eq!(names.len(), registry.list_tools().len());
    }

    #[test]
    fn test_every_tool_has_object_schema() {
        for tool in ToolRegistry::new().get_all_tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(tool.description.is_some());
        }
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        assert_eq!(
            registry.validate("frobnicate", &JsonObject::new()).unwrap_err(),
            ToolError::unknown_tool("frobnicate")
        );
    }

    #[test]
    fn test_missing_reported_in_declaration_order() {
        let registry = ToolRegistry::new();
        let err = registry
            .validate("create_user", &args(json!({"bogus": 1})))
            .unwrap_err();
        assert_eq!(err, ToolError::missing_argument("login"));

        let err = registry
            .validate("create_user", &args(json!({"login": "j", "lastname": null})))
            .unwrap_err();
        assert_eq!(err, ToolError::missing_argument("lastname"));
    }

    #[test]
    fn test_type_checked_before_unexpected() {
        let registry = ToolRegistry::new();
        let err = registry
            .validate("get_user_by_id", &args(json!({"user_id": "7", "extra": 1})))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { ref name, .. } if name == "user_id"));
    }

    #[test]
    fn test_unexpected_argument() {
        let registry = ToolRegistry::new();
        let err = registry
            .validate("get_users", &args(json!({"limit": 5, "sort": "asc"})))
            .unwrap_err();
        assert_eq!(err, ToolError::unexpected_argument("sort"));
    }

    #[test]
    fn test_enum_is_case_insensitive() {
        let registry = ToolRegistry::new();
        assert!(
            registry
                .validate("dolibarr_raw_api", &args(json!({"method": "get", "endpoint": "x"})))
                .is_ok()
        );
        assert!(
            registry
                .validate("dolibarr_raw_api", &args(json!({"method": "PATCH", "endpoint": "x"})))
                .is_err()
        );
    }

    #[test]
    fn test_null_optional_is_absent() {
        let registry = ToolRegistry::new();
        assert!(
            registry
                .validate("get_users", &args(json!({"limit": null, "page": 2})))
                .is_ok()
        );
    }
}
