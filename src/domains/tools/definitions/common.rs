//! Shared pieces of the entity-family tools.
//!
//! Users, customers and products all expose the same list / get / create /
//! update / delete shape; [`EntityFamily`] builds those requests so each
//! family file only has to describe its own payloads.

use rmcp::model::JsonObject;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::dolibarr::{EndpointConfig, HttpMethod, RequestDescriptor, ResponseShape};
use crate::domains::tools::descriptor::{ParamSpec, ParamType};
use crate::domains::tools::error::ToolError;

/// Default page size for list tools.
pub const DEFAULT_LIMIT: i64 = 100;

/// Default page for list tools. Pages at or below this are not sent.
pub const DEFAULT_PAGE: i64 = 1;

pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

pub fn default_page() -> i64 {
    DEFAULT_PAGE
}

/// Pagination arguments shared by every list tool.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
}

/// A remote resource with the standard CRUD tool set.
#[derive(Debug, Clone, Copy)]
pub struct EntityFamily {
    /// Dolibarr resource path, e.g. `thirdparties`.
    pub resource: &'static str,
    /// Name of the id argument, e.g. `customer_id`.
    pub id_param: &'static str,
}

impl EntityFamily {
    /// GET `<resource>?limit=..[&page=..]`.
    pub fn list(
        &self,
        args: &JsonObject,
        endpoint: &EndpointConfig,
    ) -> Result<RequestDescriptor, ToolError> {
        let params: ListParams = parse_args(args)?;
        let mut request = RequestDescriptor::new(HttpMethod::Get, self.resource, endpoint)
            .with_query("limit", params.limit)
            .with_shape(ResponseShape::List);
        if params.page > DEFAULT_PAGE {
            request = request.with_query("page", params.page);
        }
        Ok(request)
    }

    /// GET `<resource>/<id>`.
    pub fn get(
        &self,
        args: &JsonObject,
        endpoint: &EndpointConfig,
    ) -> Result<RequestDescriptor, ToolError> {
        let id = self.id(args)?;
        Ok(RequestDescriptor::new(HttpMethod::Get, &self.item_path(id), endpoint))
    }

    /// POST `<resource>` with an already-shaped payload.
    pub fn create<P: Serialize>(
        &self,
        payload: &P,
        endpoint: &EndpointConfig,
    ) -> Result<RequestDescriptor, ToolError> {
        let body = to_body(payload)?;
        Ok(RequestDescriptor::new(HttpMethod::Post, self.resource, endpoint).with_body(body))
    }

    /// PUT `<resource>/<id>` with the remaining allow-listed fields.
    ///
    /// `U` must skip the id field when serializing. With no fields left the
    /// request carries no body.
    pub fn update<U>(
        &self,
        args: &JsonObject,
        endpoint: &EndpointConfig,
    ) -> Result<RequestDescriptor, ToolError>
    where
        U: DeserializeOwned + Serialize,
    {
        let id = self.id(args)?;
        let fields: U = parse_args(args)?;
        let request = RequestDescriptor::new(HttpMethod::Put, &self.item_path(id), endpoint);
        match to_body(&fields)? {
            Value::Object(map) if map.is_empty() => Ok(request),
            body => Ok(request.with_body(body)),
        }
    }

    /// DELETE `<resource>/<id>`.
    pub fn delete(
        &self,
        args: &JsonObject,
        endpoint: &EndpointConfig,
    ) -> Result<RequestDescriptor, ToolError> {
        let id = self.id(args)?;
        Ok(RequestDescriptor::new(HttpMethod::Delete, &self.item_path(id), endpoint))
    }

    fn id(&self, args: &JsonObject) -> Result<i64, ToolError> {
        match args.get(self.id_param) {
            None | Some(Value::Null) => Err(ToolError::missing_argument(self.id_param)),
            Some(v) => v
                .as_i64()
                .ok_or_else(|| ToolError::invalid_argument(self.id_param, "expected integer")),
        }
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.resource, id)
    }

    /// `limit` / `page` parameters for a list tool.
    pub fn list_params(&self) -> [ParamSpec; 2] {
        [
            ParamSpec::optional(
                "limit",
                ParamType::Integer,
                "Maximum number of records to return (default: 100)",
            )
            .with_default(json!(DEFAULT_LIMIT)),
            ParamSpec::optional(
                "page",
                ParamType::Integer,
                "Page number for pagination (default: 1)",
            )
            .with_default(json!(DEFAULT_PAGE)),
        ]
    }

    /// The required id parameter.
    pub fn id_spec(&self, description: &'static str) -> ParamSpec {
        ParamSpec::required(self.id_param, ParamType::Integer, description)
    }
}

/// Deserialize an argument bag into a typed struct.
///
/// `null` values are treated as absent so serde defaults apply.
pub fn parse_args<T: DeserializeOwned>(args: &JsonObject) -> Result<T, ToolError> {
    let cleaned: JsonObject = args
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    serde_json::from_value(Value::Object(cleaned))
        .map_err(|e| ToolError::invalid_argument("arguments", e.to_string()))
}

fn to_body<P: Serialize>(payload: &P) -> Result<Value, ToolError> {
    serde_json::to_value(payload)
        .map_err(|e| ToolError::invalid_argument("arguments", e.to_string()))
}
