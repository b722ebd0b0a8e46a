//! `dolibarr_raw_api`: direct access to any endpoint.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;

use super::common::parse_args;
use crate::dolibarr::{EndpointConfig, HttpMethod, RequestDescriptor};
use crate::domains::tools::descriptor::{ParamSpec, ParamType, ToolDescriptor};
use crate::domains::tools::error::ToolError;

pub const METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

#[derive(Debug, Clone, Deserialize)]
pub struct RawApiParams {
    pub method: String,
    pub endpoint: String,
    #[serde(default)]
    pub params: Option<JsonObject>,
    #[serde(default)]
    pub data: Option<JsonObject>,
}

pub struct RawApiTool;

impl RawApiTool {
    pub const NAME: &'static str = "dolibarr_raw_api";

    pub fn descriptor() -> ToolDescriptor {
        // Annotated as POST: no safety hint holds for every method.
        ToolDescriptor::new(
            Self::NAME,
            "Make raw API call to any Dolibarr endpoint",
            HttpMethod::Post,
        )
        .param(ParamSpec::required("method", ParamType::String, "HTTP method").one_of(METHODS))
        .param(ParamSpec::required(
            "endpoint",
            ParamType::String,
            "API endpoint (e.g., /thirdparties, /invoices)",
        ))
        .param(ParamSpec::optional("params", ParamType::Object, "Query parameters"))
        .param(ParamSpec::optional(
            "data",
            ParamType::Object,
            "Request payload for POST/PUT requests",
        ))
    }

    /// Build the request for a raw call.
    ///
    /// Query values are stringified; the body is only attached for POST and
    /// PUT when `data` is non-empty.
    pub fn translate(
        args: &JsonObject,
        endpoint: &EndpointConfig,
    ) -> Result<RequestDescriptor, ToolError> {
        let params: RawApiParams = parse_args(args)?;
        let method = HttpMethod::parse(&params.method).ok_or_else(|| {
            ToolError::invalid_argument("method", format!("must be one of {}", METHODS.join(", ")))
        })?;

        let mut request = RequestDescriptor::new(method, &params.endpoint, endpoint);
        for (key, value) in params.params.unwrap_or_default() {
            if let Some(text) = query_value(&value) {
                request = request.with_query(key, text);
            }
        }
        if let Some(data) = params.data.filter(|d| !d.is_empty()) {
            request = request.with_body(Value::Object(data));
        }
        Ok(request)
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint() -> EndpointConfig {
        EndpointConfig::resolve("https://erp.example.com", "0123456789abcdef").unwrap()
    }

    fn translate(args: Value) -> Result<RequestDescriptor, ToolError> {
        RawApiTool::translate(args.as_object().unwrap(), &endpoint())
    }

    #[test]
    fn test_lowercase_method_and_leading_slash() {
        let req = translate(json!({
            "method": "get",
            "endpoint": "/invoices",
            "params": {"limit": 5, "sortfield": "t.ref", "skip": null}
        }))
        .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "invoices");
        assert_eq!(req.url, "https://erp.example.com/api/index.php/invoices");
        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("sortfield".to_string(), "t.ref".to_string())
            ]
        );
    }

    #[test]
    fn test_body_only_for_post_and_put() {
        let post = translate(json!({
            "method": "POST",
            "endpoint": "invoices",
            "data": {"socid": 1}
        }))
        .unwrap();
        assert_eq!(post.body, Some(json!({"socid": 1})));

        let delete = translate(json!({
            "method": "DELETE",
            "endpoint": "invoices/3",
            "data": {"ignored": true}
        }))
        .unwrap();
        assert!(delete.body.is_none());

        let empty = translate(json!({"method": "PUT", "endpoint": "invoices/3", "data": {}}))
            .unwrap();
        assert!(empty.body.is_none());
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = translate(json!({"method": "PATCH", "endpoint": "x"})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { ref name, .. } if name == "method"));
    }
}
