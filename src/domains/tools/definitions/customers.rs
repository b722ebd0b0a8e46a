//! Customer (third party) tools.
//!
//! Dolibarr models customers and suppliers as one `thirdparties` resource
//! with two flags, `client` and `fournisseur`. The tools expose a single
//! integer `type` instead:
//!
//! | type | client | fournisseur |
//! |------|--------|-------------|
//! | 1    | 1      | 0           |
//! | 2    | 0      | 1           |
//! | 3    | 1      | 1           |
//!
//! Any other `type` is rejected as an invalid argument rather than sent as a
//! third party with both flags cleared.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::EntityFamily;
use crate::dolibarr::HttpMethod;
use crate::domains::tools::descriptor::{ParamSpec, ParamType, ToolDescriptor};
use crate::domains::tools::error::ToolError;

pub const TYPE_CUSTOMER: i64 = 1;
pub const TYPE_SUPPLIER: i64 = 2;
pub const TYPE_BOTH: i64 = 3;

fn default_type() -> i64 {
    TYPE_CUSTOMER
}

fn default_one() -> i64 {
    1
}

/// Arguments accepted by `create_customer`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerCreateParams {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default = "default_one")]
    pub country_id: i64,
    #[serde(rename = "type", default = "default_type")]
    pub kind: i64,
    #[serde(default = "default_one")]
    pub status: i64,
}

/// Body sent to `POST thirdparties`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerPayload {
    pub name: String,
    pub status: i64,
    pub client: u8,
    pub fournisseur: u8,
    pub country_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl CustomerCreateParams {
    /// Shape the arguments into the Dolibarr payload.
    pub fn into_payload(self) -> Result<CustomerPayload, ToolError> {
        let (client, fournisseur) = thirdparty_flags(self.kind)?;
        Ok(CustomerPayload {
            name: self.name,
            status: self.status,
            client,
            fournisseur,
            country_id: self.country_id,
            email: self.email,
            phone: self.phone,
            address: self.address,
            town: self.town,
            zip: self.zip,
        })
    }
}

/// Map the `type` argument to Dolibarr's `(client, fournisseur)` flags.
pub fn thirdparty_flags(kind: i64) -> Result<(u8, u8), ToolError> {
    match kind {
        TYPE_CUSTOMER => Ok((1, 0)),
        TYPE_SUPPLIER => Ok((0, 1)),
        TYPE_BOTH => Ok((1, 1)),
        other => Err(ToolError::invalid_argument(
            "type",
            format!("expected 1 (customer), 2 (supplier) or 3 (both), got {other}"),
        )),
    }
}

/// Parameters for `update_customer`; `customer_id` addresses the record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CustomerUpdateParams {
    #[serde(skip_serializing)]
    pub customer_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

/// The customer tool family.
pub struct CustomerTools;

impl CustomerTools {
    pub const LIST: &'static str = "get_customers";
    pub const GET: &'static str = "get_customer_by_id";
    pub const CREATE: &'static str = "create_customer";
    pub const UPDATE: &'static str = "update_customer";
    pub const DELETE: &'static str = "delete_customer";

    pub const FAMILY: EntityFamily = EntityFamily {
        resource: "thirdparties",
        id_param: "customer_id",
    };

    pub fn descriptors() -> Vec<ToolDescriptor> {
        let family = Self::FAMILY;
        let [limit, page] = family.list_params();

        vec![
            ToolDescriptor::new(
                Self::LIST,
                "Get list of customers/third parties from Dolibarr",
                HttpMethod::Get,
            )
            .param(limit)
            .param(page),
            ToolDescriptor::new(Self::GET, "Get specific customer details by ID", HttpMethod::Get)
                .param(family.id_spec("Customer ID to retrieve")),
            ToolDescriptor::new(
                Self::CREATE,
                "Create a new customer/third party",
                HttpMethod::Post,
            )
            .param(ParamSpec::required("name", ParamType::String, "Customer name"))
            .param(ParamSpec::optional("email", ParamType::String, "Email address"))
            .param(ParamSpec::optional("phone", ParamType::String, "Phone number"))
            .param(ParamSpec::optional("address", ParamType::String, "Customer address"))
            .param(ParamSpec::optional("town", ParamType::String, "City/Town"))
            .param(ParamSpec::optional("zip", ParamType::String, "Postal code"))
            .param(
                ParamSpec::optional("country_id", ParamType::Integer, "Country ID (default: 1)")
                    .with_default(json!(1)),
            )
            .param(
                ParamSpec::optional(
                    "type",
                    ParamType::Integer,
                    "Customer type (1=Customer, 2=Supplier, 3=Both)",
                )
                .with_default(json!(TYPE_CUSTOMER)),
            )
            .param(
                ParamSpec::optional("status", ParamType::Integer, "Status (1=Active, 0=Inactive)")
                    .with_default(json!(1)),
            ),
            ToolDescriptor::new(Self::UPDATE, "Update an existing customer", HttpMethod::Put)
                .param(family.id_spec("Customer ID to update"))
                .param(ParamSpec::optional("name", ParamType::String, "Customer name"))
                .param(ParamSpec::optional("email", ParamType::String, "Email address"))
                .param(ParamSpec::optional("phone", ParamType::String, "Phone number"))
                .param(ParamSpec::optional("address", ParamType::String, "Customer address"))
                .param(ParamSpec::optional("town", ParamType::String, "City/Town"))
                .param(ParamSpec::optional("zip", ParamType::String, "Postal code"))
                .param(ParamSpec::optional(
                    "status",
                    ParamType::Integer,
                    "Status (1=Active, 0=Inactive)",
                )),
            ToolDescriptor::new(Self::DELETE, "Delete a customer", HttpMethod::Delete)
                .param(family.id_spec("Customer ID to delete")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::parse_args;
    use serde_json::Value;

    fn payload(args: Value) -> Value {
        let params: CustomerCreateParams = parse_args(args.as_object().unwrap()).unwrap();
        serde_json::to_value(params.into_payload().unwrap()).unwrap()
    }

    #[test]
    fn test_default_type_is_customer() {
        assert_eq!(
            payload(json!({"name": "ACME"})),
            json!({
                "name": "ACME",
                "status": 1,
                "client": 1,
                "fournisseur": 0,
                "country_id": 1
            })
        );
    }

    #[test]
    fn test_type_mapping() {
        let supplier = payload(json!({"name": "S", "type": 2}));
        assert_eq!(supplier["client"], 0);
        assert_eq!(supplier["fournisseur"], 1);

        let both = payload(json!({"name": "B", "type": 3}));
        assert_eq!(both["client"], 1);
        assert_eq!(both["fournisseur"], 1);
    }

    #[test]
    fn test_type_out_of_range() {
        assert!(matches!(
            thirdparty_flags(4),
            Err(ToolError::InvalidArgument { ref name, .. }) if name == "type"
        ));
    }

    #[test]
    fn test_passthrough_fields_only_when_present() {
        let body = payload(json!({"name": "ACME", "town": "Lyon", "zip": "69001", "status": 0}));
        assert_eq!(body["town"], "Lyon");
        assert_eq!(body["zip"], "69001");
        assert_eq!(body["status"], 0);
        assert!(body.get("email").is_none());
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn test_update_drops_customer_id() {
        let args = json!({"customer_id": 3, "status": 0});
        let params: CustomerUpdateParams = parse_args(args.as_object().unwrap()).unwrap();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"status": 0}));
    }
}
