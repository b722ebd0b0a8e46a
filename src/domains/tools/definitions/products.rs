//! Product tools.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::common::EntityFamily;
use crate::dolibarr::HttpMethod;
use crate::domains::tools::descriptor::{ParamSpec, ParamType, ToolDescriptor};

static REFERENCE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a product reference, unique per call within this process.
pub fn next_reference() -> String {
    let seq = REFERENCE_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("PROD-{}-{}", chrono::Utc::now().timestamp(), seq)
}

/// Arguments accepted by `create_product`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductCreateParams {
    pub label: String,
    pub price: f64,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Body sent to `POST products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    pub price: f64,
    /// Tax-inclusive price, mirrored from `price`.
    pub price_ttc: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductCreateParams {
    pub fn into_payload(self) -> ProductPayload {
        let reference = self
            .reference
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(next_reference);
        ProductPayload {
            reference,
            label: self.label,
            price: self.price,
            price_ttc: self.price,
            description: self.description,
            stock: self.stock,
        }
    }
}

/// Parameters for `update_product`; `product_id` addresses the record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductUpdateParams {
    #[serde(skip_serializing)]
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The product tool family.
pub struct ProductTools;

impl ProductTools {
    pub const LIST: &'static str = "get_products";
    pub const GET: &'static str = "get_product_by_id";
    pub const CREATE: &'static str = "create_product";
    pub const UPDATE: &'static str = "update_product";
    pub const DELETE: &'static str = "delete_product";

    pub const FAMILY: EntityFamily = EntityFamily {
        resource: "products",
        id_param: "product_id",
    };

    pub fn descriptors() -> Vec<ToolDescriptor> {
        let family = Self::FAMILY;
        let [limit, page] = family.list_params();

        vec![
            ToolDescriptor::new(Self::LIST, "Get list of products from Dolibarr", HttpMethod::Get)
                .param(limit)
                .param(page),
            ToolDescriptor::new(Self::GET, "Get specific product details by ID", HttpMethod::Get)
                .param(family.id_spec("Product ID to retrieve")),
            ToolDescriptor::new(Self::CREATE, "Create a new product", HttpMethod::Post)
                .param(ParamSpec::required("label", ParamType::String, "Product name/label"))
                .param(ParamSpec::required("price", ParamType::Number, "Product price"))
                .param(ParamSpec::optional(
                    "ref",
                    ParamType::String,
                    "Product reference (generated when omitted)",
                ))
                .param(ParamSpec::optional(
                    "description",
                    ParamType::String,
                    "Product description",
                ))
                .param(ParamSpec::optional("stock", ParamType::Integer, "Initial stock quantity")),
            ToolDescriptor::new(Self::UPDATE, "Update an existing product", HttpMethod::Put)
                .param(family.id_spec("Product ID to update"))
                .param(ParamSpec::optional("label", ParamType::String, "Product name/label"))
                .param(ParamSpec::optional("price", ParamType::Number, "Product price"))
                .param(ParamSpec::optional(
                    "description",
                    ParamType::String,
                    "Product description",
                )),
            ToolDescriptor::new(Self::DELETE, "Delete a product", HttpMethod::Delete)
                .param(family.id_spec("Product ID to delete")),
        ]
    }
}
