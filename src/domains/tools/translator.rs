//! Request translator: validated tool call to HTTP request (or probe plan).

use std::sync::Arc;

use rmcp::model::JsonObject;

use super::definitions::common::parse_args;
use super::definitions::{
    CustomerCreateParams, CustomerTools, CustomerUpdateParams, ProductCreateParams, ProductTools,
    ProductUpdateParams, RawApiTool, SystemTools, UserCreateParams, UserTools, UserUpdateParams,
};
use super::error::ToolError;
use super::probe::{CONNECTION_OK_MESSAGE, ProbePlan};
use crate::dolibarr::{EndpointConfig, RequestDescriptor};

/// What a tool call turns into.
#[derive(Debug, Clone)]
pub enum Translation {
    Request(RequestDescriptor),
    Probe(ProbePlan),
}

/// Maps tool names and arguments onto Dolibarr requests.
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    endpoint: Arc<EndpointConfig>,
}

impl RequestTranslator {
    pub fn new(endpoint: Arc<EndpointConfig>) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// Translate a call whose arguments already passed registry validation.
    pub fn translate(&self, name: &str, args: &JsonObject) -> Result<Translation, ToolError> {
        let endpoint = self.endpoint.as_ref();

        let request = match name {
            SystemTools::TEST_CONNECTION => {
                return Ok(Translation::Probe(
                    ProbePlan::standard(endpoint).with_message(CONNECTION_OK_MESSAGE),
                ));
            }
            SystemTools::GET_STATUS => {
                return Ok(Translation::Probe(ProbePlan::standard(endpoint)));
            }

            UserTools::LIST => UserTools::FAMILY.list(args, endpoint)?,
            UserTools::GET => UserTools::FAMILY.get(args, endpoint)?,
            UserTools::CREATE => {
                let params: UserCreateParams = parse_args(args)?;
                UserTools::FAMILY.create(&params, endpoint)?
            }
            UserTools::UPDATE => UserTools::FAMILY.update::<UserUpdateParams>(args, endpoint)?,
            UserTools::DELETE => UserTools::FAMILY.delete(args, endpoint)?,

            CustomerTools::LIST => CustomerTools::FAMILY.list(args, endpoint)?,
            CustomerTools::GET => CustomerTools::FAMILY.get(args, endpoint)?,
            CustomerTools::CREATE => {
                let params: CustomerCreateParams = parse_args(args)?;
                CustomerTools::FAMILY.create(&params.into_payload()?, endpoint)?
            }
            CustomerTools::UPDATE => {
                CustomerTools::FAMILY.update::<CustomerUpdateParams>(args, endpoint)?
            }
            CustomerTools::DELETE => CustomerTools::FAMILY.delete(args, endpoint)?,

            ProductTools::LIST => ProductTools::FAMILY.list(args, endpoint)?,
            ProductTools::GET => ProductTools::FAMILY.get(args, endpoint)?,
            ProductTools::CREATE => {
                let params: ProductCreateParams = parse_args(args)?;
                ProductTools::FAMILY.create(&params.into_payload(), endpoint)?
            }
            ProductTools::UPDATE => {
                ProductTools::FAMILY.update::<ProductUpdateParams>(args, endpoint)?
            }
            ProductTools::DELETE => ProductTools::FAMILY.delete(args, endpoint)?,

            RawApiTool::NAME => RawApiTool::translate(args, endpoint)?,

            other => return Err(ToolError::unsupported_tool(other)),
        };

        Ok(Translation::Request(request))
    }
}
