//! Connectivity tools: `test_connection` and `get_status`.
//!
//! Both run the status probe rather than a single request; see
//! [`crate::domains::tools::probe`].

use crate::dolibarr::HttpMethod;
use crate::domains::tools::descriptor::ToolDescriptor;

pub struct SystemTools;

impl SystemTools {
    pub const TEST_CONNECTION: &'static str = "test_connection";
    pub const GET_STATUS: &'static str = "get_status";

    pub fn descriptors() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(
                Self::TEST_CONNECTION,
                "Test Dolibarr API connection",
                HttpMethod::Get,
            ),
            ToolDescriptor::new(
                Self::GET_STATUS,
                "Get Dolibarr system status and version information",
                HttpMethod::Get,
            ),
        ]
    }
}
