//! Tool definitions, one file per tool family.

pub mod common;
pub mod customers;
pub mod products;
pub mod raw;
pub mod system;
pub mod users;

pub use common::{DEFAULT_LIMIT, DEFAULT_PAGE, EntityFamily, ListParams};
pub use customers::{CustomerCreateParams, CustomerTools, CustomerUpdateParams};
pub use products::{ProductCreateParams, ProductTools, ProductUpdateParams};
pub use raw::{RawApiParams, RawApiTool};
pub use system::SystemTools;
pub use users::{UserCreateParams, UserTools, UserUpdateParams};
