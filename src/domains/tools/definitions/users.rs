//! User management tools.
//!
//! Dolibarr users live under the `users` resource. Create and update
//! forward only the fields listed on their parameter structs.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::common::EntityFamily;
use crate::dolibarr::HttpMethod;
use crate::domains::tools::descriptor::{ParamSpec, ParamType, ToolDescriptor};

/// Parameters for `create_user`, forwarded as the request body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserCreateParams {
    pub login: String,
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Admin level (0 = no, 1 = yes).
    #[serde(default)]
    pub admin: i64,
}

/// Parameters for `update_user`; `user_id` addresses the record and is not sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserUpdateParams {
    #[serde(skip_serializing)]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<i64>,
}

/// The user tool family.
pub struct UserTools;

impl UserTools {
    pub const LIST: &'static str = "get_users";
    pub const GET: &'static str = "get_user_by_id";
    pub const CREATE: &'static str = "create_user";
    pub const UPDATE: &'static str = "update_user";
    pub const DELETE: &'static str = "delete_user";

    pub const FAMILY: EntityFamily = EntityFamily {
        resource: "users",
        id_param: "user_id",
    };

    pub fn descriptors() -> Vec<ToolDescriptor> {
        let family = Self::FAMILY;
        let [limit, page] = family.list_params();

        vec![
            ToolDescriptor::new(Self::LIST, "Get list of users from Dolibarr", HttpMethod::Get)
                .param(limit)
                .param(page),
            ToolDescriptor::new(Self::GET, "Get specific user details by ID", HttpMethod::Get)
                .param(family.id_spec("User ID to retrieve")),
            ToolDescriptor::new(Self::CREATE, "Create a new user", HttpMethod::Post)
                .param(ParamSpec::required("login", ParamType::String, "User login"))
                .param(ParamSpec::required("lastname", ParamType::String, "Last name"))
                .param(ParamSpec::optional("firstname", ParamType::String, "First name"))
                .param(ParamSpec::optional("email", ParamType::String, "Email address"))
                .param(ParamSpec::optional("password", ParamType::String, "Password"))
                .param(
                    ParamSpec::optional("admin", ParamType::Integer, "Admin level (0=No, 1=Yes)")
                        .with_default(json!(0)),
                ),
            ToolDescriptor::new(Self::UPDATE, "Update an existing user", HttpMethod::Put)
                .param(family.id_spec("User ID to update"))
                .param(ParamSpec::optional("login", ParamType::String, "User login"))
                .param(ParamSpec::optional("lastname", ParamType::String, "Last name"))
                .param(ParamSpec::optional("firstname", ParamType::String, "First name"))
                .param(ParamSpec::optional("email", ParamType::String, "Email address"))
                .param(ParamSpec::optional(
                    "admin",
                    ParamType::Integer,
                    "Admin level (0=No, 1=Yes)",
                )),
            ToolDescriptor::new(Self::DELETE, "Delete a user", HttpMethod::Delete)
                .param(family.id_spec("User ID to delete")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::parse_args;

    #[test]
    fn test_create_defaults_admin_and_skips_absent_fields() {
        let args = json!({"login": "jdoe", "lastname": "Doe"});
        let params: UserCreateParams = parse_args(args.as_object().unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"login": "jdoe", "lastname": "Doe", "admin": 0})
        );
    }

    #[test]
    fn test_update_drops_user_id() {
        let args = json!({"user_id": 7, "email": "j@example.com"});
        let params: UserUpdateParams = parse_args(args.as_object().unwrap()).unwrap();
        assert_eq!(params.user_id, 7);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"email": "j@example.com"})
        );
    }

    #[test]
    fn test_descriptor_names() {
        let names: Vec<_> = UserTools::descriptors().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["get_users", "get_user_by_id", "create_user", "update_user", "delete_user"]
        );
    }
}
