//! Domains module containing the business logic of the server.
//!
//! Only the tools domain exists: the server exposes no resources or prompts.

pub mod tools;
