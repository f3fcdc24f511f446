//! Platform users

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::common::Metadata;

/// Free-form identity-provider profile data
pub type Profile = BTreeMap<String, serde_json::Value>;

/// A platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identity provider user ID
    pub id: String,
    pub meta: Metadata,
    pub name: String,
    pub email: String,
}

contract!(User => "User");
