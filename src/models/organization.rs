//! Organizations (tenancy roots), permissions and integration config

use serde::{Deserialize, Serialize};

use super::common::Metadata;

/// Entity types an organization can synchronize from its source system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SynchronizedType {
    Announcements,
    Attachments,
    EmbeddedUrls,
    Locations,
    Units,
}

/// The closed permission vocabulary; exact wire values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "announcements:create")]
    AnnouncementsCreate,
    #[serde(rename = "announcements:update")]
    AnnouncementsUpdate,
    #[serde(rename = "announcements:delete")]
    AnnouncementsDelete,
    #[serde(rename = "attachments:create")]
    AttachmentsCreate,
    #[serde(rename = "attachments:update")]
    AttachmentsUpdate,
    #[serde(rename = "attachments:delete")]
    AttachmentsDelete,
    #[serde(rename = "connectors:create")]
    ConnectorsCreate,
    #[serde(rename = "connectors:update")]
    ConnectorsUpdate,
    #[serde(rename = "connectors:delete")]
    ConnectorsDelete,
    #[serde(rename = "devices:create")]
    DevicesCreate,
    #[serde(rename = "devices:update")]
    DevicesUpdate,
    #[serde(rename = "devices:delete")]
    DevicesDelete,
    #[serde(rename = "devices:factory-reset")]
    DevicesFactoryReset,
    #[serde(rename = "devices:uninstall")]
    DevicesUninstall,
    #[serde(rename = "embedded-urls:create")]
    EmbeddedUrlsCreate,
    #[serde(rename = "embedded-urls:update")]
    EmbeddedUrlsUpdate,
    #[serde(rename = "embedded-urls:delete")]
    EmbeddedUrlsDelete,
    #[serde(rename = "locations:create")]
    LocationsCreate,
    #[serde(rename = "locations:update")]
    LocationsUpdate,
    #[serde(rename = "locations:delete")]
    LocationsDelete,
    #[serde(rename = "tags:create")]
    TagsCreate,
    #[serde(rename = "tags:update")]
    TagsUpdate,
    #[serde(rename = "tags:delete")]
    TagsDelete,
    #[serde(rename = "units:create")]
    UnitsCreate,
    #[serde(rename = "units:update")]
    UnitsUpdate,
    #[serde(rename = "units:delete")]
    UnitsDelete,
    #[serde(rename = "units:sync")]
    UnitsSync,
    #[serde(rename = "users:read-all")]
    UsersReadAll,
}

/// iLOQ lock-group integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IloqLockGroupConfig {
    pub customer_code: String,
    pub lock_group_id: String,
}

/// Per-integration configuration of an organization
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrganizationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iloq: Option<IloqLockGroupConfig>,
}

/// Fields a client supplies for an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRequest {
    pub name: String,
    pub synchronized_types: Vec<SynchronizedType>,
}

/// A persisted organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub organization_id: String,
    pub meta: Metadata,
    pub name: String,
    pub synchronized_types: Vec<SynchronizedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<OrganizationConfig>,
}

contract!(SynchronizedType => "SynchronizedType");
contract!(Permission => "Permission");
contract!(IloqLockGroupConfig => "IloqLockGroupConfig");
contract!(OrganizationConfig => "OrganizationConfig");
contract!(OrganizationRequest => "OrganizationRequest");
contract!(Organization => "Organization");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_permission_wire_values() {
        assert_eq!(
            serde_json::to_value(Permission::DevicesFactoryReset).unwrap(),
            json!("devices:factory-reset")
        );
        assert_eq!(
            serde_json::to_value(Permission::UnitsSync).unwrap(),
            json!("units:sync")
        );
        let parsed: Permission = serde_json::from_value(json!("embedded-urls:delete")).unwrap();
        assert_eq!(parsed, Permission::EmbeddedUrlsDelete);
    }

    #[test]
    fn test_unknown_permission_rejected() {
        let result: Result<Permission, _> = serde_json::from_value(json!("bogus:permission"));
        assert!(result.is_err());
    }
}
