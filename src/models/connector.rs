//! Booking connectors: provider integrations feeding booking tags

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Metadata;

/// Placeholder driver used while a provider integration is being built
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WipDriverConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BokameraDriverConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleCalendarDriverConfig {
    pub calendar_id: String,
    pub service_account_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrosoftPersonalDriverConfig {
    pub tenant_id: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrosoftResourceDriverConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub resource_mailbox: String,
}

/// The closed set of booking providers, selected by `driver_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "driver_type", rename_all = "kebab-case")]
pub enum ConnectorDriver {
    Wip { config: WipDriverConfig },
    Bokamera { config: BokameraDriverConfig },
    GoogleCalendar { config: GoogleCalendarDriverConfig },
    MicrosoftPersonal { config: MicrosoftPersonalDriverConfig },
    MicrosoftResource { config: MicrosoftResourceDriverConfig },
}

/// Fields a client supplies for a connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorRequest {
    pub name: String,
    #[serde(flatten)]
    pub driver: ConnectorDriver,
}

/// A persisted connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: Uuid,
    pub organization_id: String,
    pub meta: Metadata,
    pub name: String,
    #[serde(flatten)]
    pub driver: ConnectorDriver,
}

contract!(ConnectorRequest => "ConnectorRequest");
contract!(Connector => "Connector");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_driver_dispatches_on_driver_type() {
        let request: ConnectorRequest = serde_json::from_value(json!({
            "name": "Laundry room",
            "driver_type": "bokamera",
            "config": { "api_key": "bk-123" }
        }))
        .unwrap();
        match request.driver {
            ConnectorDriver::Bokamera { config } => {
                assert_eq!(config.api_key, "bk-123");
                assert!(config.site_id.is_none());
            }
            other => panic!("Expected bokamera driver, got {:?}", other),
        }
    }

    #[test]
    fn test_driver_wire_tags() {
        let driver = ConnectorDriver::GoogleCalendar {
            config: GoogleCalendarDriverConfig {
                calendar_id: "sauna".to_string(),
                service_account_email: "svc@example.iam.gserviceaccount.com".to_string(),
            },
        };
        let value = serde_json::to_value(&driver).unwrap();
        assert_eq!(value["driver_type"], json!("google-calendar"));
    }
}
