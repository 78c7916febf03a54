#![recursion_limit = "256"]

use anyhow::{anyhow, Result};
use mqtt::{alarm_control_panel::AlarmControlPanel, binary_sensor::BinarySensor, siren::Siren};
use rumqttc::v5::{
    mqttbytes::{v5::PublishProperties, QoS::AtLeastOnce},
    AsyncClient,
};
use serde::Serialize;

pub use rumqttc::v5;
use serde_json::Value;

pub mod bus;
pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod mqtt;
pub mod panel;
pub mod router;
pub mod state_machine;
pub mod state_store;
pub mod timer;

const ONE_WEEK_SECONDS: u32 = 60 * 60 * 24 * 7;

/// Thin client over `rumqttc`'s publish call, specialized for the
/// retained/expiring JSON discovery payloads Home Assistant expects.
#[derive(Clone)]
pub struct HomeAssistantMqtt {
    client: AsyncClient,
    discovery_prefix: String,
}

impl HomeAssistantMqtt {
    pub fn new<S: Into<String>>(client: AsyncClient, discovery_prefix: S) -> Self {
        Self {
            client,
            discovery_prefix: discovery_prefix.into(),
        }
    }

    /// The discovery topic needs to follow a specific format:
    /// `<discovery_prefix>/<component>/[<node_id>/]<object_id>/config`
    pub async fn publish_entity(&self, entity: Entity) -> Result<()> {
        let component = entity.get_component_name();
        let attributes = entity.get_attributes()?;
        let object_id = attributes
            .as_object()
            .ok_or(anyhow!("entity configuration should be an object"))?
            .get("uniq_id")
            .ok_or(anyhow!(
                "entity configuration should have an attribute 'uniq_id'"
            ))?
            .as_str()
            .ok_or(anyhow!("'uniq_id' attribute should be a string"))?;
        let prefix = self
            .discovery_prefix
            .strip_suffix("/")
            .unwrap_or(&self.discovery_prefix);
        let topic = format!("{prefix}/{component}/{object_id}/config");
        let payload = serde_json::ser::to_string(&attributes).unwrap();
        let props = PublishProperties {
            message_expiry_interval: Some(ONE_WEEK_SECONDS),
            content_type: Some("application/json".to_string()),
            ..Default::default()
        };
        Ok(self
            .client
            .publish_with_properties(topic, AtLeastOnce, true, payload, props)
            .await?)
    }

    pub async fn publish_data<S: Serialize>(
        &self,
        topic: &String,
        payload: &S,
        message_expiry_interval: Option<u32>,
    ) -> Result<()> {
        let payload = serde_json::ser::to_string(payload).unwrap();
        let props = PublishProperties {
            message_expiry_interval,
            content_type: Some("application/json".to_string()),
            ..Default::default()
        };
        Ok(self
            .client
            .publish_with_properties(topic, AtLeastOnce, true, payload, props)
            .await?)
    }
}

/// The three Home Assistant discovery entity kinds the panel exposes: the
/// panel itself, one binary sensor per configured zone sensor, and one
/// siren per configured siren.
#[derive(Clone)]
pub enum Entity {
    AlarmControlPanel(AlarmControlPanel),
    BinarySensor(BinarySensor),
    Siren(Siren),
}

impl Entity {
    fn get_component_name(&self) -> &str {
        match self {
            Entity::AlarmControlPanel(_) => "alarm_control_panel",
            Entity::BinarySensor(_) => "binary_sensor",
            Entity::Siren(_) => "siren",
        }
    }

    fn get_attributes(&self) -> Result<Value> {
        let attributes = match self {
            Entity::AlarmControlPanel(panel) => serde_json::to_value(panel)?,
            Entity::BinarySensor(sensor) => serde_json::to_value(sensor)?,
            Entity::Siren(siren) => serde_json::to_value(siren)?,
        };
        Ok(attributes)
    }
}

// `From<AlarmControlPanel> for Entity` lives in mqtt::alarm_control_panel
// alongside the struct, matching this crate's existing convention.
