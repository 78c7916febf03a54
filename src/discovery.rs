//! Optional Home Assistant MQTT discovery, gated behind `mqtt.ha_discovery`.
//! Reuses the builder-pattern entity types in [`crate::mqtt`] and the
//! discovery publisher from the crate root. Advertises the panel itself,
//! one binary sensor per configured zone sensor, and one siren per
//! configured siren; purely additive to the wire protocol — nothing here
//! is read back by the router.

use tracing::{info, warn};

use crate::config::{BusConfig, Registry, SensorKind};
use crate::mqtt::alarm_control_panel::AlarmControlPanel;
use crate::mqtt::binary_sensor::BinarySensor;
use crate::mqtt::common::{Availability, AvailabilityCheck, Device, Origin};
use crate::mqtt::siren::Siren;
use crate::{Entity, HomeAssistantMqtt};

const DISCOVERY_PREFIX: &str = "homeassistant";

fn device(bus: &BusConfig) -> Device {
    Device::default()
        .name("Alarm Panel")
        .add_identifier(format!("alarm-panel-{}", bus.base_topic))
        .manufacturer("alarm-panel")
}

fn availability(bus: &BusConfig) -> Availability {
    Availability::single(AvailabilityCheck::topic(format!("{}/status", bus.base_topic)))
}

fn origin() -> Origin {
    Origin::new("alarm-panel").with_sw_version(env!("CARGO_PKG_VERSION"))
}

fn panel_entity(bus: &BusConfig) -> Entity {
    AlarmControlPanel::default()
        .origin(origin())
        .device(device(bus))
        .availability(availability(bus))
        .unique_id(format!("{}-panel", bus.base_topic))
        .name("Alarm Panel")
        .state_topic(format!("{}/alarm_state", bus.base_topic))
        .command_topic(format!("{}/set_mode", bus.base_topic))
        .supported_features(vec!["arm_home", "arm_away", "arm_night"])
        .into()
}

fn sensor_entity(bus: &BusConfig, registry: &Registry, name: &str) -> Option<Entity> {
    let sensor = registry.sensor(name)?;
    let device_class = match sensor.kind {
        SensorKind::Contact => crate::mqtt::binary_sensor::BinarySensorDeviceClass::Door,
        SensorKind::Motion => crate::mqtt::binary_sensor::BinarySensorDeviceClass::Motion,
    };
    Some(
        BinarySensor::default()
            .origin(origin())
            .device(device(bus))
            .availability(availability(bus))
            .unique_id(format!("{}-sensor-{}", bus.base_topic, name))
            .name(name)
            .device_class(device_class)
            .state_topic(format!("{}/{}", bus.gateway_topic, name))
            .into(),
    )
}

fn siren_entity(bus: &BusConfig, name: &str) -> Entity {
    Siren::default()
        .origin(origin())
        .device(device(bus))
        .availability(availability(bus))
        .unique_id(format!("{}-siren-{}", bus.base_topic, name))
        .name(name)
        .support_duration(true)
        .state_topic(format!("{}/{}", bus.gateway_topic, name))
        .command_topic(format!("{}/{}/set", bus.gateway_topic, name))
        .into()
}

/// Publish discovery configs for the panel and every currently configured
/// sensor and siren. Called once after connect, and again after a reload
/// that changes the device inventory.
pub async fn publish_all(client: &HomeAssistantMqtt, bus: &BusConfig, registry: &Registry) {
    if let Err(err) = client.publish_entity(panel_entity(bus)).await {
        warn!(%err, "failed to publish alarm panel discovery config");
    }

    for sensor in &registry.sensors {
        if let Some(entity) = sensor_entity(bus, registry, &sensor.name) {
            if let Err(err) = client.publish_entity(entity).await {
                warn!(%err, sensor = %sensor.name, "failed to publish sensor discovery config");
            }
        }
    }

    for siren in &registry.sirens {
        if let Err(err) = client.publish_entity(siren_entity(bus, &siren.name)).await {
            warn!(%err, siren = %siren.name, "failed to publish siren discovery config");
        }
    }

    info!(
        sensors = registry.sensors.len(),
        sirens = registry.sirens.len(),
        "published Home Assistant discovery configs"
    );
}

pub fn discovery_prefix() -> &'static str {
    DISCOVERY_PREFIX
}
