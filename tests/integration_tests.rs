use alarm_panel::mqtt::alarm_control_panel::AlarmControlPanel;
use alarm_panel::mqtt::binary_sensor::{BinarySensor, BinarySensorDeviceClass};
use alarm_panel::mqtt::common::{Availability, Device, Origin};
use alarm_panel::mqtt::siren::Siren;
use alarm_panel::{Entity, HomeAssistantMqtt};
use assert_json_diff::assert_json_eq;
use rumqttc::v5::{
    mqttbytes::{v5::Packet, QoS::ExactlyOnce},
    AsyncClient,
    Event::Incoming,
    MqttOptions,
};
use serde_json::{json, Value};
use std::time::Duration;
use testcontainers_modules::{mosquitto, testcontainers::runners::AsyncRunner};
use tokio::task;

fn origin() -> Origin {
    Origin::new("Integration test").with_sw_version("0.0.1")
}

fn device() -> Device {
    Device::default()
        .name("Alarm Panel")
        .add_identifier("alarm-panel-home")
        .manufacturer("alarm-panel")
}

async fn publish_one(entity: Entity) -> (String, Value) {
    let mosquitto_container = mosquitto::Mosquitto::default().start().await.unwrap();

    let mqtt_options = MqttOptions::new(
        "test",
        "127.0.0.1",
        mosquitto_container.get_host_port_ipv4(1883).await.unwrap(),
    );
    let (client, mut eventloop) = AsyncClient::new(mqtt_options, 10);

    client
        .subscribe("#", ExactlyOnce)
        .await
        .expect("successful subscription to all topics");

    let ha = HomeAssistantMqtt::new(client.clone(), "homeassistant");
    task::spawn(async move {
        ha.publish_entity(entity).await.expect("message to be published");
        tokio::time::sleep(Duration::from_secs(2)).await;
        client.disconnect().await.expect("client to disconnect from mosquitto");
    });

    while let Ok(message) = eventloop.poll().await {
        if let Incoming(Packet::Publish(content)) = message {
            let topic = String::from_utf8(content.topic.to_vec()).expect("a valid UTF-8 topic");
            let payload_string =
                String::from_utf8(content.payload.to_vec()).expect("a valid UTF-8 string");
            return (topic, serde_json::from_str(&payload_string).expect("a valid json"));
        }
    }
    panic!("timeout waiting for expected message");
}

#[tokio::test]
async fn publishes_alarm_control_panel_discovery_config() {
    let entity: Entity = AlarmControlPanel::default()
        .origin(origin())
        .device(device())
        .availability(Availability::single_topic("home/alarm/status"))
        .unique_id("alarm-panel-home-panel")
        .name("Alarm Panel")
        .state_topic("home/alarm/alarm_state")
        .command_topic("home/alarm/set_mode")
        .supported_features(vec!["arm_home", "arm_away", "arm_night"])
        .into();

    let (topic, json) = publish_one(entity).await;

    assert_eq!(topic, "homeassistant/alarm_control_panel/alarm-panel-home-panel/config");
    assert_json_eq!(
        json,
        json!({
            "o": {"name": "Integration test", "sw": "0.0.1"},
            "dev": {"name": "Alarm Panel", "ids": ["alarm-panel-home"], "mf": "alarm-panel"},
            "avty_mode": "all",
            "avty": [{"t": "home/alarm/status"}],
            "uniq_id": "alarm-panel-home-panel",
            "name": "Alarm Panel",
            "stat_t": "home/alarm/alarm_state",
            "cmd_t": "home/alarm/set_mode",
            "sup_feat": ["arm_home", "arm_away", "arm_night"],
            "platform": "alarm_control_panel",
        })
    );
}

#[tokio::test]
async fn publishes_binary_sensor_discovery_config() {
    let entity: Entity = BinarySensor::default()
        .origin(origin())
        .device(device())
        .availability(Availability::single_topic("home/alarm/status"))
        .unique_id("alarm-panel-home-sensor-front_door")
        .name("front_door")
        .device_class(BinarySensorDeviceClass::Door)
        .state_topic("home/gateway/front_door")
        .into();

    let (topic, json) = publish_one(entity).await;

    assert_eq!(
        topic,
        "homeassistant/binary_sensor/alarm-panel-home-sensor-front_door/config"
    );
    assert_json_eq!(
        json,
        json!({
            "o": {"name": "Integration test", "sw": "0.0.1"},
            "dev": {"name": "Alarm Panel", "ids": ["alarm-panel-home"], "mf": "alarm-panel"},
            "avty_mode": "all",
            "avty": [{"t": "home/alarm/status"}],
            "uniq_id": "alarm-panel-home-sensor-front_door",
            "name": "front_door",
            "dev_cla": "door",
            "stat_t": "home/gateway/front_door",
        })
    );
}

#[tokio::test]
async fn publishes_siren_discovery_config() {
    let entity: Entity = Siren::default()
        .origin(origin())
        .device(device())
        .availability(Availability::single_topic("home/alarm/status"))
        .unique_id("alarm-panel-home-siren-siren1")
        .name("siren1")
        .support_duration(true)
        .state_topic("home/gateway/siren1")
        .command_topic("home/gateway/siren1/set")
        .into();

    let (topic, json) = publish_one(entity).await;

    assert_eq!(topic, "homeassistant/siren/alarm-panel-home-siren-siren1/config");
    assert_json_eq!(
        json,
        json!({
            "o": {"name": "Integration test", "sw": "0.0.1"},
            "dev": {"name": "Alarm Panel", "ids": ["alarm-panel-home"], "mf": "alarm-panel"},
            "avty_mode": "all",
            "avty": [{"t": "home/alarm/status"}],
            "uniq_id": "alarm-panel-home-siren-siren1",
            "name": "siren1",
            "sup_dur": true,
            "stat_t": "home/gateway/siren1",
            "cmd_t": "home/gateway/siren1/set",
        })
    );
}
