//! Bus adapter: wraps `rumqttc`'s v5 async client, owns topic subscription
//! and publication, and translates actuator commands from the state
//! machine into gateway payloads.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use rumqttc::v5::mqttbytes::v5::{ConnectReturnCode, LastWill, Packet};
use rumqttc::v5::mqttbytes::QoS;
use rumqttc::v5::{AsyncClient, Event, EventLoop, MqttOptions};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::{BusConfig, Registry};
use crate::discovery;
use crate::error::BusError;
use crate::events::PanelEvent;
use crate::router::{self, DeviceClass};
use crate::state_machine::ActuatorCommand;
use crate::HomeAssistantMqtt;

fn qos_from(value: u8) -> QoS {
    match value {
        0 => QoS::AtMostOnce,
        2 => QoS::ExactlyOnce,
        _ => QoS::AtLeastOnce,
    }
}

/// Owns the MQTT client/eventloop pair and the topic routing table derived
/// from the registry. Reconnection and re-subscription are handled by
/// [`Bus::run`]; actuator publishing happens through the handle returned
/// by [`Bus::actuators`].
pub struct Bus {
    client: AsyncClient,
    eventloop: EventLoop,
    config: BusConfig,
}

impl Bus {
    pub fn connect(config: BusConfig) -> Self {
        let mut options = MqttOptions::new("alarm-panel", config.host.clone(), config.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            options.set_credentials(user.clone(), password.clone());
        }
        options.set_last_will(LastWill::new(
            format!("{}/status", config.base_topic),
            "offline",
            qos_from(config.qos),
            true,
            None,
        ));
        let (client, eventloop) = AsyncClient::new(options, 64);
        Self {
            client,
            eventloop,
            config,
        }
    }

    pub fn client(&self) -> AsyncClient {
        self.client.clone()
    }

    pub fn discovery_client(&self) -> HomeAssistantMqtt {
        HomeAssistantMqtt::new(self.client.clone(), discovery::discovery_prefix())
    }

    /// Hand out a lightweight publish-only handle sharing this bus's
    /// client connection. Needed because [`Bus::run`] consumes `self` to
    /// drive the eventloop, while actuator publishing only ever needs the
    /// client half and must keep running in its own task.
    pub fn actuators(&self) -> Actuators {
        Actuators {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }

    async fn subscribe_all(
        client: &AsyncClient,
        config: &BusConfig,
        registry: &Registry,
    ) -> Result<(), BusError> {
        let base = &config.base_topic;
        let gateway = &config.gateway_topic;
        let qos = qos_from(config.qos);

        let mut topics = vec![format!("{base}/set_mode"), format!("{base}/reload_config")];
        for sensor in &registry.sensors {
            topics.push(format!("{gateway}/{}", sensor.name));
        }
        for keypad in &registry.keypads {
            topics.push(format!("{gateway}/{}", keypad.name));
        }
        for fob in &registry.keyfobs {
            topics.push(format!("{gateway}/{}", fob.name));
        }
        for button in &registry.buttons {
            topics.push(format!("{gateway}/{}", button.name));
        }

        for topic in topics {
            client
                .subscribe(&topic, qos)
                .await
                .map_err(|source| BusError::Subscribe { topic, source })?;
        }
        Ok(())
    }

    async fn announce_online(client: &AsyncClient, config: &BusConfig) -> Result<(), BusError> {
        let topic = format!("{}/status", config.base_topic);
        client
            .publish(&topic, qos_from(config.qos), true, "online")
            .await
            .map_err(|source| BusError::Publish { topic, source })
    }

    /// Resolve which device class a gateway topic's trailing segment maps
    /// to, by looking it up against every device list. A device configured
    /// under multiple roles is not supported; the first match wins.
    fn classify(registry: &Registry, device: &str) -> Option<DeviceClass> {
        if registry.sensor(device).is_some() {
            Some(DeviceClass::Sensor)
        } else if registry.is_keypad(device) {
            Some(DeviceClass::Keypad)
        } else if registry.keyfob(device).is_some() {
            Some(DeviceClass::Keyfob)
        } else if registry.button(device).is_some() {
            Some(DeviceClass::Button)
        } else {
            None
        }
    }

    /// Drive the event loop, translating inbound publishes into
    /// [`PanelEvent`]s pushed onto `ingress`, and re-subscribing whenever
    /// the broker connection is (re-)established. Runs until the process
    /// is torn down; reconnection is left to the client library.
    pub async fn run(mut self, registry: Arc<RwLock<Registry>>, ingress: mpsc::Sender<PanelEvent>) {
        let base_topic = self.config.base_topic.clone();
        let gateway_topic = self.config.gateway_topic.clone();
        // Per the BusError policy: a connect failure is fatal before the
        // first successful ConnAck, and merely logged (the client library
        // reconnects on its own) afterward.
        let mut connected_once = false;

        loop {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    if ack.code != ConnectReturnCode::Success {
                        if !connected_once {
                            error!(?ack.code, "MQTT broker rejected connection on startup");
                            std::process::exit(1);
                        }
                        error!(?ack.code, "MQTT broker rejected connection");
                        continue;
                    }
                    connected_once = true;
                    let snapshot = registry.read().unwrap().clone();
                    if let Err(err) = Self::subscribe_all(&self.client, &self.config, &snapshot).await {
                        error!(%err, "failed to (re-)subscribe after connect");
                    }
                    if let Err(err) = Self::announce_online(&self.client, &self.config).await {
                        error!(%err, "failed to publish online status");
                    }
                    info!("connected to MQTT broker and subscribed");
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let topic = String::from_utf8_lossy(&publish.topic).to_string();
                    let Ok(text) = std::str::from_utf8(&publish.payload) else {
                        warn!(topic, "publish payload is not valid UTF-8; dropped");
                        continue;
                    };
                    let payload: Value = match serde_json::from_str(text) {
                        Ok(v) => v,
                        Err(_) if text.trim().is_empty() => Value::Null,
                        Err(source) => {
                            warn!(topic, %source, "payload is not valid JSON; dropped");
                            continue;
                        }
                    };

                    let event = if topic == format!("{base_topic}/set_mode") {
                        let snapshot = registry.read().unwrap();
                        router::route_set_mode(&snapshot, &payload)
                    } else if topic == format!("{base_topic}/reload_config") {
                        Some(router::route_reload())
                    } else if let Some(device) = topic.strip_prefix(&format!("{gateway_topic}/")) {
                        let snapshot = registry.read().unwrap();
                        match Self::classify(&snapshot, device) {
                            Some(class) => router::route_device_event(&snapshot, class, device, &payload),
                            None => {
                                debug!(topic, "message from an unrecognized device; dropped");
                                None
                            }
                        }
                    } else {
                        debug!(topic, "message on an unsubscribed topic; dropped");
                        None
                    };

                    if let Some(event) = event {
                        if ingress.send(event).await.is_err() {
                            error!("dispatch loop ingress queue closed; shutting down bus task");
                            return;
                        }
                    }
                }
                Ok(_) => {}
                Err(source) => {
                    if !connected_once {
                        error!(
                            host = %self.config.host,
                            port = self.config.port,
                            %source,
                            "failed to connect to MQTT broker on startup"
                        );
                        std::process::exit(1);
                    }
                    error!(%source, "MQTT connection error; client library will reconnect");
                }
            }
        }
    }

}

/// Publish-only handle sharing a [`Bus`]'s client connection. Carries the
/// actuator side of the adapter (translating [`ActuatorCommand`]s into
/// gateway payloads) so it can run in its own task independent of the
/// eventloop-owning [`Bus::run`].
#[derive(Clone)]
pub struct Actuators {
    client: AsyncClient,
    config: BusConfig,
}

impl Actuators {
    /// Drain actuator commands emitted by the state machine and publish
    /// them as gateway payloads. Runs alongside [`Bus::run`] for the
    /// lifetime of the process.
    pub async fn run(
        &self,
        mut commands: mpsc::Receiver<ActuatorCommand>,
        registry: Arc<RwLock<Registry>>,
    ) {
        let qos = qos_from(self.config.qos);
        while let Some(command) = commands.recv().await {
            match command {
                ActuatorCommand::KeypadLed { keypad, verb } => {
                    self.publish_keypad_led(&keypad, verb, qos).await;
                }
                ActuatorCommand::KeypadLedAll { verb } => {
                    let keypads: Vec<String> = registry
                        .read()
                        .unwrap()
                        .keypads
                        .iter()
                        .map(|k| k.name.clone())
                        .collect();
                    for keypad in keypads {
                        self.publish_keypad_led(&keypad, verb, qos).await;
                    }
                }
                ActuatorCommand::SirenStart { siren, duration_s } => {
                    let topic = format!("{}/{}/set", self.config.gateway_topic, siren);
                    let payload = json!({"warning": {"mode": "emergency", "strobe": "false", "duration": duration_s.to_string()}});
                    self.publish(&topic, &payload, qos).await;
                }
                ActuatorCommand::SirenStop { siren } => {
                    let topic = format!("{}/{}/set", self.config.gateway_topic, siren);
                    let payload = json!({"warning": {"mode": "stop", "strobe": "false", "duration": "0"}});
                    self.publish(&topic, &payload, qos).await;
                }
                ActuatorCommand::PublishState { state } => {
                    let topic = format!("{}/alarm_state", self.config.base_topic);
                    let payload = Value::String(state.as_str().to_string());
                    self.publish(&topic, &payload, qos).await;
                }
            }
        }
    }

    async fn publish_keypad_led(&self, keypad: &str, verb: &'static str, qos: QoS) {
        let topic = format!("{}/{}/set", self.config.gateway_topic, keypad);
        let payload = json!({"arm_mode": {"mode": verb}});
        self.publish(&topic, &payload, qos).await;
    }

    async fn publish(&self, topic: &str, payload: &Value, qos: QoS) {
        let body = payload.to_string();
        if let Err(source) = self.client.publish(topic, qos, topic.ends_with("alarm_state"), body).await {
            error!(
                error = %BusError::Publish { topic: topic.to_string(), source },
                "actuator publish failed"
            );
        }
    }

    pub async fn publish_offline(&self) {
        let topic = format!("{}/status", self.config.base_topic);
        if let Err(source) = self.client.publish(&topic, qos_from(self.config.qos), true, "offline").await {
            error!(error = %BusError::Publish { topic, source }, "failed to publish offline status on shutdown");
        }
    }
}
