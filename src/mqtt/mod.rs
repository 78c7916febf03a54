pub mod alarm_control_panel;
pub mod binary_sensor;
pub mod common;
pub mod siren;
