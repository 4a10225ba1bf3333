use crate::config::EntityConfig;

use super::EverbluMeterComponent;

macro_rules! entity_handle {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            config: EntityConfig,
        }

        impl $name {
            pub fn new(config: EntityConfig) -> Self {
                $name { config }
            }

            pub fn id(&self) -> &str {
                &self.config.id
            }

            pub fn config(&self) -> &EntityConfig {
                &self.config
            }
        }
    };
}

entity_handle!(Sensor);
entity_handle!(TextSensor);
entity_handle!(BinarySensor);

/// Button that asks its parent component for a manual read or a frequency scan.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerButton {
    config: EntityConfig,
    parent: Option<String>,
    frequency_scan: bool,
}

impl TriggerButton {
    pub fn new(config: EntityConfig) -> Self {
        TriggerButton {
            config,
            parent: None,
            frequency_scan: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    pub fn set_parent(&mut self, parent_id: &str) {
        self.parent = Some(parent_id.to_string());
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn set_frequency_scan(&mut self, is_frequency_scan: bool) {
        self.frequency_scan = is_frequency_scan;
    }

    pub fn is_frequency_scan(&self) -> bool {
        self.frequency_scan
    }

    pub fn press(&self, component: &mut EverbluMeterComponent) {
        match self.parent.as_deref() {
            None => log::warn!("Trigger button '{}' pressed but parent not set", self.id()),
            Some(parent) if parent != component.id() => log::warn!(
                "Trigger button '{}' belongs to '{}', not '{}'",
                self.id(),
                parent,
                component.id()
            ),
            Some(_) if self.frequency_scan => component.request_frequency_scan(),
            Some(_) => component.request_manual_read(),
        }
    }
}
