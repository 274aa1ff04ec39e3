//! Named event containers: scenes and external sheets.

use crate::event::EventNode;
use serde::{Deserialize, Serialize};

/// Anything that owns a named root event list.
pub trait EventSheet {
    fn name(&self) -> &str;

    fn events(&self) -> &[EventNode];
}

/// One unit of visual-scripting logic (a level, a menu).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub events: Vec<EventNode>,
}

/// A reusable event tree included into scenes or other sheets by links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSheet {
    pub name: String,
    #[serde(default)]
    pub events: Vec<EventNode>,
}

impl Scene {
    pub fn new(name: impl Into<String>, events: Vec<EventNode>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

impl ExternalSheet {
    pub fn new(name: impl Into<String>, events: Vec<EventNode>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

impl EventSheet for Scene {
    fn name(&self) -> &str {
        &self.name
    }

    fn events(&self) -> &[EventNode] {
        &self.events
    }
}

impl EventSheet for ExternalSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn events(&self) -> &[EventNode] {
        &self.events
    }
}
