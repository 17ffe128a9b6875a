//! serializable snapshot of a circuit model, for the viewer's
//! copy-as-JSON command. Field names follow the document vocabulary
//! rather than the internal model.

use serde::Serialize;

use crate::circuit::{Circuit, Component, Wire};

#[derive(Clone, Debug, Serialize)]
pub struct ComponentSummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: [i32; 2],
    pub label: String,
    pub facing: String,
    pub width: u32,
    pub output: bool,
    pub value: String,
}

impl From<&Component> for ComponentSummary {
    fn from(c: &Component) -> Self {
        ComponentSummary {
            kind: c.name.clone(),
            location: [c.loc.x, c.loc.y],
            label: c.label.clone(),
            facing: c.facing.as_str().to_string(),
            width: c.width_bits,
            output: c.is_output,
            value: c.value.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ConnectionSummary {
    pub from: [i32; 2],
    pub to: [i32; 2],
}

impl From<&Wire> for ConnectionSummary {
    fn from(w: &Wire) -> Self {
        ConnectionSummary {
            from: [w.from.x, w.from.y],
            to: [w.to.x, w.to.y],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CircuitSummary {
    pub components: Vec<ComponentSummary>,
    pub connections: Vec<ConnectionSummary>,
}

impl CircuitSummary {
    pub fn new(circuit: &Circuit) -> Self {
        CircuitSummary {
            components: circuit.components.iter().map(Into::into).collect(),
            connections: circuit.wires.iter().map(Into::into).collect(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serialize of plain structs and vecs cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
