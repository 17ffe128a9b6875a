//! Circuit
//! Concrete types for the drawable content of one Logisim document.
//! The model is rebuilt from scratch on every parse and never mutated;
//! everything ambiguous about the file format is resolved here so the
//! renderer only ever sees uniform records.

pub mod extract;

use crate::transforms::SSPoint;
use euclid::Angle;

pub use extract::{load_circuit, ExtractError};

/// an undirected wire segment. carries no identity beyond its endpoints
/// and no electrical meaning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wire {
    pub from: SSPoint,
    pub to: SSPoint,
}

/// a named string-valued property attached to a component
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// cardinal orientation a component is drawn rotated to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    East,
    North,
    South,
    West,
}

impl Facing {
    /// unknown or absent text falls back to east
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("north") => Facing::North,
            Some("south") => Facing::South,
            Some("west") => Facing::West,
            _ => Facing::East,
        }
    }

    /// rotation applied to the glyph, in y-down canvas convention
    pub fn angle(self) -> Angle<f32> {
        match self {
            Facing::East => Angle::zero(),
            Facing::South => Angle::frac_pi_2(),
            Facing::West => Angle::pi(),
            Facing::North => -Angle::frac_pi_2(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::East => "east",
            Facing::North => "north",
            Facing::South => "south",
            Facing::West => "west",
        }
    }
}

/// the gate bodies the renderer can draw. NOR classifies to the OR body
/// with no output bubble; NAND matches no body at all and draws nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateKind {
    Not,
    And,
    Or,
    Xor,
}

/// closed enumeration of the component types the renderer knows how to
/// draw. a raw type name is classified exactly once, at extraction time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    Pin,
    Multiplexer,
    Splitter,
    Constant,
    HexDisplay,
    Gate(GateKind),
    Led,
    Adder,
    Subtractor,
    Comparator,
    /// anything else is drawn as nothing
    Unknown,
}

impl ComponentKind {
    pub fn classify(name: &str) -> Self {
        match name {
            "Pin" => ComponentKind::Pin,
            "Multiplexer" => ComponentKind::Multiplexer,
            "Splitter" => ComponentKind::Splitter,
            "Constant" => ComponentKind::Constant,
            "Hex Digit Display" => ComponentKind::HexDisplay,
            "LED" => ComponentKind::Led,
            "Adder" => ComponentKind::Adder,
            "Subtractor" => ComponentKind::Subtractor,
            "Comparator" => ComponentKind::Comparator,
            _ if name.contains("Gate") => {
                if name.contains("NOT") {
                    ComponentKind::Gate(GateKind::Not)
                } else if name.contains("AND") && !name.contains("NAND") {
                    ComponentKind::Gate(GateKind::And)
                } else if name.contains("XOR") {
                    ComponentKind::Gate(GateKind::Xor)
                } else if name.contains("OR") {
                    ComponentKind::Gate(GateKind::Or)
                } else {
                    ComponentKind::Unknown
                }
            }
            _ => ComponentKind::Unknown,
        }
    }

    /// every glyph rotates with facing except the hex digit display
    pub fn rotates(self) -> bool {
        !matches!(self, ComponentKind::HexDisplay)
    }
}

/// one placed component, with the render-time fields already resolved
/// from its attribute list
#[derive(Clone, Debug)]
pub struct Component {
    /// raw type name from the file, kept for the summary export
    pub name: String,
    pub kind: ComponentKind,
    pub loc: SSPoint,
    pub facing: Facing,
    pub width_bits: u32,
    pub label: String,
    pub value: String,
    pub is_output: bool,
    pub attrs: Vec<Attribute>,
}

impl Component {
    /// first-match attribute lookup by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// the entire drawable model for one document
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    pub wires: Vec<Wire>,
    pub components: Vec<Component>,
}

impl Circuit {
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty() && self.components.is_empty()
    }
}

/// placeholder digit string displayed by an input pin carrying no value:
/// one zero character per bit of width
pub fn placeholder_value(width_bits: u32) -> String {
    match width_bits {
        0 | 1 => String::from("0"),
        8 => String::from("00000000"),
        w => "0".repeat(w as usize),
    }
}

/// constant values always display with a `0x` prefix; normalizing an
/// already-prefixed value is a no-op
pub fn hex_prefixed(value: &str) -> String {
    if value.starts_with("0x") {
        value.to_string()
    } else {
        format!("0x{}", value)
    }
}
