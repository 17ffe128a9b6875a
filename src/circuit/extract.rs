//! XML document -> Circuit model extraction.
//!
//! A Logisim project file nests `project` > `circuit`, with `wire`
//! elements (`from`/`to` coordinate pairs) and `comp` elements (`name`,
//! `loc`, nested `a` name/val attributes). The DOM iterates repeated
//! elements uniformly, so one element and a list of one extract
//! identically; nothing singular-vs-plural survives past this module.

use roxmltree::{Document, Node};
use thiserror::Error;

use super::{Attribute, Circuit, Component, ComponentKind, Facing, Wire};
use crate::transforms::parse_point;

/// the two ways extraction can fail. anything less (a wire without
/// endpoints, a comp without a location) is tolerated silently
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("not a Logisim project: no <{0}> element")]
    MissingElement(&'static str),
}

/// parse raw document text into the drawable model
pub fn load_circuit(text: &str) -> Result<Circuit, ExtractError> {
    let doc = Document::parse(text)?;
    let project = doc.root_element();
    if project.tag_name().name() != "project" {
        return Err(ExtractError::MissingElement("project"));
    }
    // multi-circuit projects exist; the previewer shows the first
    let circuit = project
        .children()
        .find(|n| n.has_tag_name("circuit"))
        .ok_or(ExtractError::MissingElement("circuit"))?;

    let mut wires = Vec::new();
    let mut components = Vec::new();
    for node in circuit.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "wire" => wires.push(Wire {
                from: parse_point(node.attribute("from")),
                to: parse_point(node.attribute("to")),
            }),
            "comp" => {
                if let Some(comp) = extract_component(node) {
                    components.push(comp);
                }
            }
            _ => {}
        }
    }
    Ok(Circuit { wires, components })
}

/// a comp without a type name or a location cannot be drawn and is skipped
fn extract_component(node: Node) -> Option<Component> {
    let name = node.attribute("name")?;
    let loc = parse_point(Some(node.attribute("loc")?));

    let attrs: Vec<Attribute> = node
        .children()
        .filter(|n| n.has_tag_name("a"))
        .filter_map(|a| {
            Some(Attribute {
                name: a.attribute("name")?.to_string(),
                value: a.attribute("val")?.to_string(),
            })
        })
        .collect();

    let lookup = |key: &str| attrs.iter().find(|a| a.name == key).map(|a| a.value.as_str());
    let facing = Facing::parse(lookup("facing"));
    let width_bits = lookup("width").and_then(|w| w.parse().ok()).unwrap_or(1);
    let label = lookup("label").unwrap_or_default().to_string();
    let value = lookup("value").unwrap_or_default().to_string();
    let is_output = lookup("output") == Some("true");

    Some(Component {
        name: name.to_string(),
        kind: ComponentKind::classify(name),
        loc,
        facing,
        width_bits,
        label,
        value,
        is_output,
        attrs,
    })
}
