//! end to end extraction tests over realistic project documents

use logiscope::circuit::{ComponentKind, Facing, GateKind};
use logiscope::transforms::SSPoint;
use logiscope::{load_circuit, CircuitSummary, ExtractError};

const SMALL_PROJECT: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<project source="3.8.0" version="1.0">
  <lib desc="#Wiring" name="0"/>
  <circuit name="main">
    <a name="circuit" val="main"/>
    <wire from="(160,120)" to="(240,120)"/>
    <wire from="(240,120)" to="(240,180)"/>
    <comp lib="0" loc="(160,120)" name="Pin">
      <a name="facing" val="east"/>
      <a name="width" val="4"/>
      <a name="label" val="data_in"/>
    </comp>
    <comp lib="0" loc="(240,180)" name="Pin">
      <a name="output" val="true"/>
      <a name="facing" val="west"/>
      <a name="label" val="q"/>
    </comp>
    <comp lib="1" loc="(320,140)" name="AND Gate"/>
  </circuit>
</project>
"##;

#[test]
fn wires_and_components_extracted() {
    let circuit = load_circuit(SMALL_PROJECT).unwrap();
    assert_eq!(circuit.wires.len(), 2);
    assert_eq!(circuit.components.len(), 3);
    assert_eq!(circuit.wires[0].from, SSPoint::new(160, 120));
    assert_eq!(circuit.wires[0].to, SSPoint::new(240, 120));
    assert_eq!(circuit.wires[1].to, SSPoint::new(240, 180));
}

#[test]
fn component_fields_resolved_from_attributes() {
    let circuit = load_circuit(SMALL_PROJECT).unwrap();
    let input = &circuit.components[0];
    assert_eq!(input.kind, ComponentKind::Pin);
    assert_eq!(input.loc, SSPoint::new(160, 120));
    assert_eq!(input.facing, Facing::East);
    assert_eq!(input.width_bits, 4);
    assert_eq!(input.label, "data_in");
    assert!(!input.is_output);

    let output = &circuit.components[1];
    assert!(output.is_output);
    assert_eq!(output.facing, Facing::West);
    assert_eq!(output.width_bits, 1);
}

#[test]
fn gate_names_classified_by_substring() {
    let circuit = load_circuit(SMALL_PROJECT).unwrap();
    assert_eq!(
        circuit.components[2].kind,
        ComponentKind::Gate(GateKind::And)
    );
}

#[test]
fn defaults_apply_when_attributes_absent() {
    let text = r#"<project><circuit name="main">
        <comp name="Pin" loc="(10,20)"/>
    </circuit></project>"#;
    let circuit = load_circuit(text).unwrap();
    let pin = &circuit.components[0];
    assert_eq!(pin.facing, Facing::East);
    assert_eq!(pin.width_bits, 1);
    assert_eq!(pin.label, "");
    assert_eq!(pin.value, "");
    assert!(!pin.is_output);
}

#[test]
fn non_numeric_width_falls_back_to_one() {
    let text = r#"<project><circuit name="main">
        <comp name="Pin" loc="(10,20)"><a name="width" val="wide"/></comp>
    </circuit></project>"#;
    let circuit = load_circuit(text).unwrap();
    assert_eq!(circuit.components[0].width_bits, 1);
}

#[test]
fn unknown_facing_falls_back_to_east() {
    let text = r#"<project><circuit name="main">
        <comp name="Pin" loc="(10,20)"><a name="facing" val="upward"/></comp>
    </circuit></project>"#;
    let circuit = load_circuit(text).unwrap();
    assert_eq!(circuit.components[0].facing, Facing::East);
}

#[test]
fn comp_without_location_is_skipped() {
    let text = r#"<project><circuit name="main">
        <comp name="Pin"/>
        <comp name="Pin" loc="(10,20)"/>
    </circuit></project>"#;
    let circuit = load_circuit(text).unwrap();
    assert_eq!(circuit.components.len(), 1);
}

#[test]
fn comp_without_name_is_skipped() {
    let text = r#"<project><circuit name="main">
        <comp loc="(10,20)"/>
    </circuit></project>"#;
    let circuit = load_circuit(text).unwrap();
    assert!(circuit.components.is_empty());
}

#[test]
fn wire_with_missing_endpoint_lands_at_origin() {
    let text = r#"<project><circuit name="main">
        <wire from="(30,40)"/>
    </circuit></project>"#;
    let circuit = load_circuit(text).unwrap();
    assert_eq!(circuit.wires[0].from, SSPoint::new(30, 40));
    assert_eq!(circuit.wires[0].to, SSPoint::origin());
}

#[test]
fn first_circuit_wins_in_multi_circuit_project() {
    let text = r#"<project>
        <circuit name="main"><wire from="(0,0)" to="(10,0)"/></circuit>
        <circuit name="other"><wire from="(0,0)" to="(10,0)"/><wire from="(10,0)" to="(20,0)"/></circuit>
    </project>"#;
    let circuit = load_circuit(text).unwrap();
    assert_eq!(circuit.wires.len(), 1);
}

#[test]
fn empty_circuit_is_empty_model() {
    let text = r#"<project><circuit name="main"/></project>"#;
    let circuit = load_circuit(text).unwrap();
    assert!(circuit.is_empty());
}

#[test]
fn missing_circuit_is_reported() {
    let text = r#"<project><lib name="0"/></project>"#;
    match load_circuit(text) {
        Err(ExtractError::MissingElement(name)) => assert_eq!(name, "circuit"),
        other => panic!("expected MissingElement, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn wrong_root_is_reported() {
    let text = r#"<workspace><circuit name="main"/></workspace>"#;
    match load_circuit(text) {
        Err(ExtractError::MissingElement(name)) => assert_eq!(name, "project"),
        other => panic!("expected MissingElement, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn malformed_xml_is_reported() {
    let text = "<project><circuit name=";
    assert!(matches!(load_circuit(text), Err(ExtractError::Xml(_))));
}

#[test]
fn single_entry_extracts_like_a_list_of_one() {
    let one = load_circuit(
        r#"<project><circuit>
            <wire from="(0,0)" to="(10,0)"/>
            <comp name="LED" loc="(20,0)"/>
        </circuit></project>"#,
    )
    .unwrap();
    let two = load_circuit(
        r#"<project><circuit>
            <wire from="(0,0)" to="(10,0)"/>
            <wire from="(10,0)" to="(20,0)"/>
            <comp name="LED" loc="(20,0)"/>
            <comp name="LED" loc="(30,0)"/>
        </circuit></project>"#,
    )
    .unwrap();
    assert_eq!(one.wires.len(), 1);
    assert_eq!(one.components.len(), 1);
    assert_eq!(one.wires[0], two.wires[0]);
    assert_eq!(one.components[0].kind, two.components[0].kind);
    assert_eq!(one.components[0].loc, two.components[0].loc);
}

#[test]
fn output_pin_scenario_reaches_the_glyph() {
    use logiscope::schematic::atoms::Primitive;
    use logiscope::schematic::glyphs;

    let circuit = load_circuit(SMALL_PROJECT).unwrap();
    let out = &circuit.components[1];
    assert!(out.is_output);

    let sym = glyphs::symbol(out);
    assert!(matches!(
        sym.atoms[0].primitive,
        Primitive::Circle { radius, .. } if radius == 10.0
    ));
    assert_eq!(sym.labels.len(), 1);
    assert_eq!(sym.labels[0].content, "q");
}

#[test]
fn summary_round_trips_through_json() {
    let circuit = load_circuit(SMALL_PROJECT).unwrap();
    let json = CircuitSummary::new(&circuit).to_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["components"].as_array().unwrap().len(), 3);
    assert_eq!(value["connections"].as_array().unwrap().len(), 2);
    assert_eq!(value["components"][0]["type"], "Pin");
    assert_eq!(value["components"][0]["location"][0], 160);
    assert_eq!(value["connections"][1]["to"], serde_json::json!([240, 180]));
}
