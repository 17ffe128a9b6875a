//! fixed drawing recipes, one per component kind.
//!
//! Geometry is given in glyph-local document units, y-down, with the
//! component's wire connection point at the origin; bodies extend
//! backward (negative x) from there. Only `width_bits`, `value`, `label`
//! and `is_output` parameterize a recipe.

use euclid::Angle;
use iced::alignment::Horizontal;
use iced::widget::canvas::LineCap;
use iced::Color;
use lazy_static::lazy_static;

use super::atoms::{
    Atom, FontStyle, LineStyle, PathEvent, Style, Symbol, TextAtom, BODY_FILL, OUTLINE, TEXT_COLOR,
};
use crate::circuit::{hex_prefixed, placeholder_value, Component, ComponentKind, GateKind};
use crate::transforms::VSPoint;

const PIN_RADIUS: f32 = 10.0;
const BUBBLE_RADIUS: f32 = 4.0;
const GATE_STROKE: f32 = 2.0;

const DIM_SEGMENT: Color = Color {
    r: 0.867,
    g: 0.867,
    b: 0.867,
    a: 1.0,
};
const ACTIVE_SEGMENT: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
const MUX_TEXT: Color = Color {
    r: 0.4,
    g: 0.4,
    b: 0.4,
    a: 1.0,
};

fn body_style(stroke_width: f32) -> Style {
    Style::outlined(BODY_FILL, stroke_width, OUTLINE)
}

fn text(content: impl Into<String>, anchor: VSPoint, size: f32, font: FontStyle) -> TextAtom {
    TextAtom {
        content: content.into(),
        anchor,
        size,
        color: TEXT_COLOR,
        font,
        h_align: Horizontal::Center,
    }
}

lazy_static! {
    /// root stub forking into two diagonal branches, drawn thick
    static ref SPLITTER_ATOMS: Vec<Atom> = vec![Atom::path(
        vec![
            PathEvent::MoveTo(VSPoint::new(0.0, 0.0)),
            PathEvent::LineTo(VSPoint::new(-10.0, 0.0)),
            PathEvent::LineTo(VSPoint::new(-20.0, -10.0)),
            PathEvent::MoveTo(VSPoint::new(-10.0, 0.0)),
            PathEvent::LineTo(VSPoint::new(-20.0, 10.0)),
        ],
        false,
        Style::stroked(3.0, OUTLINE, LineCap::Butt),
    )];

    /// seven-segment frame showing a static middle bar; never value-driven
    static ref HEX_DISPLAY_ATOMS: Vec<Atom> = {
        let dim = Style::filled(DIM_SEGMENT);
        vec![
            Atom::rect(VSPoint::new(-12.0, -20.0), 24.0, 40.0, body_style(1.0)),
            Atom::rect(VSPoint::new(-8.0, -16.0), 16.0, 4.0, dim), // top
            Atom::rect(VSPoint::new(-8.0, -2.0), 16.0, 4.0, dim),  // middle
            Atom::rect(VSPoint::new(-8.0, 12.0), 16.0, 4.0, dim),  // bottom
            Atom::rect(VSPoint::new(-10.0, -14.0), 4.0, 14.0, dim),
            Atom::rect(VSPoint::new(6.0, -14.0), 4.0, 14.0, dim),
            Atom::rect(VSPoint::new(-10.0, 0.0), 4.0, 14.0, dim),
            Atom::rect(VSPoint::new(6.0, 0.0), 4.0, 14.0, dim),
            // middle segment lit
            Atom::rect(VSPoint::new(-8.0, -2.0), 16.0, 4.0, Style::filled(ACTIVE_SEGMENT)),
        ]
    };

    /// D-shaped AND body: two straight sides closed by a half circle
    static ref AND_BODY: Vec<Atom> = vec![Atom::path(
        vec![
            PathEvent::MoveTo(VSPoint::new(-50.0, -25.0)),
            PathEvent::LineTo(VSPoint::new(-25.0, -25.0)),
            PathEvent::Arc {
                center: VSPoint::new(-25.0, 0.0),
                radius: 25.0,
                start: Angle::degrees(-90.0),
                end: Angle::degrees(90.0),
            },
            PathEvent::LineTo(VSPoint::new(-50.0, 25.0)),
        ],
        true,
        body_style(GATE_STROKE),
    )];

    /// curved shield shared by OR and XOR
    static ref OR_BODY: Vec<Atom> = vec![Atom::path(
        vec![
            PathEvent::MoveTo(VSPoint::new(-50.0, -25.0)),
            PathEvent::QuadTo {
                ctrl: VSPoint::new(-25.0, -25.0),
                to: VSPoint::new(0.0, 0.0),
            },
            PathEvent::QuadTo {
                ctrl: VSPoint::new(-25.0, 25.0),
                to: VSPoint::new(-50.0, 25.0),
            },
            PathEvent::QuadTo {
                ctrl: VSPoint::new(-40.0, 0.0),
                to: VSPoint::new(-50.0, -25.0),
            },
        ],
        false,
        body_style(GATE_STROKE),
    )];

    /// the one extra curve drawn behind an XOR body
    static ref XOR_TAIL: Atom = Atom::path(
        vec![
            PathEvent::MoveTo(VSPoint::new(-56.0, -25.0)),
            PathEvent::QuadTo {
                ctrl: VSPoint::new(-46.0, 0.0),
                to: VSPoint::new(-56.0, 25.0),
            },
        ],
        false,
        Style::stroked(GATE_STROKE, OUTLINE, LineCap::Round),
    );
}

/// build the glyph for one component. unknown kinds produce an empty
/// symbol and are thereby skipped
pub fn symbol(comp: &Component) -> Symbol {
    let mut sym = match comp.kind {
        ComponentKind::Pin => pin(comp),
        ComponentKind::Multiplexer => multiplexer(comp.width_bits),
        ComponentKind::Splitter => Symbol {
            atoms: SPLITTER_ATOMS.clone(),
            ..Symbol::default()
        },
        ComponentKind::Constant => constant(&comp.value),
        ComponentKind::HexDisplay => Symbol {
            atoms: HEX_DISPLAY_ATOMS.clone(),
            rotates: false,
            ..Symbol::default()
        },
        ComponentKind::Gate(gate) => self::gate(gate),
        ComponentKind::Led => led(&comp.label),
        ComponentKind::Adder => arith_box("+", 24.0),
        ComponentKind::Subtractor => arith_box("-", 24.0),
        ComponentKind::Comparator => arith_box("Comp", 14.0),
        ComponentKind::Unknown => Symbol::default(),
    };
    debug_assert!(sym.rotates || matches!(comp.kind, ComponentKind::HexDisplay));
    if matches!(comp.kind, ComponentKind::Pin) && !comp.label.is_empty() {
        sym.labels.push(TextAtom {
            content: comp.label.clone(),
            anchor: VSPoint::new(-20.0, -15.0),
            size: 12.0,
            color: TEXT_COLOR,
            font: FontStyle::SansBold,
            h_align: Horizontal::Center,
        });
    }
    sym
}

fn pin(comp: &Component) -> Symbol {
    let mut sym = Symbol::default();
    if comp.is_output {
        sym.atoms.push(Atom::circle(
            VSPoint::origin(),
            PIN_RADIUS,
            body_style(1.0),
        ));
        if comp.width_bits > 1 {
            let n = comp.width_bits.min(4) as usize;
            sym.texts
                .push(text("x".repeat(n), VSPoint::origin(), 10.0, FontStyle::Mono));
        }
    } else {
        let box_width = comp.width_bits as f32 * 7.0 + 10.0;
        sym.atoms.push(Atom::rect(
            VSPoint::new(-box_width, -10.0),
            box_width,
            20.0,
            body_style(1.0),
        ));
        let shown = if comp.value.is_empty() {
            placeholder_value(comp.width_bits)
        } else {
            comp.value.clone()
        };
        sym.texts.push(TextAtom {
            content: shown,
            anchor: VSPoint::new(-5.0, 1.0),
            size: 12.0,
            color: TEXT_COLOR,
            font: FontStyle::Mono,
            h_align: Horizontal::Right,
        });
    }
    sym
}

fn multiplexer(width_bits: u32) -> Symbol {
    // wider data buses render a taller body
    let h = if width_bits > 1 { 50.0 } else { 40.0 };
    let mut sym = Symbol::default();
    sym.atoms.push(Atom::polygon(
        &[
            VSPoint::new(0.0, 0.0), // output tip
            VSPoint::new(-10.0, -10.0),
            VSPoint::new(-40.0, -h / 2.0),
            VSPoint::new(-40.0, h / 2.0),
            VSPoint::new(-10.0, 10.0),
        ],
        body_style(1.0),
    ));
    sym.texts.push(TextAtom {
        content: String::from("MUX"),
        anchor: VSPoint::new(-25.0, 0.0),
        size: 10.0,
        color: MUX_TEXT,
        font: FontStyle::Sans,
        h_align: Horizontal::Center,
    });
    sym
}

fn constant(value: &str) -> Symbol {
    let mut sym = Symbol::default();
    sym.atoms.push(Atom::rect(
        VSPoint::new(-15.0, -10.0),
        30.0,
        20.0,
        body_style(1.0),
    ));
    sym.texts.push(text(
        hex_prefixed(value),
        VSPoint::new(0.0, 1.0),
        11.0,
        FontStyle::Mono,
    ));
    sym
}

fn gate(kind: GateKind) -> Symbol {
    let mut sym = Symbol::default();
    match kind {
        GateKind::Not => {
            sym.atoms.push(Atom::polygon(
                &[
                    VSPoint::new(0.0, 0.0),
                    VSPoint::new(-20.0, -10.0),
                    VSPoint::new(-20.0, 10.0),
                ],
                body_style(GATE_STROKE),
            ));
            // output bubble at the tip
            sym.atoms.push(Atom::circle(
                VSPoint::origin(),
                BUBBLE_RADIUS,
                body_style(GATE_STROKE),
            ));
        }
        GateKind::And => sym.atoms.extend(AND_BODY.iter().cloned()),
        GateKind::Or => sym.atoms.extend(OR_BODY.iter().cloned()),
        GateKind::Xor => {
            sym.atoms.extend(OR_BODY.iter().cloned());
            sym.atoms.push(XOR_TAIL.clone());
        }
    }
    sym
}

fn led(label: &str) -> Symbol {
    let mut sym = Symbol::default();
    sym.atoms.push(Atom::circle(
        VSPoint::origin(),
        PIN_RADIUS,
        Style {
            fill: Some(ACTIVE_SEGMENT),
            stroke: Some(LineStyle {
                width: GATE_STROKE,
                color: OUTLINE,
                cap: LineCap::Round,
            }),
        },
    ));
    if !label.is_empty() {
        sym.labels.push(TextAtom {
            content: label.to_string(),
            anchor: VSPoint::new(15.0, 0.0),
            size: 10.0,
            color: TEXT_COLOR,
            font: FontStyle::Sans,
            h_align: Horizontal::Left,
        });
    }
    sym
}

/// Adder, Subtractor and Comparator share one 40x40 box and differ only
/// by the printed glyph
fn arith_box(caption: &str, size: f32) -> Symbol {
    let mut sym = Symbol::default();
    sym.atoms.push(Atom::rect(
        VSPoint::new(-20.0, -20.0),
        40.0,
        40.0,
        body_style(GATE_STROKE),
    ));
    let anchor = if size > 20.0 {
        VSPoint::new(0.0, 2.0)
    } else {
        VSPoint::new(0.0, 0.0)
    };
    sym.texts.push(text(caption, anchor, size, FontStyle::Sans));
    sym
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Attribute, Facing};
    use crate::schematic::atoms::Primitive;
    use crate::transforms::SSPoint;

    fn comp(kind_name: &str) -> Component {
        Component {
            name: kind_name.to_string(),
            kind: ComponentKind::classify(kind_name),
            loc: SSPoint::origin(),
            facing: Facing::East,
            width_bits: 1,
            label: String::new(),
            value: String::new(),
            is_output: false,
            attrs: Vec::<Attribute>::new(),
        }
    }

    fn rects(sym: &Symbol) -> Vec<(f32, f32, f32, f32)> {
        sym.atoms
            .iter()
            .filter_map(|a| match a.primitive {
                Primitive::Rect { min, width, height } => Some((min.x, min.y, width, height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn output_pin_is_a_circle_without_text_at_width_one() {
        let mut c = comp("Pin");
        c.is_output = true;
        let sym = symbol(&c);
        assert_eq!(sym.atoms.len(), 1);
        assert!(matches!(
            sym.atoms[0].primitive,
            Primitive::Circle { radius, .. } if radius == PIN_RADIUS
        ));
        assert!(sym.texts.is_empty());
        assert!(sym.rotates);
    }

    #[test]
    fn output_pin_placeholder_caps_at_four_characters() {
        let mut c = comp("Pin");
        c.is_output = true;
        c.width_bits = 6;
        let sym = symbol(&c);
        assert_eq!(sym.texts[0].content, "xxxx");
        c.width_bits = 3;
        assert_eq!(symbol(&c).texts[0].content, "xxx");
    }

    #[test]
    fn input_pin_box_width_scales_with_bits() {
        let mut c = comp("Pin");
        for bits in [1u32, 4, 8] {
            c.width_bits = bits;
            let sym = symbol(&c);
            let w = bits as f32 * 7.0 + 10.0;
            assert_eq!(rects(&sym), vec![(-w, -10.0, w, 20.0)]);
            assert_eq!(sym.texts[0].content, placeholder_value(bits));
            assert_eq!(sym.texts[0].h_align, Horizontal::Right);
        }
    }

    #[test]
    fn input_pin_shows_value_over_placeholder() {
        let mut c = comp("Pin");
        c.width_bits = 4;
        c.value = String::from("1010");
        assert_eq!(symbol(&c).texts[0].content, "1010");
    }

    #[test]
    fn pin_label_never_rotates() {
        let mut c = comp("Pin");
        c.label = String::from("CLK");
        let sym = symbol(&c);
        assert_eq!(sym.labels.len(), 1);
        assert_eq!(sym.labels[0].content, "CLK");
        assert_eq!(sym.labels[0].font, FontStyle::SansBold);
        // in texts it would rotate with the body
        assert!(sym.texts.iter().all(|t| t.content != "CLK"));
    }

    #[test]
    fn multiplexer_grows_with_bus_width() {
        let narrow = multiplexer(1);
        let wide = multiplexer(8);
        let back_y = |sym: &Symbol| match &sym.atoms[0].primitive {
            Primitive::Path { events, .. } => match events[2] {
                PathEvent::LineTo(p) => p.y,
                _ => panic!("expected back corner"),
            },
            _ => panic!("expected trapezoid path"),
        };
        assert_eq!(back_y(&narrow), -20.0);
        assert_eq!(back_y(&wide), -25.0);
        assert_eq!(narrow.texts[0].content, "MUX");
    }

    #[test]
    fn constant_text_is_prefix_normalized() {
        assert_eq!(constant("1").texts[0].content, "0x1");
        assert_eq!(constant("0x1").texts[0].content, "0x1");
        assert_eq!(constant("1").texts[0].content, constant("0x1").texts[0].content);
    }

    #[test]
    fn splitter_strokes_thick() {
        let sym = symbol(&comp("Splitter"));
        let style = sym.atoms[0].style;
        assert!(style.fill.is_none());
        let stroke = style.stroke.unwrap();
        assert_eq!(stroke.width, 3.0);
        assert_eq!(stroke.cap, LineCap::Butt);
    }

    #[test]
    fn hex_display_is_orientation_invariant() {
        let sym = symbol(&comp("Hex Digit Display"));
        assert!(!sym.rotates);
        // frame + 7 dim segments + 1 lit middle
        assert_eq!(sym.atoms.len(), 9);
        let lit = sym.atoms.last().unwrap();
        assert_eq!(lit.style.fill, Some(ACTIVE_SEGMENT));
    }

    #[test]
    fn not_gate_carries_a_bubble_and_gate_does_not() {
        let not = symbol(&comp("NOT Gate"));
        assert!(not
            .atoms
            .iter()
            .any(|a| matches!(a.primitive, Primitive::Circle { radius, .. } if radius == BUBBLE_RADIUS)));
        let and = symbol(&comp("AND Gate"));
        assert!(!and
            .atoms
            .iter()
            .any(|a| matches!(a.primitive, Primitive::Circle { .. })));
    }

    #[test]
    fn nand_draws_nothing_while_nor_renders_as_or() {
        assert!(symbol(&comp("NAND Gate")).is_empty());
        assert_eq!(symbol(&comp("NOR Gate")), symbol(&comp("OR Gate")));
    }

    #[test]
    fn xor_adds_one_tail_curve_behind_or() {
        let or = symbol(&comp("OR Gate"));
        let xor = symbol(&comp("XOR Gate"));
        assert_eq!(xor.atoms.len(), or.atoms.len() + 1);
        assert_eq!(xor.atoms[..or.atoms.len()], or.atoms[..]);
    }

    #[test]
    fn led_strokes_like_a_gate_with_a_small_plain_label() {
        let mut c = comp("LED");
        c.label = String::from("out");
        let sym = symbol(&c);
        let stroke = sym.atoms[0].style.stroke.unwrap();
        assert_eq!(stroke.width, GATE_STROKE);
        assert_eq!(sym.atoms[0].style.fill, Some(ACTIVE_SEGMENT));
        assert_eq!(sym.labels[0].size, 10.0);
        assert_eq!(sym.labels[0].font, FontStyle::Sans);
        assert_eq!(sym.labels[0].h_align, Horizontal::Left);
    }

    #[test]
    fn arith_boxes_stroke_like_gates() {
        let sym = symbol(&comp("Adder"));
        let stroke = sym.atoms[0].style.stroke.unwrap();
        assert_eq!(stroke.width, GATE_STROKE);
    }

    #[test]
    fn arith_boxes_differ_only_by_caption() {
        let add = symbol(&comp("Adder"));
        let sub = symbol(&comp("Subtractor"));
        let cmp = symbol(&comp("Comparator"));
        assert_eq!(add.atoms, sub.atoms);
        assert_eq!(add.atoms, cmp.atoms);
        assert_eq!(add.texts[0].content, "+");
        assert_eq!(sub.texts[0].content, "-");
        assert_eq!(cmp.texts[0].content, "Comp");
    }

    #[test]
    fn unknown_kinds_draw_nothing() {
        assert!(symbol(&comp("Register")).is_empty());
        assert!(symbol(&comp("Buffer Gate")).is_empty());
    }
}
