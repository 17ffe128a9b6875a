//! Schematic
//! Stateless rendering of a circuit model onto an iced canvas frame.
//! Drawing is a pure function of (circuit, transform): the whole picture
//! is re-issued on every pass, wires first, then components in document
//! order, later entries on top.

pub mod atoms;
pub mod glyphs;

use euclid::Angle;
use iced::alignment::Vertical;
use iced::widget::canvas::path::{self, Builder};
use iced::widget::canvas::{self, stroke, Frame, LineCap, Path, Stroke, Text};

use crate::circuit::{Circuit, Component, Wire};
use crate::transforms::{placement, ssp_to_vsp, Point, VCTransform, VSBox, VSPoint, VVTransform};
use atoms::{Atom, PathEvent, Primitive, Style, TextAtom};

/// trait for element which can be drawn on canvas
pub trait Drawable {
    /// wire stroke width, document units
    const WIRE_WIDTH: f32 = 2.0;
    /// radius of the filled dot at each wire endpoint
    const SOLDER_RADIUS: f32 = 3.0;
    fn draw(&self, vct: VCTransform, vcscale: f32, frame: &mut Frame);
}

impl Drawable for Wire {
    fn draw(&self, vct: VCTransform, vcscale: f32, frame: &mut Frame) {
        let from = vct.transform_point(ssp_to_vsp(self.from));
        let to = vct.transform_point(ssp_to_vsp(self.to));
        let stroke = Stroke {
            width: (Self::WIRE_WIDTH * vcscale).max(1.0),
            style: stroke::Style::Solid(atoms::OUTLINE),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        frame.stroke(
            &Path::line(Point::from(from).into(), Point::from(to).into()),
            stroke,
        );
        for end in [from, to] {
            frame.fill(
                &Path::circle(Point::from(end).into(), Self::SOLDER_RADIUS * vcscale),
                canvas::Fill {
                    style: canvas::Style::Solid(atoms::OUTLINE),
                    ..canvas::Fill::default()
                },
            );
        }
    }
}

impl Drawable for Component {
    fn draw(&self, vct: VCTransform, vcscale: f32, frame: &mut Frame) {
        let sym = glyphs::symbol(self);
        if sym.is_empty() {
            return;
        }
        let rot = if sym.rotates {
            self.facing.angle()
        } else {
            Angle::zero()
        };
        let vsp = ssp_to_vsp(self.loc);
        let vct_sym = placement(vsp, rot).then(&vct);
        for atom in &sym.atoms {
            draw_atom(atom, vct_sym, vcscale, rot, frame);
        }
        for t in &sym.texts {
            fill_text(t, vct_sym, vcscale, frame);
        }
        // labels are placed relative to the location but never rotated
        if !sym.labels.is_empty() {
            let vct_label = VVTransform::translation(vsp.x, vsp.y).then(&vct);
            for t in &sym.labels {
                fill_text(t, vct_label, vcscale, frame);
            }
        }
    }
}

fn build_path(events: &[PathEvent], closed: bool, vct: VCTransform, vcscale: f32, rot: Angle<f32>) -> Path {
    let mut builder = Builder::new();
    let tp = |p: VSPoint| Point::from(vct.transform_point(p)).into();
    for event in events {
        match *event {
            PathEvent::MoveTo(p) => builder.move_to(tp(p)),
            PathEvent::LineTo(p) => builder.line_to(tp(p)),
            PathEvent::QuadTo { ctrl, to } => builder.quadratic_curve_to(tp(ctrl), tp(to)),
            // rotation + uniform scale keep circular arcs circular
            PathEvent::Arc {
                center,
                radius,
                start,
                end,
            } => builder.arc(path::Arc {
                center: tp(center),
                radius: radius * vcscale,
                start_angle: (start + rot).get(),
                end_angle: (end + rot).get(),
            }),
        }
    }
    if closed {
        builder.close();
    }
    builder.build()
}

fn draw_atom(atom: &Atom, vct: VCTransform, vcscale: f32, rot: Angle<f32>, frame: &mut Frame) {
    let path = match &atom.primitive {
        Primitive::Path { events, closed } => build_path(events, *closed, vct, vcscale, rot),
        Primitive::Circle { center, radius } => Path::circle(
            Point::from(vct.transform_point(*center)).into(),
            radius * vcscale,
        ),
        Primitive::Rect { min, width, height } => {
            // a rotated rectangle is no longer axis aligned; emit its corners
            let corners = [
                *min,
                VSPoint::new(min.x + width, min.y),
                VSPoint::new(min.x + width, min.y + height),
                VSPoint::new(min.x, min.y + height),
            ];
            let events = vec![
                PathEvent::MoveTo(corners[0]),
                PathEvent::LineTo(corners[1]),
                PathEvent::LineTo(corners[2]),
                PathEvent::LineTo(corners[3]),
            ];
            build_path(&events, true, vct, vcscale, rot)
        }
    };
    apply_style(&path, &atom.style, vcscale, frame);
}

fn apply_style(path: &Path, style: &Style, vcscale: f32, frame: &mut Frame) {
    if let Some(color) = style.fill {
        frame.fill(
            path,
            canvas::Fill {
                style: canvas::Style::Solid(color),
                ..canvas::Fill::default()
            },
        );
    }
    if let Some(line) = style.stroke {
        frame.stroke(
            path,
            Stroke {
                width: (line.width * vcscale).max(0.5),
                style: stroke::Style::Solid(line.color),
                line_cap: line.cap,
                ..Stroke::default()
            },
        );
    }
}

fn fill_text(t: &TextAtom, vct: VCTransform, vcscale: f32, frame: &mut Frame) {
    frame.fill_text(Text {
        content: t.content.clone(),
        position: Point::from(vct.transform_point(t.anchor)).into(),
        color: t.color,
        size: t.size * vcscale,
        font: t.font.font(),
        horizontal_alignment: t.h_align,
        vertical_alignment: Vertical::Center,
        ..Text::default()
    });
}

/// the drawable model of one document
#[derive(Clone, Debug, Default)]
pub struct Schematic {
    circuit: Circuit,
}

impl Schematic {
    pub fn new(circuit: Circuit) -> Self {
        Schematic { circuit }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// issue the full picture. an empty circuit issues nothing
    pub fn draw(&self, vct: VCTransform, vcscale: f32, frame: &mut Frame) {
        for wire in &self.circuit.wires {
            wire.draw(vct, vcscale, frame);
        }
        for comp in &self.circuit.components {
            comp.draw(vct, vcscale, frame);
        }
    }

    /// box containing every wire endpoint and component location,
    /// used for fit-to-view
    pub fn bounding_box(&self) -> VSBox {
        let pts: Vec<VSPoint> = self
            .circuit
            .wires
            .iter()
            .flat_map(|w| [w.from, w.to])
            .chain(self.circuit.components.iter().map(|c| c.loc))
            .map(ssp_to_vsp)
            .collect();
        if pts.is_empty() {
            // nothing to show; give the viewport something sane to frame
            VSBox::new(VSPoint::new(0.0, 0.0), VSPoint::new(300.0, 200.0))
        } else {
            VSBox::from_points(pts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::load_circuit;
    use crate::transforms::SSPoint;

    #[test]
    fn bounding_box_spans_wires_and_components() {
        let xml = r#"
            <project><circuit>
              <wire from="(10,20)" to="(110,20)"/>
              <comp name="LED" loc="(200,80)"/>
            </circuit></project>"#;
        let sch = Schematic::new(load_circuit(xml).unwrap());
        let bb = sch.bounding_box();
        assert_eq!(bb.min, VSPoint::new(10.0, 20.0));
        assert_eq!(bb.max, VSPoint::new(200.0, 80.0));
    }

    #[test]
    fn empty_schematic_has_fallback_bounds() {
        let sch = Schematic::default();
        assert!(sch.circuit().is_empty());
        assert!(!sch.bounding_box().is_empty());
    }

    #[test]
    fn wire_endpoints_survive_into_the_model() {
        let xml = r#"<project><circuit><wire from="(0,0)" to="(10,10)"/></circuit></project>"#;
        let sch = Schematic::new(load_circuit(xml).unwrap());
        assert_eq!(sch.circuit().wires.len(), 1);
        assert_eq!(sch.circuit().wires[0].from, SSPoint::new(0, 0));
        assert_eq!(sch.circuit().wires[0].to, SSPoint::new(10, 10));
    }
}
