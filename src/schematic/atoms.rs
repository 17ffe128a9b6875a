//! drawable primitives making up a component glyph.
//!
//! A glyph is pure data: a list of atoms, each carrying its own immutable
//! [`Style`] record. The renderer walks the list and issues canvas calls;
//! no drawing state survives from one atom to the next.

use euclid::Angle;
use iced::alignment::Horizontal;
use iced::widget::canvas::LineCap;
use iced::{Color, Font};

use crate::transforms::VSPoint;

pub const BODY_FILL: Color = Color::WHITE;
pub const OUTLINE: Color = Color::BLACK;
pub const TEXT_COLOR: Color = Color::BLACK;

#[derive(Clone, Copy, Debug)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
    pub cap: LineCap,
}

// manual impl because iced 0.10's `LineCap` does not derive `PartialEq`;
// it is a fieldless enum, so discriminant comparison is exact equality
impl PartialEq for LineStyle {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.color == other.color
            && std::mem::discriminant(&self.cap) == std::mem::discriminant(&other.cap)
    }
}

/// fill and outline of one atom, fixed at glyph construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<LineStyle>,
}

impl Style {
    /// filled body with an outline, the common case
    pub fn outlined(fill: Color, width: f32, color: Color) -> Self {
        Style {
            fill: Some(fill),
            stroke: Some(LineStyle {
                width,
                color,
                cap: LineCap::Round,
            }),
        }
    }

    pub fn filled(fill: Color) -> Self {
        Style {
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn stroked(width: f32, color: Color, cap: LineCap) -> Self {
        Style {
            fill: None,
            stroke: Some(LineStyle { width, color, cap }),
        }
    }
}

/// one step of a glyph outline, in glyph-local viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEvent {
    MoveTo(VSPoint),
    LineTo(VSPoint),
    QuadTo { ctrl: VSPoint, to: VSPoint },
    /// circular arc, angles in the y-down canvas convention
    Arc {
        center: VSPoint,
        radius: f32,
        start: Angle<f32>,
        end: Angle<f32>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Path { events: Vec<PathEvent>, closed: bool },
    Circle { center: VSPoint, radius: f32 },
    Rect { min: VSPoint, width: f32, height: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub primitive: Primitive,
    pub style: Style,
}

impl Atom {
    pub fn circle(center: VSPoint, radius: f32, style: Style) -> Self {
        Atom {
            primitive: Primitive::Circle { center, radius },
            style,
        }
    }

    pub fn rect(min: VSPoint, width: f32, height: f32, style: Style) -> Self {
        Atom {
            primitive: Primitive::Rect { min, width, height },
            style,
        }
    }

    pub fn path(events: Vec<PathEvent>, closed: bool, style: Style) -> Self {
        Atom {
            primitive: Primitive::Path { events, closed },
            style,
        }
    }

    /// open polyline through `pts`, stroked only
    pub fn polyline(pts: &[VSPoint], style: Style) -> Self {
        let mut events = Vec::with_capacity(pts.len());
        for (i, p) in pts.iter().enumerate() {
            if i == 0 {
                events.push(PathEvent::MoveTo(*p));
            } else {
                events.push(PathEvent::LineTo(*p));
            }
        }
        Atom::path(events, false, style)
    }

    /// closed polygon through `pts`
    pub fn polygon(pts: &[VSPoint], style: Style) -> Self {
        let Atom { primitive, style } = Atom::polyline(pts, style);
        match primitive {
            Primitive::Path { events, .. } => Atom::path(events, true, style),
            _ => unreachable!(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Sans,
    SansBold,
    Mono,
}

impl FontStyle {
    pub fn font(self) -> Font {
        match self {
            FontStyle::Sans => Font::DEFAULT,
            FontStyle::SansBold => Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            },
            FontStyle::Mono => Font::MONOSPACE,
        }
    }
}

/// a text run anchored inside a glyph; vertically centered on its anchor
#[derive(Clone, Debug, PartialEq)]
pub struct TextAtom {
    pub content: String,
    pub anchor: VSPoint,
    pub size: f32,
    pub color: Color,
    pub font: FontStyle,
    pub h_align: Horizontal,
}

/// a complete glyph: body atoms, rotated text anchors, and label text
/// which by contract never rotates with the symbol
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub atoms: Vec<Atom>,
    pub texts: Vec<TextAtom>,
    pub labels: Vec<TextAtom>,
    pub rotates: bool,
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol {
            atoms: Vec::new(),
            texts: Vec::new(),
            labels: Vec::new(),
            rotates: true,
        }
    }
}

impl Symbol {
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.texts.is_empty() && self.labels.is_empty()
    }
}
