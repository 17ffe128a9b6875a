//! types and constants facillitating geometry and transforms

use euclid::{Angle, Point2D, Transform2D};
use iced::Point as IcedPoint;
use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote the patch of screen being drawn on (f32)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct CanvasSpace;

/// PhantomData tag used to denote the f32 space in which the schematic is drawn
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct ViewportSpace;

/// PhantomData tag used to denote the i32 document-unit space in which the circuit exists
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct SchematicSpace;

/// CanvasSpace Point
pub type CSPoint = euclid::Point2D<f32, CanvasSpace>;
/// ViewportSpace Point
pub type VSPoint = euclid::Point2D<f32, ViewportSpace>;
/// SchematicSpace Point
pub type SSPoint = euclid::Point2D<i32, SchematicSpace>;

/// CanvasSpace Box
pub type CSBox = euclid::Box2D<f32, CanvasSpace>;
/// ViewportSpace Box
pub type VSBox = euclid::Box2D<f32, ViewportSpace>;

/// CanvasSpace Vector
pub type CSVec = euclid::Vector2D<f32, CanvasSpace>;
/// ViewportSpace Vector
pub type VSVec = euclid::Vector2D<f32, ViewportSpace>;

/// viewport to canvas space transform
pub type VCTransform = euclid::Transform2D<f32, ViewportSpace, CanvasSpace>;
/// canvas to viewport space transform
pub type CVTransform = euclid::Transform2D<f32, CanvasSpace, ViewportSpace>;
/// viewport space transform, used to place a component glyph at its location
pub type VVTransform = euclid::Transform2D<f32, ViewportSpace, ViewportSpace>;

/// the document units of a schematic point as viewport coordinates
pub fn ssp_to_vsp(ssp: SSPoint) -> VSPoint {
    ssp.cast().cast_unit()
}

/// transform placing a glyph drawn about the origin: rotate by `angle`,
/// then translate to `vsp`
pub fn placement(vsp: VSPoint, angle: Angle<f32>) -> VVTransform {
    Transform2D::rotation(angle).then_translate(vsp.to_vector())
}

/// parses a Logisim coordinate pair, e.g. `(140,250)`.
/// an absent or malformed pair is treated as the origin, never an error
pub fn parse_point(s: Option<&str>) -> SSPoint {
    let Some(s) = s else {
        return SSPoint::origin();
    };
    let mut it = s
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .splitn(2, ',')
        .map(|c| c.trim().parse::<i32>().unwrap_or(0));
    let x = it.next().unwrap_or(0);
    let y = it.next().unwrap_or(0);
    SSPoint::new(x, y)
}

/// Newtype for working with iced::Point and euclid::Point2D s
#[derive(Debug, Copy, Clone)]
pub struct Point(CSPoint);

impl From<IcedPoint> for Point {
    fn from(src: IcedPoint) -> Self {
        Point(Point2D::new(src.x, src.y))
    }
}

impl From<Point> for IcedPoint {
    fn from(src: Point) -> Self {
        IcedPoint::new(src.0.x, src.0.y)
    }
}

impl From<Point> for CSPoint {
    fn from(src: Point) -> Self {
        src.0
    }
}

impl From<CSPoint> for Point {
    fn from(src: CSPoint) -> Self {
        Self(src)
    }
}
