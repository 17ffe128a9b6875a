//! the viewport implements common canvas functions - e.g. panning, zooming
//! CanvasSpace <-> ViewportSpace <-> SchematicSpace
//! CanvasSpace is the UI canvas coordinate
//! ViewportSpace is the document coordinate in f32
//! SchematicSpace is the document coordinate in i32
//! the previewer is read-only, so the viewport owns no tools beyond
//! pan, zoom about the cursor, and fit-to-bounds

use crate::transforms::{CSBox, CSPoint, CVTransform, Point, SSPoint, VCTransform, VSBox, VSVec};
use iced::widget::canvas::{stroke, Event, Frame, LineCap, LineDash, Path, Stroke};
use iced::Color;

/// grid pitch of a Logisim document, in document units
const GRID_SPACING: f32 = 10.0;
/// hide the dot grid below this zoom
const GRID_THRESHOLD: f32 = 0.8;

#[derive(Clone, Debug, Default)]
pub enum ViewportState {
    #[default]
    None,
    Panning(CSPoint),
}

pub struct Viewport {
    pub state: ViewportState,

    /// viewport to canvas transform
    vct: VCTransform,
    /// the zoom scale, i.e. vct.determinant().abs().sqrt()
    zoom_scale: f32,
    /// the cursor position in the different spaces
    curpos: (CSPoint, SSPoint),

    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            state: ViewportState::None,
            vct: VCTransform::identity(),
            zoom_scale: 1.0,
            curpos: (CSPoint::origin(), SSPoint::origin()),
            min_zoom: 0.1,
            max_zoom: 20.0,
        }
    }
}

impl Viewport {
    /// process a canvas event. returns true if the view changed and the
    /// passive cache should be redrawn
    pub fn events_handler(
        &mut self,
        event: Event,
        curpos_csp: CSPoint,
        bounds_csb: CSBox,
        content_bounds: VSBox,
    ) -> bool {
        let mut view_changed = false;
        match (&self.state, event) {
            (ViewportState::None, Event::Mouse(iced::mouse::Event::CursorMoved { .. })) => {
                self.curpos_update(curpos_csp);
            }
            (_, Event::Mouse(iced::mouse::Event::WheelScrolled { delta })) => match delta {
                iced::mouse::ScrollDelta::Lines { y, .. }
                | iced::mouse::ScrollDelta::Pixels { y, .. } => {
                    self.zoom(1.0 + y.clamp(-5.0, 5.0) / 5.0, curpos_csp);
                    view_changed = true;
                }
            },
            (
                ViewportState::None,
                Event::Mouse(iced::mouse::Event::ButtonPressed(iced::mouse::Button::Middle)),
            ) => {
                self.state = ViewportState::Panning(curpos_csp);
            }
            (
                ViewportState::Panning(csp_prev),
                Event::Mouse(iced::mouse::Event::CursorMoved { .. }),
            ) => {
                self.pan(curpos_csp, *csp_prev);
                self.state = ViewportState::Panning(curpos_csp);
                self.curpos_update(curpos_csp);
                view_changed = true;
            }
            (
                ViewportState::Panning(_),
                Event::Mouse(iced::mouse::Event::ButtonReleased(iced::mouse::Button::Middle)),
            ) => {
                self.state = ViewportState::None;
            }
            (
                ViewportState::None,
                Event::Keyboard(iced::keyboard::Event::KeyPressed {
                    key_code: iced::keyboard::KeyCode::F,
                    modifiers: _,
                }),
            ) => {
                self.display_bounds(bounds_csb, content_bounds.inflate(50.0, 50.0));
                view_changed = true;
            }
            _ => {}
        }
        view_changed
    }

    /// returns the cursor position in document units
    pub fn curpos_ssp(&self) -> SSPoint {
        self.curpos.1
    }

    /// change transform such that VSBox (document bounds) fits inside
    /// CSBox (canvas bounds)
    pub fn display_bounds(&mut self, csb: CSBox, vsb: VSBox) {
        let mut vct = VCTransform::identity();
        let s = (csb.height() / vsb.height())
            .min(csb.width() / vsb.width())
            .clamp(self.min_zoom, self.max_zoom);
        vct = vct.then_scale(s, s);
        // vector from the scaled content center to the canvas center
        let v = csb.center() - vct.transform_point(vsb.center());
        self.vct = vct.then_translate(v);
        self.zoom_scale = s;
    }

    /// pan by the cursor travel since the previous event
    fn pan(&mut self, csp_now: CSPoint, csp_prev: CSPoint) {
        let v = self.cv_transform().transform_vector(csp_now - csp_prev);
        self.vct = self.vct.pre_translate(v);
    }

    /// change the zoom by `factor`, keeping the point under the cursor fixed
    fn zoom(&mut self, factor: f32, curpos_csp: CSPoint) {
        let vsp = self.cv_transform().transform_point(curpos_csp);
        let scaled = (self.zoom_scale * factor).clamp(self.min_zoom, self.max_zoom);
        let factor = scaled / self.zoom_scale;
        let mut new_transform = self.vct.then_scale(factor, factor);
        // translate so the cursor stays put
        let translation = curpos_csp - new_transform.transform_point(vsp);
        new_transform = new_transform.then_translate(translation);
        self.vct = new_transform;
        self.zoom_scale = scaled;
        self.curpos_update(curpos_csp);
    }

    /// return the canvas to viewport space transform
    pub fn cv_transform(&self) -> CVTransform {
        self.vct.inverse().unwrap_or(CVTransform::identity())
    }

    /// return the viewport to canvas space transform
    pub fn vc_transform(&self) -> VCTransform {
        self.vct
    }

    /// returns the scale factor of the viewport to canvas transform
    pub fn vc_scale(&self) -> f32 {
        self.zoom_scale
    }

    fn curpos_update(&mut self, csp: CSPoint) {
        let vsp = self.cv_transform().transform_point(csp);
        self.curpos = (csp, vsp.round().cast().cast_unit());
    }

    /// draw the document dot grid onto canvas
    pub fn draw_grid(&self, frame: &mut Frame, bb_canvas: CSBox) {
        if self.vc_scale() < GRID_THRESHOLD {
            return;
        }
        let spacing = GRID_SPACING;
        let grid_stroke = Stroke {
            width: (0.2 * self.vc_scale()).clamp(0.5, 2.0),
            style: stroke::Style::Solid(Color::from_rgba(0.0, 0.0, 0.0, 0.35)),
            line_cap: LineCap::Round,
            line_dash: LineDash {
                segments: &[0.0, spacing * self.vc_scale()],
                offset: 0,
            },
            ..Stroke::default()
        };
        let bb_viewport = self.cv_transform().outer_transformed_box(&bb_canvas);
        // align the first column/dot onto grid multiples
        let v = ((bb_viewport.min / spacing).ceil() * spacing) - bb_viewport.min;
        let bb_viewport = bb_viewport.translate(v);
        let extent = bb_viewport.max - bb_viewport.min;
        for col in 0..=(extent.x / spacing).ceil() as u32 {
            let vsp0 = bb_viewport.min + VSVec::from([col as f32 * spacing, 0.0]);
            let vsp1 = bb_viewport.min + VSVec::from([col as f32 * spacing, extent.y.ceil()]);
            let c = Path::line(
                Point::from(self.vc_transform().transform_point(vsp0)).into(),
                Point::from(self.vc_transform().transform_point(vsp1)).into(),
            );
            frame.stroke(&c, grid_stroke.clone());
        }
    }
}
