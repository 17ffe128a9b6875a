//! logiscope viewer
//! host shell around the pure parse -> extract -> draw pipeline: loads the
//! project file named on the command line, polls it for changes, and
//! redraws the whole schematic on every change or view movement.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use colored::Colorize;
use iced::time::{Duration, Instant};
use iced::alignment;
use iced::widget::canvas::event::{self, Event};
use iced::mouse::Cursor;
use iced::widget::canvas::{self, Cache, Geometry, Text};
use iced::widget::{button, column, row, text};
use iced::{executor, mouse, window};
use iced::{Application, Color, Command, Element, Length, Rectangle, Settings, Subscription, Theme};

use logiscope::schematic::Schematic;
use logiscope::summary::CircuitSummary;
use logiscope::transforms::{CSBox, CSPoint, Point, SSPoint};
use logiscope::viewport::{Viewport, ViewportState};
use logiscope::{load_circuit, ExtractError};

use infobar::infobar;

/// what the canvas shows in place of a schematic when the pipeline fails
const PARSE_ERROR_NOTICE: &str = "could not render: not a valid Logisim project";

const FILE_POLL: Duration = Duration::from_millis(500);

pub fn main() -> iced::Result {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("{}", "usage: logiscope <project file>".red());
        std::process::exit(2);
    };
    Logiscope::run(Settings {
        window: iced::window::Settings {
            size: (900, 640),
            ..iced::window::Settings::default()
        },
        antialiasing: true,
        flags: path,
        ..Settings::default()
    })
}

struct Logiscope {
    path: PathBuf,
    mtime: Option<SystemTime>,
    loaded: Result<Schematic, String>,

    curpos_ssp: SSPoint,
    zoom_scale: f32,
    show_help: bool,

    passive_cache: Cache,
    background_cache: Cache,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Tick(Instant),
    CanvasEvent(SSPoint, f32),
    ToggleHelp,
    CopyJson,
    CopyImage,
    Captured(window::Screenshot),
}

impl Application for Logiscope {
    type Executor = executor::Default;
    type Message = Msg;
    type Theme = Theme;
    type Flags = PathBuf;

    fn new(path: PathBuf) -> (Self, Command<Msg>) {
        let (mtime, loaded) = load_file(&path);
        (
            Logiscope {
                path,
                mtime,
                loaded,
                curpos_ssp: SSPoint::origin(),
                zoom_scale: 1.0,
                show_help: false,
                passive_cache: Default::default(),
                background_cache: Default::default(),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        match self.path.file_name().and_then(|n| n.to_str()) {
            Some(name) => format!("logiscope - {}", name),
            None => String::from("logiscope"),
        }
    }

    fn update(&mut self, message: Msg) -> Command<Msg> {
        match message {
            Msg::Tick(_) => {
                // whole pipeline re-runs whenever the document changed
                let mtime = modified(&self.path);
                if mtime != self.mtime {
                    let (mtime, loaded) = load_file(&self.path);
                    self.mtime = mtime;
                    self.loaded = loaded;
                    self.passive_cache.clear();
                }
            }
            Msg::CanvasEvent(ssp, zoom) => {
                self.curpos_ssp = ssp;
                self.zoom_scale = zoom;
            }
            Msg::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Msg::CopyJson => {
                if let Ok(sch) = &self.loaded {
                    let json = CircuitSummary::new(sch.circuit()).to_json();
                    return iced::clipboard::write(json);
                }
            }
            Msg::CopyImage => {
                return window::screenshot(Msg::Captured);
            }
            Msg::Captured(shot) => {
                let result = arboard::Clipboard::new().and_then(|mut clipboard| {
                    clipboard.set_image(arboard::ImageData {
                        width: shot.size.width as usize,
                        height: shot.size.height as usize,
                        bytes: std::borrow::Cow::Owned(shot.as_ref().to_vec()),
                    })
                });
                match result {
                    Ok(()) => println!("{}", "image copied to clipboard".green()),
                    Err(e) => eprintln!("{}", format!("clipboard image failed: {}", e).red()),
                }
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<Msg> {
        let canvas = iced::widget::canvas(self as &Self)
            .width(Length::Fill)
            .height(Length::Fill);
        let status = match &self.loaded {
            Ok(sch) => format!(
                "{} components; {} wires",
                sch.circuit().components.len(),
                sch.circuit().wires.len()
            ),
            Err(_) => String::from("parse error"),
        };
        let infobar = infobar(self.curpos_ssp, self.zoom_scale, status);
        let toolbar = row![
            button("copy image").on_press(Msg::CopyImage),
            button("copy json").on_press(Msg::CopyJson),
            button("help").on_press(Msg::ToggleHelp),
        ]
        .spacing(4)
        .width(Length::Fill);

        let content = column![canvas, infobar].width(Length::Fill);
        if self.show_help {
            let help = column![
                text("middle drag: pan").size(14),
                text("wheel: zoom").size(14),
                text("F: fit to circuit").size(14),
                text("H: toggle this help").size(14),
            ]
            .spacing(6)
            .padding(8)
            .width(Length::Shrink);
            column![toolbar, row![help, content]].into()
        } else {
            column![toolbar, content].into()
        }
    }

    fn subscription(&self) -> Subscription<Msg> {
        iced::time::every(FILE_POLL).map(Msg::Tick)
    }
}

impl canvas::Program<Msg> for Logiscope {
    type State = Viewport;

    fn update(
        &self,
        viewport: &mut Viewport,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Msg>) {
        if let Event::Keyboard(iced::keyboard::Event::KeyPressed {
            key_code: iced::keyboard::KeyCode::H,
            modifiers: _,
        }) = event
        {
            return (event::Status::Captured, Some(Msg::ToggleHelp));
        }

        let Some(curpos) = cursor.position_in(bounds) else {
            return (event::Status::Ignored, None);
        };
        let curpos_csp: CSPoint = Point::from(curpos).into();
        let bounds_csb = CSBox::from_points([
            CSPoint::origin(),
            CSPoint::new(bounds.width, bounds.height),
        ]);
        let content_bounds = match &self.loaded {
            Ok(sch) => sch.bounding_box(),
            Err(_) => Schematic::default().bounding_box(),
        };
        if viewport.events_handler(event, curpos_csp, bounds_csb, content_bounds) {
            self.passive_cache.clear();
        }
        (
            event::Status::Captured,
            Some(Msg::CanvasEvent(viewport.curpos_ssp(), viewport.vc_scale())),
        )
    }

    fn draw(
        &self,
        viewport: &Viewport,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let background = self.background_cache.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(
                iced::Point::ORIGIN,
                bounds.size(),
                canvas::Fill {
                    style: canvas::Style::Solid(Color::from_rgb8(0xf0, 0xf0, 0xf0)),
                    ..canvas::Fill::default()
                },
            );
        });

        let passive = self.passive_cache.draw(renderer, bounds.size(), |frame| match &self.loaded {
            Ok(sch) => {
                let bb_canvas = CSBox::from_points([
                    CSPoint::origin(),
                    CSPoint::new(bounds.width, bounds.height),
                ]);
                viewport.draw_grid(frame, bb_canvas);
                sch.draw(viewport.vc_transform(), viewport.vc_scale(), frame);
            }
            // no partial rendering on failure, just the fixed notice
            Err(_) => {
                frame.fill_text(Text {
                    content: String::from(PARSE_ERROR_NOTICE),
                    position: iced::Point::new(bounds.width / 2.0, bounds.height / 2.0),
                    color: Color::from_rgb8(0xa0, 0x20, 0x20),
                    size: 20.0,
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..Text::default()
                });
            }
        });

        vec![background, passive]
    }

    fn mouse_interaction(
        &self,
        viewport: &Viewport,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            match viewport.state {
                ViewportState::Panning(_) => mouse::Interaction::Grabbing,
                ViewportState::None => mouse::Interaction::default(),
            }
        } else {
            mouse::Interaction::default()
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// read and extract the document, reporting the outcome on the terminal.
/// the canvas only ever sees the fixed notice; detail goes to stderr
fn load_file(path: &Path) -> (Option<SystemTime>, Result<Schematic, String>) {
    let mtime = modified(path);
    let loaded = match std::fs::read_to_string(path) {
        Ok(body) => load_circuit(&body).map_err(|e: ExtractError| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match &loaded {
        Ok(circuit) => println!(
            "{}",
            format!(
                "loaded {}: {} components, {} wires",
                path.display(),
                circuit.components.len(),
                circuit.wires.len()
            )
            .green()
        ),
        Err(e) => eprintln!("{}", format!("{}: {}", path.display(), e).red()),
    }
    (mtime, loaded.map(Schematic::new))
}

mod infobar {
    use iced::alignment;
    use iced::widget::{component, row, text, Component};
    use iced::{Element, Renderer};

    use logiscope::transforms::SSPoint;

    pub struct InfoBar {
        curpos_ssp: SSPoint,
        zoom_scale: f32,
        status: String,
    }

    pub fn infobar(curpos_ssp: SSPoint, zoom_scale: f32, status: String) -> InfoBar {
        InfoBar {
            curpos_ssp,
            zoom_scale,
            status,
        }
    }

    impl<Message> Component<Message, Renderer> for InfoBar {
        type State = ();
        type Event = ();

        fn update(&mut self, _state: &mut Self::State, _event: ()) -> Option<Message> {
            None
        }
        fn view(&self, _state: &Self::State) -> Element<(), Renderer> {
            let str_ssp = format!("x: {}; y: {}", self.curpos_ssp.x, self.curpos_ssp.y);
            row![
                text(str_ssp)
                    .size(16)
                    .height(16)
                    .vertical_alignment(alignment::Vertical::Center),
                text(format!("{:04.1}", self.zoom_scale))
                    .size(16)
                    .height(16)
                    .vertical_alignment(alignment::Vertical::Center),
                text(&self.status)
                    .size(16)
                    .height(16)
                    .vertical_alignment(alignment::Vertical::Center),
            ]
            .spacing(10)
            .into()
        }
    }

    impl<'a, Message> From<InfoBar> for Element<'a, Message, Renderer>
    where
        Message: 'a,
    {
        fn from(infobar: InfoBar) -> Self {
            component(infobar)
        }
    }
}
