use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::theme;
use crate::gui::view::{self, ThumbImages};
use crate::sys::command::Command;
use crate::sys::state;
use circular_seekbar::{
    CircularSeekBar, MeasureSpec, ProgressListener, SavedState, Theme, TouchEvent, Widget,
};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub bar: Rc<RefCell<CircularSeekBar>>,
    pub images: Rc<RefCell<ThumbImages>>,
    pub theme: Theme,
    pub config_path: PathBuf,
    pub progress: i32,
    pub pressed: bool,
    pub root: gtk::ApplicationWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    Command(Command),
    ConfigReload,
    ProgressChanged { progress: i32, finished: bool },
    Touched,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(c) => AppMsg::Command(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Relays the seek bar's notifications into the component's update loop.
struct ProgressForwarder(ComponentSender<AppModel>);

impl ProgressListener for ProgressForwarder {
    fn on_progress_changed(&mut self, progress: i32, finished: bool) {
        self.0.input(AppMsg::ProgressChanged { progress, finished });
    }
}

impl AppModel {
    fn markup(&self) -> String {
        if !self.pressed {
            return self.progress.to_string();
        }
        let bar = self.bar.borrow();
        let color = bar.progress_color().for_state(bar.drawable_state());
        format!(
            "<span foreground=\"{}\">{}</span>",
            color.rgb_hex(),
            self.progress
        )
    }
}

fn connect_touch(
    area: &gtk::DrawingArea,
    bar: &Rc<RefCell<CircularSeekBar>>,
    sender: &ComponentSender<AppModel>,
) {
    let drag = gtk::GestureDrag::new();

    {
        let bar = bar.clone();
        let sender = sender.clone();
        drag.connect_drag_begin(move |gesture, x, y| {
            let accepted = bar
                .borrow_mut()
                .handle_input(TouchEvent::down(x, y), Instant::now());
            gesture.set_state(if accepted {
                gtk::EventSequenceState::Claimed
            } else {
                gtk::EventSequenceState::Denied
            });
            sender.input(AppMsg::Touched);
        });
    }

    {
        let bar = bar.clone();
        drag.connect_drag_update(move |gesture, dx, dy| {
            if let Some((x, y)) = gesture.start_point() {
                bar.borrow_mut()
                    .handle_input(TouchEvent::moved(x + dx, y + dy), Instant::now());
            }
        });
    }

    {
        let bar = bar.clone();
        let sender = sender.clone();
        drag.connect_drag_end(move |gesture, dx, dy| {
            let (x, y) = gesture.start_point().unwrap_or_default();
            bar.borrow_mut()
                .handle_input(TouchEvent::up(x + dx, y + dy), Instant::now());
            sender.input(AppMsg::Touched);
        });
    }

    {
        let bar = bar.clone();
        let sender = sender.clone();
        drag.connect_cancel(move |_, _| {
            bar.borrow_mut()
                .handle_input(TouchEvent::cancel(), Instant::now());
            sender.input(AppMsg::Touched);
        });
    }

    area.add_controller(drag);
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("arcdial"),
            set_default_size: (window.width, window.height),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: content.width as i32,
                    set_content_height: content.height as i32,
                    add_css_class: "arcdial-drawing-area",
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    set_can_target: false,
                    add_css_class: "arcdial-progress",
                    #[watch]
                    set_markup: &model.markup(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, rx) = init;
        let window = config.window.clone();

        theme::load_css();

        let bar = CircularSeekBar::new(&config.seekbar, &Theme::default(), window.density);
        let content = bar.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        let bar = Rc::new(RefCell::new(bar));

        let model = AppModel {
            bar: bar.clone(),
            images: Rc::new(RefCell::new(ThumbImages::default())),
            theme: Theme::default(),
            config_path,
            progress: config.seekbar.progress,
            pressed: false,
            root: root.clone(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.theme = theme::theme_from_context(&widgets.drawing_area.style_context());
        {
            let mut bar = bar.borrow_mut();
            bar.reconfigure(&config.seekbar, &model.theme);
            bar.set_listener(Some(Box::new(ProgressForwarder(sender.clone()))));
            match state::load() {
                Ok(Some(saved)) => bar.restore_state(saved),
                Ok(None) => {}
                Err(e) => log::warn!("Ignoring saved state: {}", e),
            }
            model.progress = bar.progress();
        }

        let animating = Rc::new(Cell::new(false));

        let bar_draw = bar.clone();
        let images = model.images.clone();
        let animating_draw = animating.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let frame = {
                    let mut bar = bar_draw.borrow_mut();
                    let (width, height) = (f64::from(width), f64::from(height));
                    let size = bar.size();
                    if size.width != width || size.height != height {
                        bar.layout(width, height);
                    }
                    bar.draw(Instant::now())
                };
                animating_draw.set(frame.animating);
                if let Err(e) = view::draw(cr, &frame, &mut images.borrow_mut()) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let bar_tick = bar.clone();
        widgets.drawing_area.add_tick_callback(move |area, _| {
            if animating.get() || bar_tick.borrow_mut().take_invalidation() {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        connect_touch(&widgets.drawing_area, &bar, &sender);

        let bar_close = bar.clone();
        root.connect_close_request(move |_| {
            let saved: SavedState = bar_close.borrow().save_state();
            if let Err(e) = state::store(saved) {
                log::error!("Failed to save state: {}", e);
            }
            glib::Propagation::Proceed
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Command(command) => {
                log::debug!("Applying {:?}", command);
                command.apply(&mut self.bar.borrow_mut(), Instant::now());
                self.progress = self.bar.borrow().progress();
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.images.borrow_mut().clear();
                    let mut bar = self.bar.borrow_mut();
                    bar.reconfigure(&new_config.seekbar, &self.theme);
                    self.progress = bar.progress();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::ProgressChanged { progress, finished } => {
                self.progress = progress;
                if finished {
                    log::info!("Progress settled at {}", progress);
                }
            }
            AppMsg::Touched => {
                self.pressed = self.bar.borrow().is_pressed();
            }
            AppMsg::Close => {
                self.root.close();
            }
        }
    }
}
