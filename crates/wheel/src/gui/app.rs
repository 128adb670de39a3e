use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WheelModel};
use crate::sys::wake::WakeTimer;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use steer::{Point, TouchEvent, WheelStatus};

pub struct AppModel {
    pub state: Rc<RefCell<WheelModel>>,
    pub status_text: String,
    pub timer: WakeTimer,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Touch(TouchEvent),
    Resize(i32, i32),
    Tick,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (WheelModel, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Wheel"),
            add_css_class: "wheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: size,
                    set_content_height: size,
                    add_css_class: "wheel-drawing-area",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, _, _| {
                            sender.input(AppMsg::Touch(TouchEvent::Down));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                let p = Point::new(x + dx, y + dy);
                                sender.input(AppMsg::Touch(TouchEvent::Move(p)));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::Touch(TouchEvent::Up));
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::Touch(TouchEvent::Cancel));
                        }
                    }
                },

                gtk::Label {
                    add_css_class: "wheel-status",
                    set_xalign: 0.0,
                    #[watch]
                    set_label: &model.status_text,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let size = state.size_request();
        let status_text = state.describe(WheelStatus::default());

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            status_text,
            timer: WakeTimer::default(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let state = state_draw.borrow();
                let colors = ThemeColors::from_context(&drawing_area.style_context(), state.stroke);
                if let Err(e) = wheel::draw(cr, &state, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let now = Instant::now();
        match msg {
            AppMsg::Touch(event) => self.state.borrow_mut().wheel.handle(event, now),
            AppMsg::Resize(width, height) => self.state.borrow_mut().resize(width, height, now),
            AppMsg::Tick => self.state.borrow_mut().wheel.advance(now),
            AppMsg::ConfigReload => self.reload_config(now),
            AppMsg::Quit => {
                self.timer.cancel();
                relm4::main_application().quit();
                return;
            }
        }
        self.sync(&sender);
    }
}

impl AppModel {
    /// Publishes whatever the last message changed and re-arms the wake
    /// timer for the wheel's next deferred task.
    fn sync(&mut self, sender: &ComponentSender<Self>) {
        let mut state = self.state.borrow_mut();
        if let Some(status) = state.take_status() {
            self.status_text = state.describe(status);
        }
        if state.wheel.take_redraw() {
            self.drawing_area.queue_draw();
        }

        match state.wheel.next_wakeup() {
            Some(due) => {
                let sender = sender.clone();
                self.timer.arm(due.saturating_duration_since(Instant::now()), move || {
                    sender.input(AppMsg::Tick)
                });
            }
            None => self.timer.cancel(),
        }
    }

    fn reload_config(&mut self, now: Instant) {
        let new_config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };
        let sprite_dir = config::get_config_dir().ok();
        match self
            .state
            .borrow_mut()
            .reconfigure(&new_config, sprite_dir.as_deref(), now)
        {
            Ok(()) => log::info!("Configuration reloaded"),
            Err(e) => log::error!("Keeping previous wheel: {}", e),
        }
    }
}
