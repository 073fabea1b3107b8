use crate::config;
use crate::events::AppEvent;
use crate::gui::dial::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::gui::theme;
use fandial_core::{Dial, Renderable, Tappable};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub dial: Rc<RefCell<Dial>>,
    pub config_path: PathBuf,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Activate,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Activate => AppMsg::Activate,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Dial, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fan Speed"),
            set_default_width: DEFAULT_WIDTH,
            set_default_height: DEFAULT_HEIGHT,
            add_css_class: "fandial-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_focusable: true,
                add_css_class: "fandial-dial",

                add_controller = gtk::GestureClick {
                    set_button: 1, // primary only
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Activate);
                    }
                },

                add_controller = gtk::EventControllerKey {
                    connect_key_pressed[sender] => move |_, key, _, _| {
                        if key == gtk::gdk::Key::Return
                            || key == gtk::gdk::Key::KP_Enter
                            || key == gtk::gdk::Key::space
                        {
                            sender.input(AppMsg::Activate);
                            return glib::Propagation::Stop;
                        }
                        glib::Propagation::Proceed
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (dial, config_path, rx) = init;

        theme::load_css();

        let model = AppModel {
            dial: Rc::new(RefCell::new(dial)),
            config_path,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let dial_resize = model.dial.clone();
        widgets
            .drawing_area
            .connect_resize(move |_, width, height| {
                dial_resize.borrow_mut().size_changed(width, height);
            });

        let dial_draw = model.dial.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = dial::draw(cr, &dial_draw.borrow()) {
                log::error!("Drawing error: {}", e);
            }
        });

        model.sync_accessible_label();

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
            AppMsg::Activate => {
                let level = self.dial.borrow_mut().on_activate();
                log::debug!("Fan speed set to {}", level);
                self.sync_accessible_label();
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    {
                        let mut dial = self.dial.borrow_mut();
                        dial.set_colors(new_config.dial_colors());
                        dial.set_labels(new_config.label_table());
                    }
                    self.sync_accessible_label();
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn sync_accessible_label(&self) {
        let dial = self.dial.borrow();
        self.drawing_area
            .update_property(&[gtk::accessible::Property::Label(
                dial.content_description(),
            )]);
    }
}
