//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use mana_gui::prelude::*;

/// Install a test-friendly subscriber. `RUST_LOG=mana_gui=trace` shows the
/// dispatch log of a failing test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One delivered mouse event, as seen by the widget whose listener ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivered {
    pub widget: WidgetId,
    pub kind: MouseEventType,
    pub x: i32,
    pub y: i32,
    pub button: Option<MouseButton>,
    pub click_count: u32,
}

pub type MouseLog = Rc<RefCell<Vec<Delivered>>>;

/// Records every mouse callback of the widget it is attached to.
pub struct MouseRecorder {
    widget: WidgetId,
    log: MouseLog,
}

impl MouseRecorder {
    fn record(&self, event: &MouseEvent) {
        self.log.borrow_mut().push(Delivered {
            widget: self.widget,
            kind: event.kind(),
            x: event.x(),
            y: event.y(),
            button: event.button(),
            click_count: event.click_count(),
        });
    }
}

impl MouseListener for MouseRecorder {
    fn mouse_entered(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_exited(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_moved(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_pressed(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_released(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_wheel_moved_up(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_wheel_moved_down(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_dragged(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }

    fn mouse_clicked(&self, event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.record(event);
    }
}

/// Attach a [`MouseRecorder`] to each widget, all writing to one log.
pub fn record_mouse(gui: &mut Gui, widgets: &[WidgetId]) -> MouseLog {
    let log = MouseLog::default();
    for &widget in widgets {
        let recorder = Rc::new(MouseRecorder {
            widget,
            log: log.clone(),
        });
        gui.tree_mut().add_mouse_listener(widget, recorder).unwrap();
    }
    log
}

/// Event kinds delivered to one widget, in order.
pub fn kinds_for(log: &MouseLog, widget: WidgetId) -> Vec<MouseEventType> {
    log.borrow()
        .iter()
        .filter(|delivered| delivered.widget == widget)
        .map(|delivered| delivered.kind)
        .collect()
}

/// A gui whose top widget covers `width` x `height`.
pub fn gui_with_screen(width: i32, height: i32) -> Gui {
    let mut config = GuiConfig::default();
    config.screen.width = width;
    config.screen.height = height;
    Gui::new(config)
}

/// Create a widget and attach it to `parent`.
pub fn add_widget(gui: &mut Gui, parent: WidgetId, name: &str, bounds: Rect) -> WidgetId {
    let id = gui.tree_mut().create(name, bounds);
    gui.tree_mut().add_child(parent, id).unwrap();
    id
}

pub fn move_to(gui: &mut Gui, x: i32, y: i32) {
    gui.handle_mouse_moved(&MouseInput::moved(x, y));
}

pub fn queue_of(gui: &Gui) -> Vec<WidgetId> {
    gui.widgets_with_mouse().collect()
}
