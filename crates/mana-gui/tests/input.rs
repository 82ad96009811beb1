//! Click synthesis, dragging, wheel routing and keyboard handling.

mod common;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use mana_gui::prelude::*;
use mana_gui::widget::FocusHandler;

use common::*;

type NameLog = Rc<RefCell<Vec<&'static str>>>;

/// Appends its name on every key press, optionally consuming the event.
struct NamedKeyListener {
    name: &'static str,
    consume: bool,
    log: NameLog,
}

impl NamedKeyListener {
    fn attach(log: &NameLog, name: &'static str, consume: bool) -> Rc<Self> {
        Rc::new(Self {
            name,
            consume,
            log: log.clone(),
        })
    }
}

impl KeyListener for NamedKeyListener {
    fn key_pressed(&self, event: &mut KeyEvent, _cx: &mut EventContext<'_>) {
        self.log.borrow_mut().push(self.name);
        if self.consume {
            event.consume();
        }
    }
}

struct PressLogger {
    log: NameLog,
}

impl MouseListener for PressLogger {
    fn mouse_pressed(&self, _event: &mut MouseEvent, _cx: &mut EventContext<'_>) {
        self.log.borrow_mut().push("mouse");
    }
}

fn press(gui: &mut Gui, x: i32, y: i32, timestamp_ms: u64) {
    gui.handle_mouse_input(&MouseInput::pressed(MouseButton::Left, x, y, timestamp_ms));
}

fn release(gui: &mut Gui, x: i32, y: i32, timestamp_ms: u64) {
    gui.handle_mouse_input(&MouseInput::released(MouseButton::Left, x, y, timestamp_ms));
}

fn key(gui: &mut Gui, input: KeyInput) {
    gui.queue_key_input(input);
    gui.logic();
}

// =============================================================================
// Mouse buttons
// =============================================================================

#[test]
fn press_and_release_on_one_widget_is_a_click() {
    init_tracing();
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let button = add_widget(&mut gui, top, "button", Rect::new(10, 10, 80, 24));
    let log = record_mouse(&mut gui, &[button]);

    press(&mut gui, 20, 20, 0);
    release(&mut gui, 20, 20, 50);

    assert_eq!(
        kinds_for(&log, button),
        vec![MouseEventType::Pressed, MouseEventType::Released, MouseEventType::Clicked]
    );
    let clicked = log.borrow().last().copied().unwrap();
    assert_eq!((clicked.x, clicked.y), (10, 10));
    assert_eq!(clicked.button, Some(MouseButton::Left));
    assert_eq!(clicked.click_count, 1);
    assert_eq!(gui.focus_handler().dragged(), None);
}

#[test]
fn quick_presses_count_as_multi_click() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let button = add_widget(&mut gui, top, "button", Rect::new(10, 10, 80, 24));
    let log = record_mouse(&mut gui, &[button]);

    press(&mut gui, 20, 20, 0);
    release(&mut gui, 20, 20, 40);
    press(&mut gui, 20, 20, 200);
    assert_eq!(gui.click_count(), 2);
    release(&mut gui, 20, 20, 240);

    let clicks: Vec<u32> = log
        .borrow()
        .iter()
        .filter(|delivered| delivered.kind == MouseEventType::Clicked)
        .map(|delivered| delivered.click_count)
        .collect();
    assert_eq!(clicks, vec![1, 2]);

    press(&mut gui, 20, 20, 1000);
    assert_eq!(gui.click_count(), 1);
}

#[test]
fn releasing_elsewhere_ends_the_drag_without_a_click() {
    init_tracing();
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let a = add_widget(&mut gui, top, "a", Rect::new(10, 10, 50, 50));
    let b = add_widget(&mut gui, top, "b", Rect::new(200, 200, 50, 50));
    let log = record_mouse(&mut gui, &[a, b]);

    press(&mut gui, 20, 20, 0);
    gui.handle_mouse_input(&MouseInput::moved(220, 220));
    release(&mut gui, 220, 220, 100);

    assert_eq!(
        kinds_for(&log, a),
        vec![MouseEventType::Pressed, MouseEventType::Dragged, MouseEventType::Released]
    );
    assert_eq!(kinds_for(&log, b), vec![MouseEventType::Entered]);

    let dragged = log
        .borrow()
        .iter()
        .copied()
        .find(|delivered| delivered.kind == MouseEventType::Dragged)
        .unwrap();
    assert_eq!((dragged.x, dragged.y), (210, 210));
    assert_eq!(dragged.button, Some(MouseButton::Left));
    assert_eq!(gui.focus_handler().dragged(), None);
    assert_eq!(gui.focus_handler().last_widget_pressed(), None);
}

#[test]
fn wheel_goes_to_the_widget_under_the_pointer_only() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let list = add_widget(&mut gui, top, "list", Rect::new(0, 0, 100, 300));
    let log = record_mouse(&mut gui, &[top, list]);

    gui.handle_mouse_input(&MouseInput::wheel_up(50, 50));
    gui.handle_mouse_input(&MouseInput::wheel_down(50, 50));

    assert_eq!(
        kinds_for(&log, list),
        vec![MouseEventType::WheelMovedUp, MouseEventType::WheelMovedDown]
    );
    assert!(kinds_for(&log, top).is_empty());
}

#[test]
fn pressing_a_focusable_widget_focuses_it() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let field = add_widget(&mut gui, top, "field", Rect::new(10, 10, 100, 20));
    let label = add_widget(&mut gui, top, "label", Rect::new(10, 40, 100, 20));
    gui.tree_mut().set_focusable(field, true).unwrap();

    press(&mut gui, 15, 15, 0);
    release(&mut gui, 15, 15, 10);
    assert_eq!(gui.focus_handler().focused(), Some(field));

    press(&mut gui, 15, 45, 1000);
    release(&mut gui, 15, 45, 1010);
    assert_eq!(gui.widget_at(15, 45), Some(label));
    assert_eq!(gui.focus_handler().focused(), Some(field));
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn consuming_global_listener_stops_all_further_key_handling() {
    init_tracing();
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let a = add_widget(&mut gui, top, "a", Rect::new(0, 0, 50, 50));
    let b = add_widget(&mut gui, top, "b", Rect::new(60, 0, 50, 50));
    for id in [a, b] {
        gui.tree_mut().set_focusable(id, true).unwrap();
    }
    gui.context().request_focus(a);

    let log = NameLog::default();
    gui.add_global_key_listener(NamedKeyListener::attach(&log, "l1", true));
    gui.add_global_key_listener(NamedKeyListener::attach(&log, "l2", false));
    gui.tree_mut()
        .add_key_listener(a, NamedKeyListener::attach(&log, "a", false))
        .unwrap();

    key(&mut gui, KeyInput::pressed(Key::Tab));

    assert_eq!(*log.borrow(), vec!["l1"]);
    assert_eq!(gui.focus_handler().focused(), Some(a));
}

#[test]
fn removed_global_listener_is_not_called() {
    let mut gui = Gui::default();
    let log = NameLog::default();
    let listener: Rc<dyn KeyListener> = NamedKeyListener::attach(&log, "global", false);
    gui.add_global_key_listener(listener.clone());

    key(&mut gui, KeyInput::pressed(Key::Enter));
    assert!(gui.remove_global_key_listener(&listener));
    assert!(!gui.remove_global_key_listener(&listener));
    key(&mut gui, KeyInput::pressed(Key::Enter));

    assert_eq!(*log.borrow(), vec!["global"]);
}

#[test]
fn key_events_bubble_from_the_focused_widget() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let panel = add_widget(&mut gui, top, "panel", Rect::new(0, 0, 200, 200));
    let field = add_widget(&mut gui, panel, "field", Rect::new(10, 10, 100, 20));
    gui.tree_mut().set_focusable(field, true).unwrap();
    gui.context().request_focus(field);

    let log = NameLog::default();
    for (id, name) in [(top, "top"), (panel, "panel"), (field, "field")] {
        gui.tree_mut()
            .add_key_listener(id, NamedKeyListener::attach(&log, name, name == "field"))
            .unwrap();
    }

    key(&mut gui, KeyInput::pressed(Key::Character('a')));

    assert_eq!(*log.borrow(), vec!["field", "panel", "top"]);
}

#[test]
fn key_source_descends_into_internal_focus() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let composite = add_widget(&mut gui, top, "composite", Rect::new(0, 0, 200, 200));
    let inner = add_widget(&mut gui, composite, "inner", Rect::new(10, 10, 50, 20));
    gui.tree_mut().set_focusable(composite, true).unwrap();

    let mut internal = FocusHandler::new();
    internal.set_focused(Some(inner));
    gui.tree_mut()
        .set_internal_focus_handler(composite, Some(internal))
        .unwrap();
    gui.context().request_focus(composite);

    assert_eq!(gui.key_event_source(), Some(inner));

    let log = NameLog::default();
    for (id, name) in [(composite, "composite"), (inner, "inner")] {
        gui.tree_mut()
            .add_key_listener(id, NamedKeyListener::attach(&log, name, false))
            .unwrap();
    }
    key(&mut gui, KeyInput::pressed(Key::Enter));

    assert_eq!(*log.borrow(), vec!["inner", "composite"]);
}

#[test]
fn focused_widget_that_lost_focusability_is_unfocused() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let field = add_widget(&mut gui, top, "field", Rect::new(10, 10, 100, 20));
    gui.tree_mut().set_focusable(field, true).unwrap();
    gui.context().request_focus(field);

    let log = NameLog::default();
    gui.tree_mut()
        .add_key_listener(field, NamedKeyListener::attach(&log, "field", false))
        .unwrap();
    gui.tree_mut().set_focusable(field, false).unwrap();

    key(&mut gui, KeyInput::pressed(Key::Character('x')));

    assert_eq!(gui.focus_handler().focused(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn tab_and_shift_tab_cycle_through_tab_order() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let a = add_widget(&mut gui, top, "a", Rect::new(0, 0, 50, 20));
    let b = add_widget(&mut gui, top, "b", Rect::new(0, 30, 50, 20));
    let c = add_widget(&mut gui, top, "c", Rect::new(0, 60, 50, 20));
    for id in [a, b, c] {
        gui.tree_mut().set_focusable(id, true).unwrap();
    }
    gui.tree_mut().set_tab_in_enabled(c, false).unwrap();

    let mut visited = Vec::new();
    for _ in 0..3 {
        key(&mut gui, KeyInput::pressed(Key::Tab));
        visited.push(gui.focus_handler().focused());
    }
    assert_eq!(visited, vec![Some(a), Some(b), Some(a)]);

    key(&mut gui, KeyInput::pressed(Key::Tab).with_modifiers(KeyboardModifiers::SHIFT));
    assert_eq!(gui.focus_handler().focused(), Some(b));

    key(&mut gui, KeyInput::released(Key::Tab));
    assert_eq!(gui.focus_handler().focused(), Some(b));
}

#[test]
fn configuration_file_tunes_tabbing_and_multi_click() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tabbing = false").unwrap();
    writeln!(file, "double_click_interval_ms = 100").unwrap();
    let config = GuiConfig::load(file.path()).unwrap();

    let mut gui = Gui::new(config);
    let top = gui.top().unwrap();
    let a = add_widget(&mut gui, top, "a", Rect::new(0, 0, 50, 20));
    gui.tree_mut().set_focusable(a, true).unwrap();

    key(&mut gui, KeyInput::pressed(Key::Tab));
    assert_eq!(gui.focus_handler().focused(), None);

    press(&mut gui, 10, 10, 0);
    release(&mut gui, 10, 10, 20);
    press(&mut gui, 10, 10, 150);
    assert_eq!(gui.click_count(), 1);
}

#[test]
fn logic_handles_keys_before_mouse() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let button = add_widget(&mut gui, top, "button", Rect::new(10, 10, 80, 24));
    gui.tree_mut().set_focusable(button, true).unwrap();
    gui.context().request_focus(button);

    let log = NameLog::default();
    gui.tree_mut()
        .add_key_listener(button, NamedKeyListener::attach(&log, "key", false))
        .unwrap();
    gui.tree_mut()
        .add_mouse_listener(button, Rc::new(PressLogger { log: log.clone() }))
        .unwrap();

    gui.queue_mouse_input(MouseInput::pressed(MouseButton::Left, 20, 20, 0));
    gui.queue_key_input(KeyInput::pressed(Key::Enter));
    gui.logic();

    assert_eq!(*log.borrow(), vec!["key", "mouse"]);
}

// =============================================================================
// Top widget
// =============================================================================

#[test]
fn replacing_the_top_widget() {
    let mut gui = Gui::default();
    let old_top = gui.top().unwrap();
    let field = add_widget(&mut gui, old_top, "field", Rect::new(0, 0, 50, 20));
    gui.tree_mut().set_focusable(field, true).unwrap();
    gui.context().request_focus(field);

    let gone = gui.tree_mut().create("gone", Rect::new(0, 0, 10, 10));
    gui.destroy_widget(gone).unwrap();
    assert!(matches!(gui.set_top(gone), Err(GuiError::WidgetNotFound(id)) if id == gone));
    assert_eq!(gui.top(), Some(old_top));

    let new_top = gui.tree_mut().create("screen", Rect::new(0, 0, 640, 480));
    let icon = add_widget(&mut gui, new_top, "icon", Rect::new(0, 0, 32, 32));
    gui.set_top(new_top).unwrap();

    assert_eq!(gui.top(), Some(new_top));
    assert_eq!(gui.focus_handler().focused(), None);
    assert_eq!(gui.widget_at(10, 10), Some(icon));
    assert_eq!(gui.widget_at(100, 100), Some(new_top));
    assert!(gui.debug_tree().starts_with("screen"));
}

#[test]
fn wheel_over_a_disabled_widget_is_swallowed() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let panel = add_widget(&mut gui, top, "panel", Rect::new(0, 0, 200, 200));
    let disabled = add_widget(&mut gui, panel, "disabled", Rect::new(10, 10, 50, 50));
    gui.tree_mut().set_enabled(disabled, false).unwrap();
    let log = record_mouse(&mut gui, &[top, panel, disabled]);

    gui.handle_mouse_input(&MouseInput::wheel_up(20, 20));

    assert!(log.borrow().is_empty());
}

#[test]
fn far_off_screen_samples_reach_the_modal_mouse_holder() {
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let dialog = add_widget(&mut gui, top, "dialog", Rect::new(300, 200, 200, 100));
    let log = record_mouse(&mut gui, &[dialog]);
    gui.context().request_modal_mouse_input_focus(dialog).unwrap();

    gui.handle_mouse_input(&MouseInput::wheel_up(i32::MIN + 5, 0));
    gui.handle_mouse_input(&MouseInput::pressed(MouseButton::Left, i32::MAX, i32::MIN, 0));

    let delivered = log.borrow();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].kind, MouseEventType::WheelMovedUp);
    assert_eq!((delivered[0].x, delivered[0].y), (i32::MIN, -200));
    assert_eq!(delivered[1].kind, MouseEventType::Pressed);
    assert_eq!((delivered[1].x, delivered[1].y), (i32::MAX - 300, i32::MIN));
}
