//! Modal focus and modal mouse input focus.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use mana_gui::prelude::*;

use common::*;

/// top (800x600) > dialog (300,200,200,100) > ok (10,10,50,20)
///            > button (10,10,80,24)
struct Scene {
    gui: Gui,
    top: WidgetId,
    dialog: WidgetId,
    ok: WidgetId,
    button: WidgetId,
}

fn scene() -> Scene {
    init_tracing();
    let mut gui = Gui::default();
    let top = gui.top().unwrap();
    let button = add_widget(&mut gui, top, "button", Rect::new(10, 10, 80, 24));
    let dialog = add_widget(&mut gui, top, "dialog", Rect::new(300, 200, 200, 100));
    let ok = add_widget(&mut gui, dialog, "ok", Rect::new(10, 10, 50, 20));
    for id in [button, ok] {
        gui.tree_mut().set_focusable(id, true).unwrap();
    }
    Scene {
        gui,
        top,
        dialog,
        ok,
        button,
    }
}

struct KeyRecorder {
    widget: WidgetId,
    log: Rc<RefCell<Vec<WidgetId>>>,
}

impl KeyListener for KeyRecorder {
    fn key_pressed(&self, _event: &mut KeyEvent, _cx: &mut EventContext<'_>) {
        self.log.borrow_mut().push(self.widget);
    }
}

#[test]
fn modal_focus_suppresses_key_events_outside_the_dialog() {
    let Scene {
        mut gui,
        top,
        dialog,
        ok,
        button,
    } = scene();
    let log = Rc::new(RefCell::new(Vec::new()));
    for widget in [top, dialog, ok, button] {
        let recorder = Rc::new(KeyRecorder {
            widget,
            log: log.clone(),
        });
        gui.tree_mut().add_key_listener(widget, recorder).unwrap();
    }

    gui.context().request_modal_focus(dialog).unwrap();

    let mut outside = KeyEvent::new(
        Some(button),
        KeyEventType::Pressed,
        Key::Enter,
        KeyboardModifiers::NONE,
        false,
    );
    gui.distribute_key_event(&mut outside);
    assert!(log.borrow().is_empty());

    let mut inside = KeyEvent::new(
        Some(ok),
        KeyEventType::Pressed,
        Key::Enter,
        KeyboardModifiers::NONE,
        false,
    );
    gui.distribute_key_event(&mut inside);
    assert_eq!(*log.borrow(), vec![ok, dialog]);
}

#[test]
fn modal_focus_blocks_mouse_events_outside_the_dialog() {
    let Scene {
        mut gui,
        top,
        dialog,
        ok,
        button,
    } = scene();
    let log = record_mouse(&mut gui, &[top, dialog, ok, button]);
    gui.context().request_modal_focus(dialog).unwrap();

    gui.handle_mouse_input(&MouseInput::pressed(MouseButton::Left, 20, 20, 0));
    assert!(kinds_for(&log, button).is_empty());
    assert!(kinds_for(&log, top).is_empty());
    assert_eq!(gui.focus_handler().focused(), None);

    gui.handle_mouse_input(&MouseInput::released(MouseButton::Left, 20, 20, 10));
    gui.handle_mouse_input(&MouseInput::pressed(MouseButton::Left, 315, 215, 1000));
    assert_eq!(kinds_for(&log, ok), vec![MouseEventType::Pressed]);
    assert_eq!(kinds_for(&log, dialog), vec![MouseEventType::Pressed]);
    assert!(kinds_for(&log, top).is_empty());
    assert_eq!(gui.focus_handler().focused(), Some(ok));
}

#[test]
fn modal_mouse_input_focus_redirects_hit_testing() {
    let Scene {
        mut gui,
        top,
        dialog,
        ok,
        button,
    } = scene();
    gui.context().request_modal_mouse_input_focus(dialog).unwrap();

    assert_eq!(gui.widget_at(20, 20), Some(button));
    assert_eq!(gui.mouse_event_source(20, 20), Some(dialog));
    assert_eq!(gui.mouse_event_source(700, 500), Some(dialog));
    assert_eq!(gui.mouse_event_source(450, 250), Some(dialog));
    assert_eq!(gui.mouse_event_source(315, 215), Some(ok));

    let log = record_mouse(&mut gui, &[top, dialog, button]);
    gui.handle_mouse_input(&MouseInput::pressed(MouseButton::Left, 20, 20, 0));
    assert!(kinds_for(&log, button).is_empty());
    assert!(kinds_for(&log, top).is_empty());
    assert_eq!(kinds_for(&log, dialog), vec![MouseEventType::Pressed]);
}

#[test]
fn modal_mouse_widget_is_not_entered_from_outside() {
    let Scene {
        mut gui,
        top,
        dialog,
        button,
        ..
    } = scene();
    let log = record_mouse(&mut gui, &[top, dialog, button]);

    move_to(&mut gui, 20, 20);
    assert_eq!(queue_of(&gui), vec![button, top]);

    gui.context().request_modal_mouse_input_focus(dialog).unwrap();
    gui.logic();
    assert!(queue_of(&gui).is_empty());
    assert_eq!(
        kinds_for(&log, button),
        vec![MouseEventType::Entered, MouseEventType::Moved, MouseEventType::Exited]
    );

    log.borrow_mut().clear();
    move_to(&mut gui, 25, 25);
    assert!(queue_of(&gui).is_empty());
    assert!(kinds_for(&log, button).is_empty());
    assert_eq!(kinds_for(&log, dialog), vec![MouseEventType::Moved]);

    move_to(&mut gui, 400, 250);
    assert_eq!(queue_of(&gui), vec![dialog, top]);
    assert_eq!(
        kinds_for(&log, dialog),
        vec![MouseEventType::Moved, MouseEventType::Entered, MouseEventType::Moved]
    );
}

#[test]
fn modal_transitions_flush_and_restore_hover() {
    let Scene {
        mut gui,
        top,
        dialog,
        button,
        ..
    } = scene();
    let log = record_mouse(&mut gui, &[top, button]);

    move_to(&mut gui, 20, 20);
    gui.context().request_modal_focus(dialog).unwrap();
    gui.logic();

    assert!(queue_of(&gui).is_empty());
    assert_eq!(gui.focus_handler().last_widget_with_modal_focus(), Some(dialog));
    assert_eq!(
        kinds_for(&log, button),
        vec![MouseEventType::Entered, MouseEventType::Moved, MouseEventType::Exited]
    );

    // No transition, no events.
    gui.logic();
    assert_eq!(kinds_for(&log, button).len(), 3);

    gui.context().release_modal_focus(dialog);
    gui.logic();

    assert_eq!(gui.focus_handler().last_widget_with_modal_focus(), None);
    assert_eq!(queue_of(&gui), vec![button, top]);
    assert_eq!(
        kinds_for(&log, button),
        vec![
            MouseEventType::Entered,
            MouseEventType::Moved,
            MouseEventType::Exited,
            MouseEventType::Entered,
        ]
    );
    assert_eq!(
        kinds_for(&log, top),
        vec![
            MouseEventType::Entered,
            MouseEventType::Moved,
            MouseEventType::Exited,
            MouseEventType::Entered,
        ]
    );
}

#[test]
fn destroyed_modal_holder_counts_as_release() {
    let Scene {
        mut gui,
        top,
        dialog,
        button,
        ..
    } = scene();
    let log = record_mouse(&mut gui, &[button]);

    move_to(&mut gui, 20, 20);
    gui.context().request_modal_mouse_input_focus(dialog).unwrap();
    gui.logic();
    assert!(queue_of(&gui).is_empty());

    gui.destroy_widget(dialog).unwrap();
    gui.logic();

    assert_eq!(gui.focus_handler().modal_mouse_input_focused(), None);
    assert_eq!(queue_of(&gui), vec![button, top]);
    assert_eq!(kinds_for(&log, button).last(), Some(&MouseEventType::Entered));
}

#[test]
fn modal_release_over_disabled_child_enters_each_widget_once() {
    let Scene {
        mut gui,
        top,
        dialog,
        ..
    } = scene();
    let panel = add_widget(&mut gui, top, "panel", Rect::new(100, 300, 200, 200));
    let disabled = add_widget(&mut gui, panel, "disabled", Rect::new(10, 10, 50, 50));
    gui.tree_mut().set_enabled(disabled, false).unwrap();
    let log = record_mouse(&mut gui, &[top, panel]);

    move_to(&mut gui, 120, 320);
    gui.context().request_modal_focus(dialog).unwrap();
    gui.logic();
    gui.context().release_modal_focus(dialog);
    gui.logic();

    assert_eq!(queue_of(&gui), vec![disabled, panel, top]);
    for widget in [panel, top] {
        assert_eq!(
            kinds_for(&log, widget),
            vec![
                MouseEventType::Entered,
                MouseEventType::Moved,
                MouseEventType::Exited,
                MouseEventType::Entered,
            ]
        );
    }
}
