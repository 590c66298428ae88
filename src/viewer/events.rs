//! DOM event wiring for `FigureGrid`.
//!
//! Every handler follows the same shape: translate the DOM event, call the
//! editor inside a short borrow, apply the returned [`EventResponse`] to the
//! event, then [`flush`] with the borrow released.

use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, ClipboardEvent, Event, EventTarget, FocusEvent, HtmlElement,
    KeyboardEvent, MouseEvent, WheelEvent,
};

use super::clipboard::paste_event_text;
use super::{flush, Inner};
use crate::editor::EventResponse;
use crate::layout::Point;
use crate::selection::{Key, Modifiers};

/// A registered DOM listener, removed again on drop.
pub(crate) struct Listener {
    target: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new<E, F>(target: &EventTarget, name: &'static str, passive: Option<bool>, mut handler: F) -> Self
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        }) as Box<dyn FnMut(Event)>);
        let callback = closure.as_ref().unchecked_ref();
        match passive {
            Some(passive) => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive);
                target
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        name, callback, &options,
                    )
                    .ok();
            }
            None => {
                target.add_event_listener_with_callback(name, callback).ok();
            }
        }
        Self {
            target: target.clone(),
            name,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.closure.as_ref().unchecked_ref());
    }
}

fn mouse_mods(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

fn key_mods(event: &KeyboardEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

fn apply_response(event: &Event, response: EventResponse) {
    if response.prevent_default {
        event.prevent_default();
    }
    if response.stop_propagation {
        event.stop_propagation();
    }
}

/// Pointer position in table-content pixels. The header strips are pinned,
/// so they are not offset by the scroll position.
#[allow(clippy::cast_possible_truncation)]
fn table_point(inner: &Inner, event: &MouseEvent) -> (f32, f32) {
    let rect = inner.container.get_bounding_client_rect();
    let sx = f64::from(event.client_x()) - rect.left();
    let sy = f64::from(event.client_y()) - rect.top();
    let (header_w, header_h) = match inner.editor.try_borrow() {
        Ok(editor) => (
            f64::from(editor.layout().header_width()),
            f64::from(editor.layout().header_height()),
        ),
        Err(_) => (0.0, 0.0),
    };
    let x = if sx < header_w {
        sx
    } else {
        sx + f64::from(inner.container.scroll_left())
    };
    let y = if sy < header_h {
        sy
    } else {
        sy + f64::from(inner.container.scroll_top())
    };
    (x as f32, y as f32)
}

/// Pointer position relative to the surface stage.
fn stage_point(inner: &Inner, event: &MouseEvent) -> Point {
    let origin = inner
        .surface
        .borrow()
        .as_ref()
        .map(|s| s.stage.get_bounding_client_rect())
        .map_or((0.0, 0.0), |r| (r.left(), r.top()));
    Point::new(
        f64::from(event.client_x()) - origin.0,
        f64::from(event.client_y()) - origin.1,
    )
}

fn is_overlay_input(inner: &Inner, event: &Event) -> bool {
    let Ok(overlay) = inner.overlay.try_borrow() else {
        return false;
    };
    let input: &EventTarget = overlay.element().as_ref();
    event.target().is_some_and(|t| &t == input)
}

/// Listeners for the table: pointer, keyboard, paste, scroll and the edit
/// input.
pub(crate) fn attach_table(inner: &Rc<Inner>) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let container: &EventTarget = inner.container.as_ref();

    // Pointer down on the table
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(container, "mousedown", None, move |event: MouseEvent| {
            let Some(inner) = weak.upgrade() else { return };
            if event.button() != 0 || is_overlay_input(&inner, &event) {
                return;
            }
            let (x, y) = table_point(&inner, &event);
            let response = inner.editor.borrow_mut().pointer_down(x, y);
            apply_response(&event, response);
            flush(&inner);
            if !inner.editor.borrow().selection().is_editing() {
                let _ = inner.container.focus();
            }
        }));
    }

    // Double click opens the edit input
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(container, "dblclick", None, move |event: MouseEvent| {
            let Some(inner) = weak.upgrade() else { return };
            if is_overlay_input(&inner, &event) {
                return;
            }
            let (x, y) = table_point(&inner, &event);
            let response = inner.editor.borrow_mut().double_click(x, y);
            apply_response(&event, response);
            flush(&inner);
        }));
    }

    // Moves and releases are global so drags keep working outside the table
    if let Some(window) = web_sys::window() {
        let window: &EventTarget = window.as_ref();
        {
            let weak = Rc::downgrade(inner);
            listeners.push(Listener::new(window, "mousemove", None, move |event: MouseEvent| {
                let Some(inner) = weak.upgrade() else { return };
                let ruler = inner.editor.borrow().view().is_dragging_ruler();
                let response = if ruler {
                    let point = stage_point(&inner, &event);
                    inner
                        .editor
                        .borrow_mut()
                        .ruler_pointer_move(point, event.shift_key())
                } else {
                    let (x, y) = table_point(&inner, &event);
                    inner
                        .editor
                        .borrow_mut()
                        .pointer_move(x, y, mouse_mods(&event))
                };
                apply_response(&event, response);
                flush(&inner);
            }));
        }
        {
            let weak = Rc::downgrade(inner);
            listeners.push(Listener::new(window, "mouseup", None, move |event: MouseEvent| {
                let Some(inner) = weak.upgrade() else { return };
                let response = inner.editor.borrow_mut().pointer_up();
                apply_response(&event, response);
                flush(&inner);
            }));
        }
    }

    // Keyboard, including keys bubbling up from the edit input
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(container, "keydown", None, move |event: KeyboardEvent| {
            let Some(inner) = weak.upgrade() else { return };
            let key = Key::from_dom(&event.key());
            let mods = key_mods(&event);
            let editing = inner.editor.borrow().selection().is_editing();
            // Let the browser turn Ctrl/Cmd+V into a paste event
            if mods.command() && !editing && matches!(key, Key::Char('v' | 'V')) {
                return;
            }
            let response = inner.editor.borrow_mut().key_down(key, mods);
            apply_response(&event, response);
            flush(&inner);
        }));
    }

    // Paste outside editing (inside, the input takes it natively)
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(container, "paste", None, move |event: ClipboardEvent| {
            let Some(inner) = weak.upgrade() else { return };
            if inner.editor.borrow().selection().is_editing() {
                return;
            }
            let Some(text) = paste_event_text(&event) else {
                return;
            };
            event.prevent_default();
            inner.editor.borrow_mut().paste_text(&text);
            flush(&inner);
        }));
    }

    // Native scroll repaints the visible window
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(container, "scroll", Some(true), move |_event: Event| {
            let Some(inner) = weak.upgrade() else { return };
            inner.invalidate();
            flush(&inner);
        }));
    }

    // Edit input: keep the buffer current, commit on blur
    let input: EventTarget = match inner.overlay.try_borrow() {
        Ok(overlay) => overlay.element().clone().into(),
        Err(_) => return listeners,
    };
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(&input, "input", None, move |_event: Event| {
            let Some(inner) = weak.upgrade() else { return };
            let value = match inner.overlay.try_borrow() {
                Ok(overlay) => overlay.element().value(),
                Err(_) => return,
            };
            inner.editor.borrow_mut().set_edit_buffer(&value);
        }));
    }
    {
        let weak = Rc::downgrade(inner);
        listeners.push(Listener::new(&input, "blur", None, move |_event: FocusEvent| {
            let Some(inner) = weak.upgrade() else { return };
            let Ok(mut editor) = inner.editor.try_borrow_mut() else {
                return;
            };
            editor.blur_edit();
            drop(editor);
            flush(&inner);
        }));
    }

    listeners
}

/// Listeners for the canvas + ruler surface: wheel pan/zoom with frame
/// coalescing, and ruler drags.
pub(crate) fn attach_surface(
    inner: &Rc<Inner>,
    stage: &HtmlElement,
    ruler: Option<&HtmlElement>,
) -> Vec<Listener> {
    let mut listeners = Vec::new();

    {
        let weak = Rc::downgrade(inner);
        let stage_target: &EventTarget = stage.as_ref();
        listeners.push(Listener::new(stage_target, "wheel", Some(false), move |event: WheelEvent| {
            let Some(inner) = weak.upgrade() else { return };
            event.prevent_default();
            let point = stage_point(&inner, &event);
            let schedule = inner.editor.borrow_mut().wheel(
                event.delta_x(),
                event.delta_y(),
                point,
                mouse_mods(&event),
            );
            if schedule {
                request_frame(&inner);
            }
        }));
    }

    if let Some(ruler) = ruler {
        let weak = Rc::downgrade(inner);
        let ruler_target: &EventTarget = ruler.as_ref();
        listeners.push(Listener::new(ruler_target, "mousedown", None, move |event: MouseEvent| {
            let Some(inner) = weak.upgrade() else { return };
            if event.button() != 0 {
                return;
            }
            let point = stage_point(&inner, &event);
            inner.editor.borrow_mut().ruler_pointer_down(point);
            event.prevent_default();
            event.stop_propagation();
        }));
    }

    listeners
}

/// Schedule one animation frame that folds pending wheel input into the
/// view. The editor only asks for a frame when none is pending, so the
/// previous callback has already run when it is replaced here.
fn request_frame(inner: &Rc<Inner>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let weak: Weak<Inner> = Rc::downgrade(inner);
    let closure = Closure::wrap(Box::new(move || {
        let Some(inner) = weak.upgrade() else { return };
        inner.editor.borrow_mut().apply_frame();
        flush(&inner);
    }) as Box<dyn FnMut()>);
    if window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .is_ok()
    {
        *inner.frame.borrow_mut() = Some(closure);
    }
}
