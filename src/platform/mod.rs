//! Browser glue
//!
//! Wires DOM events into `handle_event`, applies the returned cues, and keeps
//! two timers alive: a `setTimeout` for the next stage deadline and a
//! `requestAnimationFrame` loop while confetti is running.

pub mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::{Closure, WasmClosure};
use web_sys::{EventTarget, KeyboardEvent, MouseEvent, TouchEvent, Window};

use crate::renderer::canvas::{CanvasSurface, RafRequest};
use crate::renderer::run_frame;
use crate::settings::CardConfig;
use crate::sim::{CardCue, CardEvent, CardState, StageCue, handle_event, next_wake, tick};
use dom::Elements;

/// Card instance shared by every callback
struct Card {
    state: CardState,
    elements: Elements,
    surface: Option<CanvasSurface>,
    /// A rAF callback is queued
    frame_loop_active: bool,
    /// Deadline the pending wake timer was set for
    wake_at: Option<f64>,
}

fn viewport_size(window: &Window) -> Vec2 {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

fn add_listener<T: ?Sized + WasmClosure>(target: &EventTarget, kind: &str, closure: Closure<T>) {
    let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }

    log::info!("Love letter starting...");

    let Some(window) = web_sys::window() else {
        web_sys::console::error_1(&"No window; nothing to do".into());
        return;
    };
    let Some(document) = window.document() else {
        log::error!("No document; nothing to do");
        return;
    };

    let elements = Elements::lookup(&document);
    for missing in elements.missing() {
        log::error!("{missing}");
    }

    let config = CardConfig::load(&document);
    let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
    let viewport = viewport_size(&window);

    let surface = match dom::open_confetti_surface(&document) {
        Ok(surface) => {
            surface.resize(viewport, window.device_pixel_ratio());
            Some(surface)
        }
        Err(e) => {
            log::error!("{e}; confetti disabled");
            None
        }
    };

    let card = Rc::new(RefCell::new(Card {
        state: CardState::new(config, seed, viewport),
        elements,
        surface,
        frame_loop_active: false,
        wake_at: None,
    }));

    log::info!("Card initialized with seed: {}", seed);

    setup_resize(&window, card.clone());
    setup_pointer(&document, card.clone());
    setup_envelope(card.clone());
    setup_buttons(card);

    log::info!("Love letter ready");
}

/// Events that need a fresh layout of the decline button first
fn needs_layout(event: &CardEvent) -> bool {
    matches!(
        event,
        CardEvent::PointerMoved(_) | CardEvent::DeclineEntered(_) | CardEvent::DeclinePressed
    )
}

fn dispatch(card: &Rc<RefCell<Card>>, event: CardEvent) {
    let now = js_sys::Date::now();
    let cues = {
        let mut guard = card.borrow_mut();
        let c = &mut *guard;
        if needs_layout(&event) {
            if let Some((zone, control)) = c.elements.measure_decline() {
                handle_event(&mut c.state, CardEvent::DeclineMeasured { zone, control }, now);
            }
        }
        handle_event(&mut c.state, event, now)
    };
    apply(card, cues);
}

fn apply(card: &Rc<RefCell<Card>>, cues: Vec<CardCue>) {
    let start_confetti = {
        let c = card.borrow();
        for cue in &cues {
            dom::apply_cue(&c.elements, cue, &c.state.config);
        }
        cues.contains(&CardCue::Stage(StageCue::StartConfetti))
    };
    if start_confetti {
        start_frame_loop(card);
    }
    schedule_wake(card);
}

/// Arm a timer for the next stage deadline, unless an earlier one is armed
fn schedule_wake(card: &Rc<RefCell<Card>>) {
    let delay = {
        let mut c = card.borrow_mut();
        let Some(deadline) = next_wake(&c.state) else {
            return;
        };
        if c.wake_at.is_some_and(|at| at <= deadline) {
            return;
        }
        c.wake_at = Some(deadline);
        (deadline - js_sys::Date::now()).max(0.0)
    };

    let Some(window) = web_sys::window() else {
        return;
    };
    let card = card.clone();
    let closure = Closure::once(move || {
        let cues = {
            let mut c = card.borrow_mut();
            c.wake_at = None;
            tick(&mut c.state, js_sys::Date::now())
        };
        apply(&card, cues);
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay.ceil() as i32,
    );
    closure.forget();
}

fn start_frame_loop(card: &Rc<RefCell<Card>>) {
    {
        let mut c = card.borrow_mut();
        if c.surface.is_none() {
            log::warn!("Confetti started without a canvas");
            return;
        }
        if c.frame_loop_active {
            return;
        }
        c.frame_loop_active = true;
    }
    request_animation_frame(card.clone());
}

fn request_animation_frame(card: Rc<RefCell<Card>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| confetti_frame(card));
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn confetti_frame(card: Rc<RefCell<Card>>) {
    let again = {
        let mut guard = card.borrow_mut();
        let c = &mut *guard;
        let mut raf = RafRequest::default();
        if let Some(surface) = c.surface.as_mut() {
            run_frame(
                &mut c.state.confetti,
                js_sys::Date::now(),
                c.state.viewport,
                surface,
                &mut raf,
            );
        }
        c.frame_loop_active = raf.requested;
        raf.requested
    };
    if again {
        request_animation_frame(card);
    }
}

fn setup_resize(window: &Window, card: Rc<RefCell<Card>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let viewport = viewport_size(&window);
        if let Some(surface) = &card.borrow().surface {
            surface.resize(viewport, window.device_pixel_ratio());
        }
        dispatch(&card, CardEvent::Resized(viewport));
    });
    add_listener(window, "resize", closure);
}

fn setup_pointer(document: &web_sys::Document, card: Rc<RefCell<Card>>) {
    // Mouse move
    {
        let card = card.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            dispatch(&card, CardEvent::PointerMoved(pos));
        });
        add_listener(document, "mousemove", closure);
    }

    // Touch move (first touch only)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            if let Some(touch) = event.touches().get(0) {
                let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                dispatch(&card, CardEvent::PointerMoved(pos));
            }
        });
        add_listener(document, "touchmove", closure);
    }
}

fn setup_envelope(card: Rc<RefCell<Card>>) {
    let Some(envelope) = card.borrow().elements.envelope.clone() else {
        return;
    };

    {
        let card = card.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            dispatch(&card, CardEvent::EnvelopeActivated);
        });
        add_listener(&envelope, "click", closure);
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if key == "Enter" || key == " " {
                event.prevent_default();
                dispatch(&card, CardEvent::EnvelopeActivated);
            }
        });
        add_listener(&envelope, "keydown", closure);
    }
}

fn setup_buttons(card: Rc<RefCell<Card>>) {
    let (decline, accept) = {
        let c = card.borrow();
        (c.elements.decline.clone(), c.elements.accept.clone())
    };

    if let Some(decline) = decline {
        {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                dispatch(&card, CardEvent::DeclineEntered(pos));
            });
            add_listener(&decline, "mouseenter", closure);
        }
        {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&card, CardEvent::DeclinePressed);
            });
            add_listener(&decline, "mousedown", closure);
        }
        {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                event.stop_propagation();
                dispatch(&card, CardEvent::DeclineClicked);
            });
            add_listener(&decline, "click", closure);
        }
    }

    if let Some(accept) = accept {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            dispatch(&card, CardEvent::AcceptClicked);
        });
        add_listener(&accept, "click", closure);
    }
}
