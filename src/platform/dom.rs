//! DOM lookup and cue application
//!
//! Everything here is glue: find the card's elements once, then turn
//! `CardCue`s into class toggles and inline styles.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::renderer::canvas::CanvasSurface;
use crate::settings::CardConfig;
use crate::sim::{CardCue, FloatingHeart, HEART_GLYPH, Rect, StageCue};
use crate::CardError;
use crate::consts::{ACCEPT_BOUNCE, ACCEPT_BOUNCE_MS};

pub const CONFETTI_ID: &str = "confetti";

/// The card's elements; any of them may be missing from the page
pub struct Elements {
    pub envelope_stage: Option<HtmlElement>,
    pub envelope: Option<HtmlElement>,
    pub letter_stage: Option<HtmlElement>,
    pub accept: Option<HtmlElement>,
    pub decline: Option<HtmlElement>,
    pub decline_zone: Option<HtmlElement>,
    pub question: Option<HtmlElement>,
    pub celebrate: Option<HtmlElement>,
    pub paper: Option<HtmlElement>,
}

fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn by_selector(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

impl Elements {
    pub fn lookup(document: &Document) -> Self {
        Self {
            envelope_stage: by_id(document, "envelopeStage"),
            envelope: by_id(document, "envelope"),
            letter_stage: by_id(document, "letterStage"),
            accept: by_id(document, "yesBtn"),
            decline: by_id(document, "noBtn"),
            decline_zone: by_selector(document, ".no-zone"),
            question: by_id(document, "questionBlock"),
            celebrate: by_id(document, "celebrate"),
            paper: by_selector(document, ".paper"),
        }
    }

    /// One error per absent element
    pub fn missing(&self) -> Vec<CardError> {
        [
            (self.envelope_stage.is_none(), "#envelopeStage"),
            (self.envelope.is_none(), "#envelope"),
            (self.letter_stage.is_none(), "#letterStage"),
            (self.accept.is_none(), "#yesBtn"),
            (self.decline.is_none(), "#noBtn"),
            (self.decline_zone.is_none(), ".no-zone"),
            (self.question.is_none(), "#questionBlock"),
            (self.celebrate.is_none(), "#celebrate"),
            (self.paper.is_none(), ".paper"),
        ]
        .into_iter()
        .filter(|(absent, _)| *absent)
        .map(|(_, what)| CardError::MissingElement(what))
        .collect()
    }

    /// Zone rectangle (padding box) and button rectangle, both in viewport space
    pub fn measure_decline(&self) -> Option<(Rect, Rect)> {
        let zone = self.decline_zone.as_ref()?;
        let button = self.decline.as_ref()?;
        let zr = zone.get_bounding_client_rect();
        let br = button.get_bounding_client_rect();
        Some((
            Rect::new(
                zr.left() as f32,
                zr.top() as f32,
                zone.client_width() as f32,
                zone.client_height() as f32,
            ),
            Rect::new(
                br.left() as f32,
                br.top() as f32,
                br.width() as f32,
                br.height() as f32,
            ),
        ))
    }
}

/// Find the confetti canvas and grab its 2D context
pub fn open_confetti_surface(document: &Document) -> Result<CanvasSurface, CardError> {
    let el = document
        .get_element_by_id(CONFETTI_ID)
        .ok_or(CardError::MissingElement("#confetti"))?;
    let canvas = el
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| CardError::NotACanvas(CONFETTI_ID))?;
    CanvasSurface::new(canvas)
}

fn add_class(el: &Option<HtmlElement>, class: &str) {
    if let Some(el) = el {
        let _ = el.class_list().add_1(class);
    }
}

fn remove_class(el: &Option<HtmlElement>, class: &str) {
    if let Some(el) = el {
        let _ = el.class_list().remove_1(class);
    }
}

fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in styles {
        let _ = style.set_property(name, value);
    }
}

/// Fade an element out with a CSS transition of `ms`
fn fade_out(el: &Option<HtmlElement>, ms: f64, transform: &str) {
    if let Some(el) = el {
        let transition = format!("all {:.2}s ease", ms / 1000.0);
        set_styles(
            el,
            &[("transition", &transition), ("opacity", "0"), ("transform", transform)],
        );
    }
}

/// Apply one cue to the page
pub fn apply_cue(els: &Elements, cue: &CardCue, config: &CardConfig) {
    match cue {
        CardCue::Stage(stage) => apply_stage(els, *stage, config),
        CardCue::MoveDecline(offset) => {
            if let Some(btn) = &els.decline {
                let left = format!("{}px", offset.x);
                let top = format!("{}px", offset.y);
                set_styles(btn, &[("left", &left), ("top", &top), ("transform", "none")]);
            }
        }
        CardCue::ScaleAccept(scale) => {
            if let Some(btn) = &els.accept {
                scale_with_bounce(btn, *scale);
            }
        }
        CardCue::Hearts(hearts) => spawn_hearts(hearts, config.heart_lifetime_ms),
    }
}

fn apply_stage(els: &Elements, stage: StageCue, config: &CardConfig) {
    match stage {
        StageCue::OpenEnvelope => add_class(&els.envelope, "open"),
        StageCue::FadeEnvelopeStage => add_class(&els.envelope_stage, "fade-out"),
        StageCue::HideEnvelopeStage => add_class(&els.envelope_stage, "hidden"),
        StageCue::RevealLetter => {
            remove_class(&els.letter_stage, "hidden");
            add_class(&els.letter_stage, "show");
        }
        StageCue::FadeQuestion => fade_out(&els.question, config.question_fade_ms, "translateY(8px)"),
        StageCue::RemoveQuestion => {
            if let Some(el) = &els.question {
                el.remove();
            }
        }
        StageCue::FadeLetter => fade_out(
            &els.paper,
            config.letter_fade_ms,
            "scale(0.96) translateY(-10px)",
        ),
        StageCue::RemoveLetter => {
            if let Some(el) = &els.paper {
                el.remove();
            }
        }
        StageCue::RevealCelebration => remove_class(&els.celebrate, "hidden"),
        // Driven by the frame loop and the Hearts cue
        StageCue::StartConfetti | StageCue::SpawnHearts => {}
    }
}

fn scale_with_bounce(btn: &HtmlElement, scale: f32) {
    let transform = format!("scale({scale})");
    set_styles(
        btn,
        &[("transition", "transform 0.18s ease-out"), ("transform", &transform)],
    );

    let frames = js_sys::Array::new();
    for s in [scale, scale + ACCEPT_BOUNCE, scale] {
        let frame = js_sys::Object::new();
        let _ = js_sys::Reflect::set(
            &frame,
            &"transform".into(),
            &format!("scale({s})").into(),
        );
        frames.push(&frame);
    }
    let frames: &js_sys::Object = frames.as_ref();
    let _ = btn.animate_with_f64(Some(frames), ACCEPT_BOUNCE_MS);
}

fn spawn_hearts(hearts: &[FloatingHeart], lifetime_ms: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(body) = document.body() else {
        log::warn!("No <body> for floating hearts");
        return;
    };

    for heart in hearts {
        let Ok(el) = document.create_element("div") else {
            continue;
        };
        el.set_text_content(Some(HEART_GLYPH));
        el.set_class_name("float-heart");
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let left = format!("{}vw", heart.left_vw);
            let delay = format!("{}s", heart.delay_s);
            let size = format!("{}px", heart.font_px);
            set_styles(
                &el,
                &[("left", &left), ("animation-delay", &delay), ("font-size", &size)],
            );
            let _ = body.append_child(&el);

            let closure = Closure::once(move || el.remove());
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                lifetime_ms as i32,
            );
            closure.forget();
        }
    }
}
