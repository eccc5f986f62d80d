//! Browser shell for the falling-word arcade mode.
//!
//! This module owns every DOM concern: canvas and overlay creation (elements
//! are reused when the page already provides them by id), event listeners,
//! the requestAnimationFrame render loop, and the mapping from simulation
//! outcomes onto sounds, speech, and panel updates. All gameplay rules live
//! in [`session`]; nothing here decides game logic.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement, console, window,
};

pub mod advisor;
pub mod asteroid;
pub mod audio;
mod render;
pub mod rng;
pub mod session;
pub mod speech;

use audio::AudioControls;
use rng::SeededRng;
use session::{GameSession, KeyOutcome, TickOutcome};

const CANVAS_ID: &str = "wa-game-canvas";
const OVERLAY_ID: &str = "wa-game-overlay";
const OVERLAY_TITLE_ID: &str = "wa-overlay-title";
const START_BUTTON_ID: &str = "wa-start-button";
const PAUSE_BUTTON_ID: &str = "wa-pause-button";
const MENU_BUTTON_ID: &str = "wa-menu-button";
const HELP_BUTTON_ID: &str = "wa-help-button";
const SOUND_TOGGLE_ID: &str = "wa-sound-toggle";
const BGM_TOGGLE_ID: &str = "wa-bgm-toggle";
const CONTROLS_ID: &str = "wa-controls";
const LANGUAGE_SELECT_ID: &str = "wa-language-select";
const AI_PANEL_ID: &str = "wa-ai-message";
const TARGET_LABEL_ID: &str = "wa-current-target";
const TEXT_INPUT_ID: &str = "wa-text-input";

const INITIAL_SPAWN_COUNT: i32 = 3;
const INITIAL_SPAWN_INTERVAL_MS: i32 = 1000;
const TRANSLATION_OVERLAY_MS: i32 = 2000;

const BUTTON_STYLE: &str = "font-family:monospace; font-size:14px; padding:4px 10px; \
     background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; \
     color:#ffd166; cursor:pointer;";

/// Everything the shell mutates across callbacks. One cell, no ambient globals.
struct Shell {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: GameSession,
    audio: AudioControls,
    selected_language: String,
    input: HtmlInputElement,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static SHELL: RefCell<Option<Shell>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start_arcade_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = ensure_canvas(&doc, &win)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    ensure_overlay(&doc)?;
    ensure_controls(&doc)?;
    let input = ensure_hud(&doc)?;

    let words = load_game_words(&win);
    console::log_1(&JsValue::from_str(&format!(
        "Game words loaded: {}",
        words.len()
    )));

    let session = GameSession::new(
        canvas.width() as f64,
        canvas.height() as f64,
        words,
        clock_seed(),
    );
    SHELL.with(|cell| {
        cell.replace(Some(Shell {
            canvas: canvas.clone(),
            ctx,
            session,
            audio: AudioControls::new(),
            selected_language: "ja".to_string(),
            input: input.clone(),
        }))
    });

    wire_buttons(&doc)?;
    wire_language_select(&doc)?;
    wire_typing_input(&input)?;
    wire_global_keys(&doc)?;
    wire_resize(&win, &canvas)?;

    // Idle frame behind the menu overlay so the page is never blank.
    SHELL.with(|cell| {
        if let Some(shell) = cell.borrow().as_ref() {
            render::draw_scene(
                &shell.ctx,
                shell.canvas.width() as f64,
                shell.canvas.height() as f64,
                &shell.session,
            );
        }
    });
    Ok(())
}

// --- Session control -------------------------------------------------------

fn start_session() {
    SHELL.with(|cell| {
        if let Some(shell) = cell.borrow_mut().as_mut() {
            shell.session.start();
            shell.audio.start_bgm();
            shell.input.set_value("");
            shell.input.focus().ok();
        }
    });
    set_display(OVERLAY_ID, "none");
    set_display(AI_PANEL_ID, "block");
    set_display(TEXT_INPUT_ID, "block");
    set_display(PAUSE_BUTTON_ID, "inline-block");
    set_display(MENU_BUTTON_ID, "inline-block");
    set_text(TARGET_LABEL_ID, "Target: None");
    set_text(PAUSE_BUTTON_ID, "⏸ Pause");
    schedule_initial_spawns();
    start_render_loop();
}

/// Shared end-of-session DOM/audio work. The advisor request happens outside
/// the state borrow (see callers) because its fallback path can deliver
/// synchronously.
fn finish_session_visuals(shell: &mut Shell, score: u32) {
    shell.audio.stop_bgm();
    set_text(
        OVERLAY_TITLE_ID,
        &format!("Game Over! Final Score: {score}"),
    );
    set_display(OVERLAY_ID, "flex");
    set_display(AI_PANEL_ID, "none");
    set_display(TEXT_INPUT_ID, "none");
    set_display(PAUSE_BUTTON_ID, "none");
    set_display(MENU_BUTTON_ID, "none");
    set_text(TARGET_LABEL_ID, "Target: None");
}

fn request_game_over_message(score: u32, issued_generation: u64) {
    advisor::request_advice(
        advisor::game_over_prompt(score),
        clock_seed(),
        Box::new(move |message| {
            let current = SHELL.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map(|shell| shell.session.generation())
            });
            if current.is_some_and(|g| advisor::is_response_current(issued_generation, g)) {
                set_text(AI_PANEL_ID, &message);
                set_display(AI_PANEL_ID, "block");
            }
        }),
    );
}

fn trigger_help_tip() {
    set_text(AI_PANEL_ID, "Getting advice...");
    let issued = SHELL.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|shell| shell.session.generation())
    });
    let Some(issued) = issued else {
        return;
    };
    let mut rng = SeededRng::new(clock_seed());
    let prompt = advisor::tip_prompt(&mut rng).to_string();
    advisor::request_advice(
        prompt,
        clock_seed().wrapping_mul(31),
        Box::new(move |message| {
            let clean = message.replace('*', "");
            let current = SHELL.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map(|shell| shell.session.generation())
            });
            if current.is_some_and(|g| advisor::is_response_current(issued, g)) {
                set_text(AI_PANEL_ID, &clean);
                speech::speak_native(&clean, "en-US");
            }
        }),
    );
}

fn schedule_initial_spawns() {
    let Some(win) = window() else {
        return;
    };
    for i in 0..INITIAL_SPAWN_COUNT {
        let spawn = Closure::once(move || {
            SHELL.with(|cell| {
                if let Some(shell) = cell.borrow_mut().as_mut() {
                    shell.session.spawn_burst_asteroid();
                }
            });
        });
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            spawn.as_ref().unchecked_ref(),
            i * INITIAL_SPAWN_INTERVAL_MS,
        )
        .ok();
        spawn.forget();
    }
}

// --- Render loop -----------------------------------------------------------

enum FrameResult {
    Continue,
    GameOver { score: u32, generation: u64 },
    Stop,
}

fn start_render_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let result = SHELL.with(|cell| match cell.borrow_mut().as_mut() {
            Some(shell) => frame_tick(shell),
            None => FrameResult::Stop,
        });
        match result {
            FrameResult::Continue => {
                if let Some(w) = window() {
                    let _ = w.request_animation_frame(
                        f.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    );
                }
            }
            FrameResult::GameOver { score, generation } => {
                request_game_over_message(score, generation);
            }
            FrameResult::Stop => {}
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame_tick(shell: &mut Shell) -> FrameResult {
    if !shell.session.is_running() {
        return FrameResult::Stop;
    }
    let width = shell.canvas.width() as f64;
    let height = shell.canvas.height() as f64;
    shell.session.set_viewport(width, height);

    let outcome = shell.session.tick();
    // Drawing happens every frame, paused or not.
    render::draw_scene(&shell.ctx, width, height, &shell.session);

    if outcome == TickOutcome::Overflowed {
        let score = shell.session.score();
        let generation = shell.session.generation();
        finish_session_visuals(shell, score);
        return FrameResult::GameOver { score, generation };
    }
    FrameResult::Continue
}

// --- Input handling --------------------------------------------------------

fn handle_typing_input(input: &HtmlInputElement) {
    SHELL.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(shell) = borrow.as_mut() else {
            return;
        };
        if !shell.session.is_running() {
            return;
        }
        let value = input.value();
        let Some(last) = value.chars().last() else {
            return;
        };

        let has_target = shell.session.target_index().is_some();
        if !has_target && value.chars().count() > 1 {
            // Stale buffer with no target (it escaped or was just destroyed):
            // clear so the next keystroke can re-target.
            input.set_value("");
            return;
        }

        match shell.session.accept_char(last) {
            KeyOutcome::Locked { word } => {
                shell.audio.play_tone(audio::SUCCESS_TONE);
                set_text(TARGET_LABEL_ID, &format!("Target: {word}"));
                speech::speak_native(&word, "en-US");
            }
            KeyOutcome::Advanced => shell.audio.play_tone(audio::SUCCESS_TONE),
            KeyOutcome::Completed { word, .. } => {
                shell.audio.play_tone(audio::SUCCESS_TONE);
                // Clear input only on successful destruction.
                input.set_value("");
                set_text(TARGET_LABEL_ID, "Target: None");
                show_translation(&shell.selected_language, &word);
                shell.audio.play_tone(audio::DESTRUCTION_TONE);
            }
            KeyOutcome::Rejected => {
                // Keep the buffer so the player can correct with backspace.
                shell.audio.play_tone(audio::ERROR_TONE);
            }
            KeyOutcome::NoMatch => {
                input.set_value("");
                shell.audio.play_tone(audio::ERROR_TONE);
            }
        }
    });
}

fn handle_backspace(input: &HtmlInputElement) {
    SHELL.with(|cell| {
        if let Some(shell) = cell.borrow_mut().as_mut() {
            // keydown fires before the deletion lands, so a length of 1 means
            // the buffer is about to become empty.
            if shell.session.target_index().is_some() && input.value().chars().count() <= 1 {
                shell.session.release_target();
                set_text(TARGET_LABEL_ID, "Target: None");
            }
        }
    });
}

// --- Listener wiring -------------------------------------------------------

fn wire_buttons(doc: &Document) -> Result<(), JsValue> {
    on_click(doc, START_BUTTON_ID, start_session)?;
    on_click(doc, PAUSE_BUTTON_ID, || {
        SHELL.with(|cell| {
            if let Some(shell) = cell.borrow_mut().as_mut() {
                shell.session.toggle_pause();
                let label = if shell.session.is_paused() {
                    "▶ Resume"
                } else {
                    "⏸ Pause"
                };
                set_text(PAUSE_BUTTON_ID, label);
            }
        });
    })?;
    on_click(doc, MENU_BUTTON_ID, || {
        let ended = SHELL.with(|cell| {
            let mut borrow = cell.borrow_mut();
            let shell = borrow.as_mut()?;
            if !shell.session.is_running() {
                return None;
            }
            shell.session.end();
            let score = shell.session.score();
            let generation = shell.session.generation();
            finish_session_visuals(shell, score);
            Some((score, generation))
        });
        if let Some((score, generation)) = ended {
            request_game_over_message(score, generation);
        }
    })?;
    on_click(doc, HELP_BUTTON_ID, trigger_help_tip)?;
    on_click(doc, SOUND_TOGGLE_ID, || {
        SHELL.with(|cell| {
            if let Some(shell) = cell.borrow_mut().as_mut() {
                let enabled = shell.audio.toggle_sound();
                set_text(
                    SOUND_TOGGLE_ID,
                    if enabled {
                        "🔊 Sound: ON"
                    } else {
                        "🔇 Sound: OFF"
                    },
                );
            }
        });
    })?;
    on_click(doc, BGM_TOGGLE_ID, || {
        SHELL.with(|cell| {
            if let Some(shell) = cell.borrow_mut().as_mut() {
                let enabled = shell.audio.toggle_bgm();
                if enabled && shell.session.is_running() {
                    shell.audio.start_bgm();
                }
                set_text(
                    BGM_TOGGLE_ID,
                    if enabled { "🎵 BGM: ON" } else { "🔇 BGM: OFF" },
                );
            }
        });
    })?;
    Ok(())
}

fn wire_language_select(doc: &Document) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id(LANGUAGE_SELECT_ID) else {
        return Ok(());
    };
    let select: HtmlSelectElement = el.dyn_into()?;
    let select_for_change = select.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let value = select_for_change.value();
        SHELL.with(|cell| {
            if let Some(shell) = cell.borrow_mut().as_mut() {
                shell.selected_language = value.clone();
            }
        });
    }) as Box<dyn FnMut(_)>);
    select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_typing_input(input: &HtmlInputElement) -> Result<(), JsValue> {
    {
        let input_for_event = input.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            handle_typing_input(&input_for_event);
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let input_for_key = input.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Backspace" {
                handle_backspace(&input_for_key);
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn wire_global_keys(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.key() == "Tab" {
            evt.prevent_default();
            trigger_help_tip();
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_resize(win: &web_sys::Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        if let Some(win) = window() {
            let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
            let height = win
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(720.0);
            canvas_resize.set_width(width as u32);
            canvas_resize.set_height(height as u32);
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_click(
    doc: &Document,
    id: &str,
    mut callback: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id(id) else {
        return Ok(());
    };
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| callback())
        as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Translation overlay ---------------------------------------------------

fn show_translation(language: &str, word: &str) {
    let capitalized = capitalize(word);
    let translation = lookup_translation(&capitalized, language);

    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Ok(div) = doc.create_element("div") {
            let (accent, body_html) = match &translation {
                Some(text) => (
                    "#00ff00",
                    format!("Word completed: <strong>{capitalized}</strong><br>{text}"),
                ),
                None => (
                    "#ffff00",
                    format!(
                        "Word completed: <strong>{capitalized}</strong><br><em>(No translation available for {language})</em>"
                    ),
                ),
            };
            div.set_attribute(
                "style",
                &format!(
                    "position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); \
                     background:rgba(0,0,0,0.9); color:{accent}; padding:20px; \
                     border-radius:10px; font-size:24px; font-family:monospace; \
                     z-index:1000; border:2px solid {accent};"
                ),
            )
            .ok();
            div.set_inner_html(&body_html);
            if let Some(body) = doc.body() {
                body.append_child(&div).ok();
            }
            let removed = div.clone();
            let close = Closure::once(move || {
                removed.remove();
            });
            if let Some(win) = window() {
                win.set_timeout_with_callback_and_timeout_and_arguments_0(
                    close.as_ref().unchecked_ref(),
                    TRANSLATION_OVERLAY_MS,
                )
                .ok();
            }
            close.forget();
        }
    }

    // Ensure the utterance is not interrupted by a queued one.
    speech::cancel_native();
    match translation {
        Some(text) => {
            let code = speech::tts_lang_code(language).unwrap_or("en-US");
            speech::speak_native(&text, code);
        }
        None => {
            speech::speak_native(&capitalized, "en-US");
        }
    }
}

// --- External word data ----------------------------------------------------

fn load_game_words(win: &web_sys::Window) -> Vec<String> {
    let loaded: Vec<String> = js_sys::Reflect::get(win.as_ref(), &JsValue::from_str("gameWords"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.dyn_into::<js_sys::Array>().ok())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_string())
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if loaded.is_empty() {
        crate::FALLBACK_WORDS.iter().map(|w| w.to_string()).collect()
    } else {
        loaded
    }
}

fn lookup_translation(capitalized: &str, language: &str) -> Option<String> {
    let win = window()?;
    let table = js_sys::Reflect::get(win.as_ref(), &JsValue::from_str("wordTranslations")).ok()?;
    if table.is_undefined() || table.is_null() {
        return None;
    }
    let entry = js_sys::Reflect::get(&table, &JsValue::from_str(capitalized)).ok()?;
    if entry.is_undefined() || entry.is_null() {
        return None;
    }
    js_sys::Reflect::get(&entry, &JsValue::from_str(language))
        .ok()?
        .as_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// --- DOM scaffolding -------------------------------------------------------

fn ensure_canvas(doc: &Document, win: &web_sys::Window) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", "position:fixed; inset:0; background:#0b0f13; z-index:1;")
            .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let width = win.inner_width()?.as_f64().unwrap_or(1280.0);
    let height = win.inner_height()?.as_f64().unwrap_or(720.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok(canvas)
}

fn ensure_overlay(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(OVERLAY_ID).is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let overlay = doc.create_element("div")?;
    overlay.set_id(OVERLAY_ID);
    overlay
        .set_attribute(
            "style",
            "position:fixed; inset:0; display:flex; flex-direction:column; \
             align-items:center; justify-content:center; gap:18px; \
             background:rgba(0,0,0,0.78); color:#cde8ff; font-family:monospace; z-index:60;",
        )
        .ok();

    let title = doc.create_element("h1")?;
    title.set_id(OVERLAY_TITLE_ID);
    title.set_text_content(Some("Word Asteroids"));
    overlay.append_child(&title)?;

    let hint = doc.create_element("div")?;
    hint.set_text_content(Some(
        "Type the falling words before they reach the bottom. \
         Press Tab for help, select a language for translations.",
    ));
    overlay.append_child(&hint)?;

    let start = doc.create_element("button")?;
    start.set_id(START_BUTTON_ID);
    start.set_text_content(Some("▶ Start Game"));
    start.set_attribute("style", BUTTON_STYLE).ok();
    overlay.append_child(&start)?;

    body.append_child(&overlay)?;
    Ok(())
}

fn ensure_controls(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(CONTROLS_ID).is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let bar = doc.create_element("div")?;
    bar.set_id(CONTROLS_ID);
    bar.set_attribute(
        "style",
        "position:fixed; top:10px; right:12px; display:flex; gap:8px; z-index:50;",
    )
    .ok();

    let buttons: [(&str, &str, bool); 5] = [
        (PAUSE_BUTTON_ID, "⏸ Pause", true),
        (MENU_BUTTON_ID, "↩ Menu", true),
        (HELP_BUTTON_ID, "💡 Help", false),
        (SOUND_TOGGLE_ID, "🔊 Sound: ON", false),
        (BGM_TOGGLE_ID, "🎵 BGM: ON", false),
    ];
    for (id, label, start_hidden) in buttons {
        let button = doc.create_element("button")?;
        button.set_id(id);
        button.set_text_content(Some(label));
        let style = if start_hidden {
            format!("{BUTTON_STYLE} display:none;")
        } else {
            BUTTON_STYLE.to_string()
        };
        button.set_attribute("style", &style).ok();
        bar.append_child(&button)?;
    }

    let select = doc.create_element("select")?;
    select.set_id(LANGUAGE_SELECT_ID);
    select.set_attribute("style", BUTTON_STYLE).ok();
    for (lang, _) in crate::TTS_LANGUAGE_CODES {
        let option = doc.create_element("option")?;
        option.set_attribute("value", lang).ok();
        option.set_text_content(Some(lang));
        select.append_child(&option)?;
    }
    bar.append_child(&select)?;

    body.append_child(&bar)?;
    Ok(())
}

fn ensure_hud(doc: &Document) -> Result<HtmlInputElement, JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    if doc.get_element_by_id(AI_PANEL_ID).is_none() {
        let panel = doc.create_element("div")?;
        panel.set_id(AI_PANEL_ID);
        panel
            .set_attribute(
                "style",
                "position:fixed; bottom:86px; left:50%; transform:translateX(-50%); \
                 max-width:640px; font-family:monospace; font-size:14px; padding:6px 12px; \
                 background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; \
                 color:#9fe8a0; z-index:45;",
            )
            .ok();
        panel.set_text_content(Some(
            "Press Tab or HELP button for typing and vocabulary tips.",
        ));
        body.append_child(&panel)?;
    }

    if doc.get_element_by_id(TARGET_LABEL_ID).is_none() {
        let label = doc.create_element("div")?;
        label.set_id(TARGET_LABEL_ID);
        label
            .set_attribute(
                "style",
                "position:fixed; top:54px; left:12px; font-family:monospace; font-size:15px; \
                 padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; \
                 border-radius:6px; color:#ffd166; z-index:45;",
            )
            .ok();
        label.set_text_content(Some("Target: None"));
        body.append_child(&label)?;
    }

    let input: HtmlInputElement = if let Some(el) = doc.get_element_by_id(TEXT_INPUT_ID) {
        el.dyn_into()?
    } else {
        let input: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
        input.set_id(TEXT_INPUT_ID);
        input.set_attribute("autocomplete", "off").ok();
        input
            .set_attribute(
                "style",
                "position:fixed; bottom:40px; left:50%; transform:translateX(-50%); \
                 width:320px; font-family:monospace; font-size:20px; padding:6px 10px; \
                 background:rgba(0,0,0,0.55); border:1px solid #333; border-radius:6px; \
                 color:#ffd166; z-index:46; display:none;",
            )
            .ok();
        body.append_child(&input)?;
        input
    };
    Ok(input)
}

// --- Small DOM + clock helpers ---------------------------------------------

fn set_text(id: &str, text: &str) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

fn set_display(id: &str, value: &str) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id(id) {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                html.style().set_property("display", value).ok();
            }
        }
    }
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Millisecond clock scaled to microseconds for a little extra seed entropy.
fn clock_seed() -> u32 {
    (performance_now() * 1000.0) as u64 as u32
}
