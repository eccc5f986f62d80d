//! Remote text-generation collaborator.
//!
//! Requests a short tip or encouragement from a generative-language endpoint
//! and falls back to a canned message bank on any transport or parsing
//! failure, so the caller always receives a non-empty string and never sees
//! an error. The response is delivered through a one-shot handler; callers
//! guard against stale deliveries with the session generation predicate.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Headers, Request, RequestInit, Response, console, window};

use crate::game::rng::SeededRng;

pub const GENERATION_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent";

/// Window global the page sets to enable live generation. Absent or empty
/// means every request resolves through the fallback banks.
const API_KEY_GLOBAL: &str = "GEMINI_API_KEY";

// -----------------------------------------------------------------------------
// Prompt shapes
// -----------------------------------------------------------------------------

pub const TIP_PROMPTS: &[&str] = &[
    "Give me one typing tip for improving accuracy and speed. Be concise.",
    "What is one important strategy for vocabulary learning? Be brief.",
    "How to efficiently play typing games? Be concise.",
    "Give me one tip for better keyboard technique. Be brief.",
    "What's one effective method for memorizing new words? Be concise.",
    "How to improve typing speed without sacrificing accuracy? Be brief.",
    "Give me one strategy for learning IELTS vocabulary. Be concise.",
    "What's one tip for maintaining focus during typing practice? Be brief.",
];

pub fn tip_prompt(rng: &mut SeededRng) -> &'static str {
    TIP_PROMPTS[rng.next_index(TIP_PROMPTS.len())]
}

pub fn game_over_prompt(score: u32) -> String {
    format!("Game over. Final score was {score}. Generate a short encouraging message for the player.")
}

// -----------------------------------------------------------------------------
// Canned fallback banks
// -----------------------------------------------------------------------------

pub const TYPING_TIPS: &[&str] = &[
    "Focus on accuracy over speed when typing words.",
    "Look ahead to the next word while typing the current one.",
    "Use proper finger positioning for faster typing.",
    "Practice common letter combinations to improve fluency.",
    "Take breaks to avoid finger fatigue during long sessions.",
    "Start with shorter words and gradually work up to longer ones.",
    "Don't panic when asteroids approach - stay calm and type accurately.",
    "Practice typing without looking at the keyboard.",
    "Use muscle memory to type common words automatically.",
    "Use the backspace key efficiently when you make mistakes.",
    "Develop a steady rhythm rather than rushing through words.",
    "Practice typing difficult letter combinations like 'qu', 'th', 'ch'.",
];

pub const VOCABULARY_TIPS: &[&str] = &[
    "Learn word roots, prefixes, and suffixes to understand new words.",
    "Use flashcards to memorize difficult vocabulary words.",
    "Read extensively to encounter words in different contexts.",
    "Practice using new words in sentences to remember them better.",
    "Use mnemonics to remember difficult word meanings.",
    "Learn synonyms and antonyms to deepen word understanding.",
    "Use spaced repetition to review vocabulary regularly.",
    "Learn words in thematic groups like emotions, nature, technology.",
];

pub const STRATEGY_TIPS: &[&str] = &[
    "Prioritize asteroids that are closest to the bottom of the screen.",
    "Target shorter words first to clear space quickly.",
    "Use peripheral vision to track multiple asteroids simultaneously.",
    "Develop a scanning pattern to efficiently identify targets.",
    "Practice switching between targets quickly and smoothly.",
    "Focus on one asteroid at a time to avoid confusion.",
];

pub const ENCOURAGEMENTS: &[&str] = &[
    "Great effort! Every game improves your typing and vocabulary skills.",
    "Well played! Practice makes perfect in both typing and language learning.",
    "Good game! You're building valuable skills with each attempt.",
    "Nice try! Each game session strengthens your typing muscle memory.",
    "Excellent practice! Your vocabulary and typing speed are improving.",
    "Well done! Consistent practice leads to mastery.",
    "Good work! You're developing both speed and accuracy.",
    "Nice effort! Every mistake is a learning opportunity.",
];

/// Canned substitute for a failed request, tone-matched to the prompt: the
/// game-over marker selects the encouragement bank, everything else draws
/// from the combined tip banks.
pub fn fallback_message(prompt: &str, rng: &mut SeededRng) -> &'static str {
    if is_game_over_prompt(prompt) {
        return ENCOURAGEMENTS[rng.next_index(ENCOURAGEMENTS.len())];
    }
    let total = TYPING_TIPS.len() + VOCABULARY_TIPS.len() + STRATEGY_TIPS.len();
    let mut idx = rng.next_index(total);
    if idx < TYPING_TIPS.len() {
        return TYPING_TIPS[idx];
    }
    idx -= TYPING_TIPS.len();
    if idx < VOCABULARY_TIPS.len() {
        return VOCABULARY_TIPS[idx];
    }
    STRATEGY_TIPS[idx - VOCABULARY_TIPS.len()]
}

fn is_game_over_prompt(prompt: &str) -> bool {
    prompt.to_lowercase().contains("game over")
}

/// A late reply only applies while the session generation it was issued
/// under is still the current one.
pub fn is_response_current(issued_generation: u64, current_generation: u64) -> bool {
    issued_generation == current_generation
}

// -----------------------------------------------------------------------------
// Wire format
// -----------------------------------------------------------------------------

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 1024,
            },
        }
    }
}

pub fn request_body(prompt: &str) -> String {
    serde_json::to_string(&GenerateRequest::new(prompt)).unwrap_or_default()
}

/// Pull the generated text out of a raw response body.
pub fn extract_generated_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_owned())
}

// -----------------------------------------------------------------------------
// Asynchronous request path (browser only)
// -----------------------------------------------------------------------------

type Delivery = (Box<dyn FnOnce(String)>, String);
type DeliverySlot = Rc<RefCell<Option<Delivery>>>;

fn deliver(slot: &DeliverySlot, generated: Option<String>) {
    if let Some((handler, fallback)) = slot.borrow_mut().take() {
        handler(generated.filter(|m| !m.is_empty()).unwrap_or(fallback));
    }
}

/// Issue a non-blocking generation request. `handler` runs exactly once with
/// either the generated text or a canned fallback; it never runs with an
/// empty string and the request never surfaces an error to the player.
pub fn request_advice(prompt: String, seed: u32, handler: Box<dyn FnOnce(String)>) {
    let mut rng = SeededRng::new(seed);
    let fallback = fallback_message(&prompt, &mut rng).to_owned();
    let slot: DeliverySlot = Rc::new(RefCell::new(Some((handler, fallback))));

    let Some(win) = window() else {
        deliver(&slot, None);
        return;
    };
    let Some(api_key) = api_key(&win) else {
        deliver(&slot, None);
        return;
    };

    let init = RequestInit::new();
    init.set_method("POST");
    let Ok(headers) = Headers::new() else {
        deliver(&slot, None);
        return;
    };
    headers.set("Content-Type", "application/json").ok();
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(&request_body(&prompt)));

    let url = format!("{GENERATION_ENDPOINT}?key={api_key}");
    let request = match Request::new_with_str_and_init(&url, &init) {
        Ok(request) => request,
        Err(_) => {
            deliver(&slot, None);
            return;
        }
    };

    let response_slot = slot.clone();
    let on_response = Closure::once(move |value: JsValue| {
        let response: Response = match value.dyn_into() {
            Ok(response) => response,
            Err(_) => {
                deliver(&response_slot, None);
                return;
            }
        };
        if !response.ok() {
            deliver(&response_slot, None);
            return;
        }
        let body_promise = match response.text() {
            Ok(promise) => promise,
            Err(_) => {
                deliver(&response_slot, None);
                return;
            }
        };
        let body_slot = response_slot.clone();
        let on_body = Closure::once(move |body: JsValue| {
            let generated = body.as_string().and_then(|b| extract_generated_text(&b));
            deliver(&body_slot, generated);
        });
        let body_err_slot = response_slot.clone();
        let on_body_err = Closure::once(move |_err: JsValue| deliver(&body_err_slot, None));
        let _ = body_promise.then(&on_body).catch(&on_body_err);
        on_body.forget();
        on_body_err.forget();
    });

    let error_slot = slot.clone();
    let on_error = Closure::once(move |err: JsValue| {
        console::error_2(&JsValue::from_str("advice request failed:"), &err);
        deliver(&error_slot, None);
    });

    let _ = win
        .fetch_with_request(&request)
        .then(&on_response)
        .catch(&on_error);
    on_response.forget();
    on_error.forget();
}

fn api_key(win: &web_sys::Window) -> Option<String> {
    js_sys::Reflect::get(win.as_ref(), &JsValue::from_str(API_KEY_GLOBAL))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_prompts_pick_encouragements() {
        let mut rng = SeededRng::new(8);
        for _ in 0..50 {
            let msg = fallback_message(&game_over_prompt(120), &mut rng);
            assert!(ENCOURAGEMENTS.contains(&msg));
        }
    }

    #[test]
    fn tip_prompts_pick_from_tip_banks() {
        let mut rng = SeededRng::new(9);
        for _ in 0..100 {
            let msg = fallback_message(TIP_PROMPTS[0], &mut rng);
            let in_banks = TYPING_TIPS.contains(&msg)
                || VOCABULARY_TIPS.contains(&msg)
                || STRATEGY_TIPS.contains(&msg);
            assert!(in_banks, "unexpected fallback '{msg}'");
            assert!(!ENCOURAGEMENTS.contains(&msg));
        }
    }

    #[test]
    fn game_over_detection_accepts_both_literal_spellings() {
        assert!(is_game_over_prompt("Game Over already"));
        assert!(is_game_over_prompt("the game over screen"));
        assert!(is_game_over_prompt(&game_over_prompt(0)));
        assert!(!is_game_over_prompt("typing tip please"));
    }

    #[test]
    fn request_body_carries_prompt_and_config() {
        let body = request_body("hello there");
        assert!(body.contains("\"hello there\""));
        assert!(body.contains("\"generationConfig\""));
        assert!(body.contains("\"maxOutputTokens\":1024"));
        assert!(body.contains("\"topK\":40"));
    }

    #[test]
    fn extract_text_from_wellformed_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"stay calm"}]}}]}"#;
        assert_eq!(extract_generated_text(body).as_deref(), Some("stay calm"));
    }

    #[test]
    fn extract_text_tolerates_malformed_responses() {
        assert_eq!(extract_generated_text("not json"), None);
        assert_eq!(extract_generated_text("{}"), None);
        assert_eq!(extract_generated_text(r#"{"candidates":[]}"#), None);
    }

    #[test]
    fn stale_responses_are_rejected() {
        assert!(is_response_current(3, 3));
        assert!(!is_response_current(3, 4));
    }
}
