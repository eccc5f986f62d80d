//! Word Asteroids core crate.
//!
//! Arcade typing gameplay: vocabulary words fall as asteroids toward the bottom
//! of a canvas and the player destroys them by typing their letters. The whole
//! browser mode is exposed by `start_game()`. Shared vocabulary fallback and
//! speech-language datasets live here so future gameplay modes can reuse them.

use wasm_bindgen::prelude::*;

pub mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Shared static datasets
// -----------------------------------------------------------------------------

/// Built-in vocabulary used when the page does not supply a `gameWords` global.
pub const FALLBACK_WORDS: &[&str] = &["default", "words", "for", "testing", "purposes"];

/// Translation target -> BCP-47 tag handed to the speech synthesis facility.
pub const TTS_LANGUAGE_CODES: &[(&str, &str)] = &[
    ("ja", "ja-JP"),
    ("es", "es-ES"),
    ("zh", "zh-CN"),
    ("fr", "fr-FR"),
    ("it", "it-IT"),
    ("ko", "ko-KR"),
    ("ar", "ar-SA"),
    ("hi", "hi-IN"),
    ("ru", "ru-RU"),
    ("id", "id-ID"),
    ("pt", "pt-PT"),
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Launch the falling-word arcade mode (default gameplay path)
    game::start_arcade_mode()
}
