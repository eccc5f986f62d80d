//! Text-to-speech output sink.
//!
//! Two fire-and-forget implementations: the local speech synthesis facility
//! (preferred; reports availability through its return value) and an external
//! web TTS page opened in a short-lived popup window.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{SpeechSynthesisUtterance, window};

pub const POPUP_BASE_URL: &str = "https://text-to-speech.imtranslator.net/";
const POPUP_NAME: &str = "tts_popup";
const POPUP_FEATURES: &str = "width=400,height=300,scrollbars=yes,resizable=yes";
const POPUP_CLOSE_DELAY_MS: i32 = 5000;

/// Slightly slowed speaking rate; pitch stays at the platform default.
const SPEECH_RATE: f32 = 0.8;

/// Translation target -> speech synthesis tag, `None` for unknown targets.
pub fn tts_lang_code(language: &str) -> Option<&'static str> {
    crate::TTS_LANGUAGE_CODES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, code)| *code)
}

/// Pronounce `text` with the local speech synthesis facility.
/// Returns false when the facility is unavailable.
pub fn speak_native(text: &str, lang: &str) -> bool {
    let Some(win) = window() else {
        return false;
    };
    let Ok(synth) = win.speech_synthesis() else {
        return false;
    };
    let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
        return false;
    };
    utterance.set_lang(lang);
    utterance.set_rate(SPEECH_RATE);
    synth.speak(&utterance);
    true
}

/// Drop any queued utterances so the next one is not interrupted.
pub fn cancel_native() {
    if let Some(win) = window() {
        if let Ok(synth) = win.speech_synthesis() {
            synth.cancel();
        }
    }
}

/// Open the external TTS page in a popup that closes itself after 5 seconds.
pub fn speak_popup(text: &str, language: &str) {
    let Some(win) = window() else {
        return;
    };
    let encoded = String::from(js_sys::encode_uri_component(text));
    let url = format!("{POPUP_BASE_URL}?text={encoded}&lang={language}");
    if let Ok(Some(popup)) = win.open_with_url_and_target_and_features(&url, POPUP_NAME, POPUP_FEATURES)
    {
        // Closing an already-closed window is a no-op.
        let close = Closure::once(move || {
            popup.close().ok();
        });
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            close.as_ref().unchecked_ref(),
            POPUP_CLOSE_DELAY_MS,
        )
        .ok();
        close.forget();
    }
}
