// Integration tests (native) for the `word-asteroids` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use word_asteroids::game::advisor;
use word_asteroids::game::rng::SeededRng;
use word_asteroids::game::session::{GameSession, KeyOutcome, TickOutcome};
use word_asteroids::game::speech;

fn started_session(words: &[&str]) -> GameSession {
    let mut session = GameSession::new(
        1280.0,
        720.0,
        words.iter().map(|w| w.to_string()).collect(),
        11,
    );
    session.start();
    session
}

// Full gameplay pass: target, mistype, correct, destroy, and keep simulating.
#[test]
fn full_round_targets_scores_and_keeps_running() {
    let mut session = started_session(&["planet", "moon"]);
    session.spawn_word("moon");
    session.spawn_word("planet");

    assert_eq!(
        session.accept_char('m'),
        KeyOutcome::Locked {
            word: "moon".into()
        }
    );
    assert_eq!(session.accept_char('x'), KeyOutcome::Rejected);
    for c in ['o', 'o'] {
        assert_eq!(session.accept_char(c), KeyOutcome::Advanced);
    }
    assert_eq!(
        session.accept_char('n'),
        KeyOutcome::Completed {
            word: "moon".into(),
            points: 40
        }
    );
    assert_eq!(session.score(), 40);

    for _ in 0..100 {
        session.tick();
    }
    assert!(session.is_running());
}

// The overflow ceiling ends the session regardless of the pause flag.
#[test]
fn overflow_loss_applies_while_paused() {
    let mut session = started_session(&["star"]);
    for _ in 0..11 {
        session.spawn_word("star");
    }
    session.toggle_pause();
    assert_eq!(session.tick(), TickOutcome::Overflowed);
    assert!(!session.is_running());
}

// Advisor fallbacks are always non-empty and tone-matched to the prompt.
#[test]
fn advisor_fallbacks_are_nonempty_and_tone_matched() {
    let mut rng = SeededRng::new(17);
    for _ in 0..200 {
        let tip = advisor::fallback_message("How to efficiently play typing games?", &mut rng);
        assert!(!tip.is_empty());
        assert!(!advisor::ENCOURAGEMENTS.contains(&tip));
    }
    for score in [0, 10, 990] {
        let msg = advisor::fallback_message(&advisor::game_over_prompt(score), &mut rng);
        assert!(advisor::ENCOURAGEMENTS.contains(&msg));
    }
}

#[test]
fn advisor_parses_generation_responses() {
    let body = r#"{
        "candidates": [
            {"content": {"parts": [{"text": "Short words first."}]}}
        ]
    }"#;
    assert_eq!(
        advisor::extract_generated_text(body).as_deref(),
        Some("Short words first.")
    );
    assert_eq!(advisor::extract_generated_text("<html>503</html>"), None);
}

#[test]
fn advisor_request_body_matches_wire_format() {
    let body = advisor::request_body("tip please");
    let value: serde_json::Value = serde_json::from_str(&body).expect("request body is JSON");
    assert_eq!(value["contents"][0]["parts"][0]["text"], "tip please");
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    assert_eq!(value["generationConfig"]["temperature"], 0.7);
}

// Stale-response guard: replies from an earlier session generation are dropped.
#[test]
fn advisor_responses_from_old_generations_are_stale() {
    let mut session = started_session(&["star"]);
    let issued = session.generation();
    assert!(advisor::is_response_current(issued, session.generation()));
    session.end();
    session.start();
    assert!(!advisor::is_response_current(issued, session.generation()));
}

#[test]
fn speech_language_codes_resolve() {
    assert_eq!(speech::tts_lang_code("ja"), Some("ja-JP"));
    assert_eq!(speech::tts_lang_code("pt"), Some("pt-PT"));
    assert_eq!(speech::tts_lang_code("xx"), None);
}
