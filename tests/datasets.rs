// Additional integration tests for dataset invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use word_asteroids::game::advisor;
use word_asteroids::{FALLBACK_WORDS, TTS_LANGUAGE_CODES};

#[test]
fn fallback_words_are_lowercase_and_unique() {
    assert!(!FALLBACK_WORDS.is_empty());
    let mut seen = HashSet::new();
    for word in FALLBACK_WORDS {
        assert!(seen.insert(*word), "duplicate word '{}' in FALLBACK_WORDS", word);
        assert!(!word.is_empty(), "empty entry in FALLBACK_WORDS");
        for c in word.chars() {
            assert!(
                c.is_ascii_lowercase(),
                "invalid char '{}' in fallback word '{}'",
                c,
                word
            );
        }
    }
}

#[test]
fn tts_language_codes_are_wellformed() {
    let mut seen = HashSet::new();
    for (lang, code) in TTS_LANGUAGE_CODES {
        assert!(seen.insert(*lang), "duplicate language '{}' in TTS_LANGUAGE_CODES", lang);
        assert_eq!(lang.len(), 2, "language key '{}' should be a two-letter code", lang);
        assert!(lang.chars().all(|c| c.is_ascii_lowercase()));
        // codes follow the xx-XX shape handed to speech synthesis
        let (prefix, region) = code
            .split_once('-')
            .unwrap_or_else(|| panic!("code '{}' missing region", code));
        assert_eq!(prefix, *lang, "code '{}' does not extend language '{}'", code, lang);
        assert_eq!(region.len(), 2);
        assert!(region.chars().all(|c| c.is_ascii_uppercase()));
    }
}

#[test]
fn advisor_banks_have_no_blank_or_duplicate_entries() {
    for bank in [
        advisor::TYPING_TIPS,
        advisor::VOCABULARY_TIPS,
        advisor::STRATEGY_TIPS,
        advisor::ENCOURAGEMENTS,
    ] {
        assert!(!bank.is_empty());
        let mut seen = HashSet::new();
        for entry in bank {
            assert!(!entry.trim().is_empty(), "blank canned message");
            assert!(seen.insert(*entry), "duplicate canned message '{}'", entry);
        }
    }
}

#[test]
fn tip_prompts_ask_for_brevity() {
    assert!(!advisor::TIP_PROMPTS.is_empty());
    for prompt in advisor::TIP_PROMPTS {
        assert!(
            prompt.ends_with("Be concise.") || prompt.ends_with("Be brief."),
            "prompt '{}' does not request a short answer",
            prompt
        );
    }
}
