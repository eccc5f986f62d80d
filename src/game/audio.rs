//! WebAudio feedback tones and the ambient background drone.
//!
//! Audio is strictly best-effort: a failing AudioContext (unsupported or
//! blocked environment) is logged to the console and gameplay continues
//! silently.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorNode, OscillatorType, console};

/// (frequency Hz, duration s) per feedback kind.
pub const SUCCESS_TONE: (f32, f64) = (800.0, 0.1);
pub const ERROR_TONE: (f32, f64) = (200.0, 0.2);
pub const DESTRUCTION_TONE: (f32, f64) = (600.0, 0.3);

const BGM_FREQUENCY: f32 = 110.0;
const BGM_GAIN: f32 = 0.1;
const TONE_GAIN: f32 = 0.3;

struct Bgm {
    ctx: AudioContext,
    oscillator: OscillatorNode,
}

pub struct AudioControls {
    pub sound_enabled: bool,
    pub bgm_enabled: bool,
    bgm: Option<Bgm>,
}

impl AudioControls {
    pub fn new() -> Self {
        Self {
            sound_enabled: true,
            bgm_enabled: true,
            bgm: None,
        }
    }

    pub fn play_tone(&self, (frequency, duration): (f32, f64)) {
        if !self.sound_enabled {
            return;
        }
        if let Err(err) = play_tone_inner(frequency, duration) {
            console::error_2(&JsValue::from_str("tone playback failed:"), &err);
        }
    }

    pub fn start_bgm(&mut self) {
        if !self.bgm_enabled || self.bgm.is_some() {
            return;
        }
        match start_bgm_inner() {
            Ok(bgm) => self.bgm = Some(bgm),
            Err(err) => console::error_2(&JsValue::from_str("bgm start failed:"), &err),
        }
    }

    pub fn stop_bgm(&mut self) {
        if let Some(bgm) = self.bgm.take() {
            bgm.oscillator.stop().ok();
            bgm.ctx.close().ok();
        }
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Returns the new enabled state; the caller restarts the drone if the
    /// session is running.
    pub fn toggle_bgm(&mut self) -> bool {
        self.bgm_enabled = !self.bgm_enabled;
        if !self.bgm_enabled {
            self.stop_bgm();
        }
        self.bgm_enabled
    }
}

fn play_tone_inner(frequency: f32, duration: f64) -> Result<(), JsValue> {
    let ctx = AudioContext::new()?;
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let now = ctx.current_time();
    oscillator.frequency().set_value_at_time(frequency, now)?;
    oscillator.set_type(OscillatorType::Sine);
    gain.gain().set_value_at_time(TONE_GAIN, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, now + duration)?;

    oscillator.start_with_when(now)?;
    oscillator.stop_with_when(now + duration)?;
    Ok(())
}

fn start_bgm_inner() -> Result<Bgm, JsValue> {
    let ctx = AudioContext::new()?;
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let now = ctx.current_time();
    oscillator.frequency().set_value_at_time(BGM_FREQUENCY, now)?;
    oscillator.set_type(OscillatorType::Sine);
    gain.gain().set_value_at_time(BGM_GAIN, now)?;
    oscillator.start_with_when(now)?;

    Ok(Bgm { ctx, oscillator })
}
