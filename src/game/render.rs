//! Stateless canvas drawing for the arcade scene.
//!
//! The renderer only reads simulation state; asteroids carry no drawing
//! context of their own. Layout mirrors the classic scene: dark space
//! backdrop, deterministic star field, wobbling octagon outlines with the
//! word label underneath, typed prefix highlighted.

use web_sys::CanvasRenderingContext2d;

use crate::game::asteroid::Asteroid;
use crate::game::session::GameSession;

const BACKGROUND_COLOR: &str = "#0b0f13";
const HUD_COLOR: &str = "#cde8ff";
const TYPED_COLOR: &str = "#ffff00";
const UNTYPED_COLOR: &str = "#ffffff";
const STAR_COUNT: u32 = 100;
const OUTLINE_SIDES: u32 = 8;

pub fn draw_scene(ctx: &CanvasRenderingContext2d, width: f64, height: f64, session: &GameSession) {
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    // Fixed pseudo-random star field; cheap and stable across frames.
    ctx.set_fill_style_str(UNTYPED_COLOR);
    for i in 0..STAR_COUNT {
        let x = (i * 37) % width.max(1.0) as u32;
        let y = (i * 73) % height.max(1.0) as u32;
        ctx.fill_rect(x as f64, y as f64, 1.0, 1.0);
    }

    for asteroid in session.asteroids() {
        draw_asteroid(ctx, asteroid);
    }

    ctx.set_fill_style_str(HUD_COLOR);
    ctx.set_font("24px monospace");
    ctx.set_text_align("left");
    ctx.fill_text(&format!("Score: {}", session.score()), 20.0, 40.0)
        .ok();
}

pub fn draw_asteroid(ctx: &CanvasRenderingContext2d, asteroid: &Asteroid) {
    let color = if asteroid.is_targeted {
        TYPED_COLOR
    } else {
        UNTYPED_COLOR
    };

    ctx.save();
    ctx.translate(
        asteroid.x + asteroid.size / 2.0,
        asteroid.y + asteroid.size / 2.0,
    )
    .ok();
    ctx.rotate(asteroid.rotation).ok();

    ctx.set_stroke_style_str(color);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for i in 0..OUTLINE_SIDES {
        let angle = i as f64 / OUTLINE_SIDES as f64 * std::f64::consts::TAU;
        let radius = asteroid.size / 2.0 + (angle * 3.0).sin() * 5.0;
        let px = angle.cos() * radius;
        let py = angle.sin() * radius;
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.close_path();
    ctx.stroke();
    ctx.restore();

    draw_word_label(ctx, asteroid);
}

/// Word label under the asteroid, typed prefix in yellow, rest in white,
/// centered as one run of text.
fn draw_word_label(ctx: &CanvasRenderingContext2d, asteroid: &Asteroid) {
    let typed: String = asteroid.word.chars().take(asteroid.typed_count).collect();
    let remaining: String = asteroid.word.chars().skip(asteroid.typed_count).collect();

    ctx.set_font("48px monospace");
    ctx.set_text_align("center");

    let typed_width = ctx.measure_text(&typed).map(|m| m.width()).unwrap_or(0.0);
    let remaining_width = ctx
        .measure_text(&remaining)
        .map(|m| m.width())
        .unwrap_or(0.0);
    let total_width = typed_width + remaining_width;

    let start_x = asteroid.x + asteroid.size / 2.0 - total_width / 2.0;
    let text_y = asteroid.y + asteroid.size + 40.0;

    ctx.set_fill_style_str(TYPED_COLOR);
    ctx.fill_text(&typed, start_x + typed_width / 2.0, text_y).ok();
    ctx.set_fill_style_str(UNTYPED_COLOR);
    ctx.fill_text(
        &remaining,
        start_x + typed_width + remaining_width / 2.0,
        text_y,
    )
    .ok();
}
