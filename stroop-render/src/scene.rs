use crate::render::Renderer;
use rand::Rng;
use stroop_core::{FeedbackKind, Rect, Screen, StimulusType};
use stroop_experiment::config::scale_factor;
use stroop_experiment::Session;
use stroop_locale::{Localization, TextKey};
use stroop_timing::Timer;

pub const BACKGROUND: [u8; 3] = [255, 255, 255];
const TEXT: [u8; 3] = [0, 0, 0];
const FEEDBACK_CORRECT: [u8; 3] = [0, 255, 0];
const FEEDBACK_INCORRECT: [u8; 3] = [255, 0, 0];

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Rect {
        rect: Rect,
        color: [u8; 3],
    },
    /// Text centered on `center`
    Text {
        text: String,
        center: (f32, f32),
        size: f32,
        color: [u8; 3],
    },
}

/// Display list for one frame, painted in order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: [u8; 3],
    pub items: Vec<DrawItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: BACKGROUND,
            items: Vec::new(),
        }
    }

    pub fn paint<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for item in &self.items {
            match item {
                DrawItem::Rect { rect, color } => renderer.fill_rect(*rect, *color),
                DrawItem::Text {
                    text,
                    center,
                    size,
                    color,
                } => renderer.draw_text(text, *center, *size, *color),
            }
        }
    }

    fn rect(&mut self, rect: Rect, color: [u8; 3]) {
        self.items.push(DrawItem::Rect { rect, color });
    }

    fn text(&mut self, text: impl Into<String>, center: (f32, f32), size: f32, color: [u8; 3]) {
        self.items.push(DrawItem::Text {
            text: text.into(),
            center,
            size,
            color,
        });
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Text { text, .. } => Some(text.as_str()),
            DrawItem::Rect { .. } => None,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the frame for the session's current screen
pub fn compose<T, R>(
    session: &Session<T, R>,
    localization: &Localization,
    surface: (u32, u32),
    resolutions: &[(u32, u32)],
) -> Scene
where
    T: Timer,
    R: Rng,
{
    let settings = &session.settings;
    let scale = scale_factor(surface.0, surface.1);
    let large = (settings.font_size as f32 * scale).max(1.0);
    let small = (settings.small_font_size as f32 * scale).max(1.0);
    let (w, h) = (surface.0 as f32, surface.1 as f32);
    let mut scene = Scene::new();

    match session.screen() {
        Screen::Countdown => {
            if let Some(digit) = session.countdown_digit() {
                scene.text(digit.to_string(), (w / 2.0, h / 2.0), large, TEXT);
            }
        }
        Screen::Game => {
            let controller = session.controller();
            if let Some(stimulus) = controller.current_stimulus() {
                let center = stimulus.position.to_screen(surface.0, surface.1);
                match stimulus.kind {
                    StimulusType::Word { meaning, ink } => {
                        scene.text(localization.get_color_name(meaning), center, large, ink.rgb());
                    }
                    StimulusType::Square { color } => {
                        let side = (settings.square_size as f32 * scale).floor();
                        scene.rect(
                            Rect::from_xywh(center.0 - side / 2.0, center.1 - side / 2.0, side, side),
                            color.rgb(),
                        );
                    }
                }
            }
            if let Some(kind) = controller.visible_feedback() {
                let (key, color) = match kind {
                    FeedbackKind::Correct => (TextKey::Correct, FEEDBACK_CORRECT),
                    FeedbackKind::Incorrect => (TextKey::Incorrect, FEEDBACK_INCORRECT),
                };
                scene.text(localization.get_text(key), (w / 2.0, h * 0.6), small, color);
            }
        }
        Screen::Results => {
            let summary = session.controller().summary();
            let lines = [
                (TextKey::AvgTime, summary.avg_time, 0.3),
                (TextKey::Coefficient, summary.coefficient, 0.4),
                (TextKey::Accuracy, summary.accuracy, 0.5),
            ];
            for (key, value, y) in lines {
                scene.text(localization.format_stat(key, value), (w / 2.0, h * y), large, TEXT);
            }
        }
        _ => {}
    }

    for button in session.buttons(surface, resolutions) {
        scene.rect(button.rect, button.fill_at(session.hover()));
        scene.text(
            localization.label(&button.label),
            button.rect.center(),
            small,
            button.text_color(),
        );
    }

    scene
}
