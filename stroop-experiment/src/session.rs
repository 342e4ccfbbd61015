use crate::config::Settings;
use crate::export::ResultsExport;
use crate::layout::buttons_for;
use crate::state::TrialController;
use rand::Rng;
use stroop_core::{Action, Button, Language, Screen, hit_test};
use stroop_timing::Timer;
use tracing::{info, warn};

/// Work the host has to carry out after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Re-apply resolution and display mode from the settings
    ApplyDisplay,
    ApplyLanguage(Language),
    SaveSettings,
    ExportResults,
    Exit,
}

/// All UI and test state of the application, owned by the dispatch loop
pub struct Session<T, R>
where
    T: Timer,
    R: Rng,
{
    screen: Screen,
    pub settings: Settings,
    controller: TrialController<T, R>,
    countdown_start: u64,
    hover: Option<(f32, f32)>,
}

impl<T, R> Session<T, R>
where
    T: Timer,
    R: Rng,
{
    pub fn new(settings: Settings, timer: T, rng: R) -> Self {
        let controller = TrialController::new(settings.experiment(), timer, rng);
        Self {
            screen: Screen::Menu,
            settings,
            controller,
            countdown_start: 0,
            hover: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn controller(&self) -> &TrialController<T, R> {
        &self.controller
    }

    pub fn hover(&self) -> Option<(f32, f32)> {
        self.hover
    }

    pub fn set_hover(&mut self, pos: Option<(f32, f32)>) {
        self.hover = pos;
    }

    fn enter(&mut self, screen: Screen) {
        match screen {
            Screen::Countdown => {
                self.countdown_start = self.controller.timer.now();
            }
            Screen::Game => {
                self.controller.set_trial_count(self.settings.trial_count);
                self.controller.reset();
            }
            _ => {}
        }
        info!(from = ?self.screen, to = ?screen, "screen change");
        self.screen = screen;
    }

    /// Single entry point for every button action
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Navigate(screen) => {
                self.enter(screen);
                Vec::new()
            }
            Action::SubmitColor(color) => {
                if self.screen != Screen::Game {
                    return Vec::new();
                }
                self.controller.submit(color);
                if self.controller.is_complete() {
                    self.enter(Screen::Results);
                    vec![Effect::ExportResults]
                } else {
                    Vec::new()
                }
            }
            Action::ChangeResolution(width, height) => {
                self.settings.screen_width = width;
                self.settings.screen_height = height;
                self.enter(Screen::Settings);
                vec![Effect::ApplyDisplay, Effect::SaveSettings]
            }
            Action::ChangeLanguage(language) => {
                self.settings.language = language;
                self.enter(Screen::Settings);
                vec![Effect::ApplyLanguage(language), Effect::SaveSettings]
            }
            Action::ChangeDisplayMode(mode) => {
                self.settings.display_mode = mode;
                self.enter(Screen::Settings);
                vec![Effect::ApplyDisplay, Effect::SaveSettings]
            }
            Action::Restart => {
                self.enter(Screen::Countdown);
                Vec::new()
            }
            Action::Quit => vec![Effect::Exit],
        }
    }

    /// Per-frame update; ends the countdown once it has run out
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Countdown || self.countdown_remaining_ms() > 0 {
            return Vec::new();
        }
        self.enter(Screen::Game);
        // Nothing to answer with zero trials per phase
        if self.controller.is_complete() {
            self.enter(Screen::Results);
            return vec![Effect::ExportResults];
        }
        Vec::new()
    }

    pub fn escape(&mut self) -> Vec<Effect> {
        if self.screen == Screen::Game {
            self.enter(Screen::Menu);
            Vec::new()
        } else {
            vec![Effect::Exit]
        }
    }

    pub fn click(
        &mut self,
        x: f32,
        y: f32,
        surface: (u32, u32),
        resolutions: &[(u32, u32)],
    ) -> Vec<Effect> {
        match hit_test(&self.buttons(surface, resolutions), x, y) {
            Some(action) => self.dispatch(action),
            None => Vec::new(),
        }
    }

    pub fn buttons(&self, surface: (u32, u32), resolutions: &[(u32, u32)]) -> Vec<Button> {
        buttons_for(
            self.screen,
            &self.settings,
            &self.controller.color_order(),
            surface,
            resolutions,
        )
    }

    pub fn countdown_remaining_ms(&self) -> u64 {
        let elapsed = self.controller.timer.elapsed(self.countdown_start).as_millis() as u64;
        self.controller.config.countdown_ms.saturating_sub(elapsed)
    }

    /// Whole seconds left, rounded up: 3, 2, 1
    pub fn countdown_digit(&self) -> Option<u64> {
        (self.screen == Screen::Countdown).then(|| self.countdown_remaining_ms().div_ceil(1000))
    }

    /// The host could not apply the requested display setup
    pub fn display_failed(&mut self) -> Vec<Effect> {
        warn!(
            width = self.settings.screen_width,
            height = self.settings.screen_height,
            mode = ?self.settings.display_mode,
            "display setup failed, falling back to safe windowed mode"
        );
        self.settings.apply_safe_display();
        vec![Effect::SaveSettings]
    }

    pub fn export(&self) -> ResultsExport {
        ResultsExport {
            trials_per_phase: self.controller.config.trial_count,
            summary: self.controller.summary(),
            trials: self.controller.records().to_vec(),
        }
    }
}
