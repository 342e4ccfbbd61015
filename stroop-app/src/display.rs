use anyhow::{Result, bail};
use stroop_core::DisplayMode;
use stroop_experiment::Settings;
use winit::dpi::PhysicalSize;
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window, WindowAttributes};

/// How the window should be set up for the current settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPlan {
    /// Exclusive video mode at the requested size
    Fullscreen { width: u32, height: u32 },
    Framed {
        width: u32,
        height: u32,
        decorations: bool,
    },
}

impl DisplayPlan {
    pub fn for_settings(settings: &Settings, monitor: Option<(u32, u32)>) -> Result<Self> {
        let (width, height) = (settings.screen_width, settings.screen_height);
        if width == 0 || height == 0 {
            bail!("resolution {width}x{height} is empty");
        }
        if let Some((mw, mh)) = monitor {
            if width > mw || height > mh {
                bail!("resolution {width}x{height} exceeds monitor {mw}x{mh}");
            }
        }
        Ok(match settings.display_mode {
            DisplayMode::Fullscreen => {
                if monitor.is_none() {
                    bail!("fullscreen requested but no monitor is available");
                }
                DisplayPlan::Fullscreen { width, height }
            }
            DisplayMode::Noframe => DisplayPlan::Framed {
                width,
                height,
                decorations: false,
            },
            DisplayMode::Windowed => DisplayPlan::Framed {
                width,
                height,
                decorations: true,
            },
        })
    }

    fn fullscreen(&self, monitor: Option<&MonitorHandle>) -> Option<Fullscreen> {
        let DisplayPlan::Fullscreen { width, height } = *self else {
            return None;
        };
        let monitor = monitor?;
        let wanted = PhysicalSize::new(width, height);
        // Monitors that do not offer the exact mode get borderless fullscreen
        Some(
            monitor
                .video_modes()
                .filter(|m| m.size() == wanted)
                .max_by_key(|m| m.refresh_rate_millihertz())
                .map(Fullscreen::Exclusive)
                .unwrap_or_else(|| Fullscreen::Borderless(Some(monitor.clone()))),
        )
    }

    pub fn attributes(&self, base: WindowAttributes, monitor: Option<&MonitorHandle>) -> WindowAttributes {
        match *self {
            DisplayPlan::Fullscreen { .. } => base.with_fullscreen(self.fullscreen(monitor)),
            DisplayPlan::Framed {
                width,
                height,
                decorations,
            } => base
                .with_fullscreen(None)
                .with_decorations(decorations)
                .with_inner_size(PhysicalSize::new(width, height)),
        }
    }

    pub fn apply(&self, window: &Window, monitor: Option<&MonitorHandle>) {
        match *self {
            DisplayPlan::Fullscreen { .. } => window.set_fullscreen(self.fullscreen(monitor)),
            DisplayPlan::Framed {
                width,
                height,
                decorations,
            } => {
                window.set_fullscreen(None);
                window.set_decorations(decorations);
                let _ = window.request_inner_size(PhysicalSize::new(width, height));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(width: u32, height: u32, mode: DisplayMode) -> Settings {
        Settings {
            screen_width: width,
            screen_height: height,
            display_mode: mode,
            ..Settings::default()
        }
    }

    #[test]
    fn modes_map_to_plans() {
        let monitor = Some((1920, 1080));
        assert_eq!(
            DisplayPlan::for_settings(&settings(1280, 720, DisplayMode::Fullscreen), monitor)
                .expect("plan"),
            DisplayPlan::Fullscreen {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(
            DisplayPlan::for_settings(&settings(800, 600, DisplayMode::Noframe), monitor)
                .expect("plan"),
            DisplayPlan::Framed {
                width: 800,
                height: 600,
                decorations: false
            }
        );
        assert!(matches!(
            DisplayPlan::for_settings(&settings(800, 600, DisplayMode::Windowed), None),
            Ok(DisplayPlan::Framed {
                decorations: true,
                ..
            })
        ));
    }

    #[test]
    fn oversized_resolution_is_rejected() {
        let s = settings(2560, 1440, DisplayMode::Windowed);
        assert!(DisplayPlan::for_settings(&s, Some((1920, 1080))).is_err());
    }

    #[test]
    fn fullscreen_needs_a_monitor() {
        let s = settings(1280, 720, DisplayMode::Fullscreen);
        assert!(DisplayPlan::for_settings(&s, None).is_err());
    }

    #[test]
    fn safe_fallback_always_plans() {
        let mut s = settings(2560, 1440, DisplayMode::Fullscreen);
        s.apply_safe_display();
        assert!(DisplayPlan::for_settings(&s, None).is_ok());
    }
}
