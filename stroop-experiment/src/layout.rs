use crate::config::{Settings, scale_factor};
use stroop_core::{Action, Button, ButtonLabel, DisplayMode, Language, Rect, Screen, StroopColor};

/// Resolutions offered on the resolution screen
pub const RESOLUTIONS: [(u32, u32); 4] = [(800, 600), (1280, 720), (1920, 1080), (2560, 1440)];

/// The offered resolutions that fit on the monitor; all of them when unknown
pub fn available_resolutions(monitor: Option<(u32, u32)>) -> Vec<(u32, u32)> {
    RESOLUTIONS
        .into_iter()
        .filter(|(w, h)| monitor.is_none_or(|(mw, mh)| *w <= mw && *h <= mh))
        .collect()
}

struct Grid {
    width: f32,
    height: f32,
    button_w: f32,
    button_h: f32,
}

impl Grid {
    fn new(settings: &Settings, surface: (u32, u32)) -> Self {
        let scale = scale_factor(surface.0, surface.1);
        Self {
            width: surface.0 as f32,
            height: surface.1 as f32,
            button_w: (settings.button_width as f32 * scale).floor(),
            button_h: (settings.button_height as f32 * scale).floor(),
        }
    }

    /// Column slot `row` of a menu-like screen
    fn slot(&self, row: usize, label: ButtonLabel, action: Action) -> Button {
        Button {
            label,
            rect: Rect::from_xywh(
                self.width * 0.4,
                self.height * (0.3 + row as f32 * 0.15),
                self.button_w,
                self.button_h,
            ),
            action,
            fill: Button::DEFAULT_FILL,
        }
    }
}

/// Every clickable button of `screen` at the given surface size
pub fn buttons_for(
    screen: Screen,
    settings: &Settings,
    color_order: &[StroopColor],
    surface: (u32, u32),
    resolutions: &[(u32, u32)],
) -> Vec<Button> {
    let grid = Grid::new(settings, surface);
    match screen {
        Screen::Menu => vec![
            grid.slot(0, ButtonLabel::Play, Action::Navigate(Screen::Countdown)),
            grid.slot(1, ButtonLabel::Settings, Action::Navigate(Screen::Settings)),
            grid.slot(2, ButtonLabel::Exit, Action::Quit),
        ],
        Screen::Settings => vec![
            grid.slot(0, ButtonLabel::Language, Action::Navigate(Screen::Language)),
            grid.slot(1, ButtonLabel::Resolution, Action::Navigate(Screen::Resolution)),
            grid.slot(2, ButtonLabel::DisplayMode, Action::Navigate(Screen::DisplayMode)),
            grid.slot(3, ButtonLabel::Back, Action::Navigate(Screen::Menu)),
        ],
        Screen::Language => Language::ALL
            .into_iter()
            .enumerate()
            .map(|(i, l)| grid.slot(i, ButtonLabel::LanguageName(l), Action::ChangeLanguage(l)))
            .collect(),
        // Rows keep their place in the full list even when some are filtered out.
        Screen::Resolution => RESOLUTIONS
            .into_iter()
            .enumerate()
            .filter(|(_, r)| resolutions.contains(r))
            .map(|(i, (w, h))| {
                grid.slot(
                    i,
                    ButtonLabel::Raw(format!("{w}x{h}")),
                    Action::ChangeResolution(w, h),
                )
            })
            .collect(),
        Screen::DisplayMode => DisplayMode::ALL
            .into_iter()
            .enumerate()
            .map(|(i, m)| grid.slot(i, ButtonLabel::Mode(m), Action::ChangeDisplayMode(m)))
            .collect(),
        Screen::Game => color_row(&grid, settings, color_order),
        Screen::Results => {
            let (w, h) = (grid.width, grid.height);
            vec![
                Button {
                    label: ButtonLabel::Restart,
                    rect: Rect::from_xywh(w * 0.35, h * 0.6, w * 0.15, h * 0.1),
                    action: Action::Restart,
                    fill: Button::DEFAULT_FILL,
                },
                Button {
                    label: ButtonLabel::Menu,
                    rect: Rect::from_xywh(w * 0.50, h * 0.6, w * 0.15, h * 0.1),
                    action: Action::Navigate(Screen::Menu),
                    fill: Button::DEFAULT_FILL,
                },
            ]
        }
        Screen::Countdown => Vec::new(),
    }
}

fn color_row(grid: &Grid, settings: &Settings, order: &[StroopColor]) -> Vec<Button> {
    let spacing = settings.button_spacing as f32;
    let count = order.len() as f32;
    let total_width = count * grid.button_w + (count - 1.0).max(0.0) * spacing;
    let start_x = (grid.width - total_width) / 2.0;
    order
        .iter()
        .enumerate()
        .map(|(i, color)| Button {
            label: ButtonLabel::Color(*color),
            rect: Rect::from_xywh(
                start_x + i as f32 * (grid.button_w + spacing),
                grid.height * 0.75,
                grid.button_w,
                grid.button_h,
            ),
            action: Action::SubmitColor(*color),
            fill: color.rgb(),
        })
        .collect()
}
