//! Built-in translations. Statistic templates carry one `{...}` placeholder
//! that is replaced by the value rounded to two decimals.

use crate::key::TextKey;
use stroop_core::{Language, StroopColor};

pub fn texts(language: Language) -> &'static [(TextKey, &'static str)] {
    match language {
        Language::English => ENGLISH,
        Language::Russian => RUSSIAN,
        Language::Ukrainian => UKRAINIAN,
    }
}

pub fn colors(language: Language) -> &'static [(StroopColor, &'static str)] {
    match language {
        Language::English => ENGLISH_COLORS,
        Language::Russian => RUSSIAN_COLORS,
        Language::Ukrainian => UKRAINIAN_COLORS,
    }
}

const ENGLISH: &[(TextKey, &str)] = &[
    (TextKey::AvgTime, "Average time: {avg_time} sec"),
    (TextKey::Coefficient, "Coefficient: {coefficient}"),
    (TextKey::Accuracy, "Accuracy: {accuracy}%"),
    (TextKey::Correct, "Correct!"),
    (TextKey::Incorrect, "Incorrect!"),
    (TextKey::Restart, "Restart"),
    (TextKey::Menu, "Main Menu"),
    (TextKey::Play, "Play"),
    (TextKey::Settings, "Settings"),
    (TextKey::Exit, "Exit"),
    (TextKey::Language, "Language"),
    (TextKey::Resolution, "Resolution"),
    (TextKey::DisplayMode, "Display Mode"),
    (TextKey::Back, "Back"),
    (TextKey::Russian, "Russian"),
    (TextKey::Ukrainian, "Ukrainian"),
    (TextKey::English, "English"),
    (TextKey::Fullscreen, "Fullscreen"),
    (TextKey::Noframe, "Fullscreen No Border"),
    (TextKey::Windowed, "Windowed"),
];

const ENGLISH_COLORS: &[(StroopColor, &str)] = &[
    (StroopColor::Red, "Red"),
    (StroopColor::Green, "Green"),
    (StroopColor::Blue, "Blue"),
    (StroopColor::Yellow, "Yellow"),
    (StroopColor::Purple, "Purple"),
    (StroopColor::Black, "Black"),
];

const RUSSIAN: &[(TextKey, &str)] = &[
    (TextKey::AvgTime, "Среднее время: {avg_time} сек"),
    (TextKey::Coefficient, "Коэффициент: {coefficient}"),
    (TextKey::Accuracy, "Точность: {accuracy}%"),
    (TextKey::Correct, "Правильно!"),
    (TextKey::Incorrect, "Неправильно!"),
    (TextKey::Restart, "Рестарт"),
    (TextKey::Menu, "Главное меню"),
    (TextKey::Play, "Играть"),
    (TextKey::Settings, "Настройки"),
    (TextKey::Exit, "Выход"),
    (TextKey::Language, "Язык"),
    (TextKey::Resolution, "Разрешение"),
    (TextKey::DisplayMode, "Режим экрана"),
    (TextKey::Back, "Назад"),
    (TextKey::Russian, "Русский"),
    (TextKey::Ukrainian, "Украинский"),
    (TextKey::English, "Английский"),
    (TextKey::Fullscreen, "Полноэкранный"),
    (TextKey::Noframe, "Полноэкранный без рамки"),
    (TextKey::Windowed, "Оконный"),
];

const RUSSIAN_COLORS: &[(StroopColor, &str)] = &[
    (StroopColor::Red, "Красный"),
    (StroopColor::Green, "Зеленый"),
    (StroopColor::Blue, "Синий"),
    (StroopColor::Yellow, "Желтый"),
    (StroopColor::Purple, "Фиолетовый"),
    (StroopColor::Black, "Черный"),
];

const UKRAINIAN: &[(TextKey, &str)] = &[
    (TextKey::AvgTime, "Середній час: {avg_time} сек"),
    (TextKey::Coefficient, "Коефіцієнт: {coefficient}"),
    (TextKey::Accuracy, "Точність: {accuracy}%"),
    (TextKey::Correct, "Правильно!"),
    (TextKey::Incorrect, "Неправильно!"),
    (TextKey::Restart, "Перезапуск"),
    (TextKey::Menu, "Головне меню"),
    (TextKey::Play, "Грати"),
    (TextKey::Settings, "Налаштування"),
    (TextKey::Exit, "Вихід"),
    (TextKey::Language, "Мова"),
    (TextKey::Resolution, "Роздільна здатність"),
    (TextKey::DisplayMode, "Режим екрана"),
    (TextKey::Back, "Назад"),
    (TextKey::Russian, "Російська"),
    (TextKey::Ukrainian, "Українська"),
    (TextKey::English, "Англійська"),
    (TextKey::Fullscreen, "Повноекранний"),
    (TextKey::Noframe, "Повноекранний без рамки"),
    (TextKey::Windowed, "Віконний"),
];

const UKRAINIAN_COLORS: &[(StroopColor, &str)] = &[
    (StroopColor::Red, "Червоний"),
    (StroopColor::Green, "Зелений"),
    (StroopColor::Blue, "Синій"),
    (StroopColor::Yellow, "Жовтий"),
    (StroopColor::Purple, "Фіолетовий"),
    (StroopColor::Black, "Чорний"),
];
