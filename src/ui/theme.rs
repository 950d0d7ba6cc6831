use crate::catalog::Accent;
use ratatui::style::{Color, Modifier, Style};

/// Colours shared by both screens. Character accents come from
/// [`accent_color`].
#[derive(Debug, Clone)]
pub struct Theme {
    pub title_style: Style,
    pub user_header_style: Style,
    pub user_text_style: Style,
    pub model_text_style: Style,
    pub typing_style: Style,
    pub notice_style: Style,
    pub hint_style: Style,
    pub jump_button_style: Style,
    pub selected_border_style: Style,
    pub input_border_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Self {
            title_style: Style::default().add_modifier(Modifier::BOLD),
            user_header_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            model_text_style: Style::default().fg(Color::White),
            typing_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            notice_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            hint_style: Style::default().fg(Color::DarkGray),
            jump_button_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected_border_style: Style::default().add_modifier(Modifier::BOLD),
            input_border_style: Style::default().fg(Color::Reset),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}

pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Sky => Color::Rgb(0x38, 0xbd, 0xf8),
        Accent::Rose => Color::Rgb(0xfb, 0x71, 0x85),
        Accent::Amber => Color::Rgb(0xfb, 0xbf, 0x24),
        Accent::Violet => Color::Rgb(0xa7, 0x8b, 0xfa),
        Accent::Purple => Color::Rgb(0xc0, 0x84, 0xfc),
        Accent::Emerald => Color::Rgb(0x34, 0xd3, 0x99),
        Accent::Slate => Color::Rgb(0x94, 0xa3, 0xb8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_accent_maps_to_a_distinct_colour() {
        let accents = [
            Accent::Sky,
            Accent::Rose,
            Accent::Amber,
            Accent::Violet,
            Accent::Purple,
            Accent::Emerald,
            Accent::Slate,
        ];
        let mut colours: Vec<Color> = accents.iter().map(|a| accent_color(*a)).collect();
        colours.dedup();
        assert_eq!(colours.len(), accents.len());
    }
}
