use ratatui::style::Color;

use crate::food::PowerUp;

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    /// Snake color while ghost mode is active.
    pub snake_ghost: Color,
    /// Snake color while invincibility is active.
    pub snake_invincible: Color,
    pub food: Color,
    pub obstacle: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

impl Theme {
    /// Food color for `power_up`, falling back to plain food.
    #[must_use]
    pub fn food_color(&self, power_up: Option<PowerUp>) -> Color {
        match power_up {
            None => self.food,
            Some(PowerUp::SpeedBoost) => Color::Yellow,
            Some(PowerUp::GhostMode) => Color::Gray,
            Some(PowerUp::ExtraPoints) => Color::LightGreen,
            Some(PowerUp::MultiGrow) => Color::LightMagenta,
            Some(PowerUp::Invincibility) => Color::LightCyan,
        }
    }
}

/// Green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    snake_ghost: Color::Gray,
    snake_invincible: Color::LightCyan,
    food: Color::Red,
    obstacle: Color::Rgb(140, 90, 60),
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

#[cfg(test)]
mod tests {
    use crate::food::PowerUp;

    use super::THEME_CLASSIC;

    #[test]
    fn every_power_up_is_distinct_from_plain_food() {
        for kind in PowerUp::ALL {
            assert_ne!(THEME_CLASSIC.food_color(Some(kind)), THEME_CLASSIC.food);
        }
    }
}
