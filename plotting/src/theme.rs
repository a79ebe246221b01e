use color::{Color, Palette};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotThemes {
    #[default]
    Ggplot,
    Dark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotTheme {
    pub figure_background: Color,
    pub axes_background: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub legend_background: Color,
    pub line_colors: Palette,
}

impl PlotThemes {
    pub fn palette(&self) -> PlotTheme {
        match self {
            PlotThemes::Ggplot => PlotTheme {
                figure_background: Color::WHITE,
                axes_background: Color::from_rgb_hex(0xe5e5e5),
                grid_color: Color::WHITE,
                text_color: Color::from_rgb_hex(0x555555),
                legend_background: Color::from_rgb_hex(0xf0f0f0),
                line_colors: Palette::ggplot(),
            },
            PlotThemes::Dark => PlotTheme {
                figure_background: Color::from_rgb_hex(0x111111),
                axes_background: Color::from_rgb_hex(0x202020),
                grid_color: Color::from_rgb_hex(0x333333),
                text_color: Color::from_rgb_hex(0xa0a0a0),
                legend_background: Color::from_rgb_hex(0x111111),
                line_colors: Palette::dark(),
            },
        }
    }
}

impl Default for PlotTheme {
    fn default() -> Self {
        PlotThemes::default().palette()
    }
}
