use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Board frame color
    pub border: Color,
    /// Tile sitting on its solved cell
    pub placed: Color,
    /// Tile away from its solved cell
    pub misplaced: Color,
    /// Background of the empty cell
    pub empty_bg: Color,
    /// Highlight for a tile that just slid to a neighbouring cell
    pub slide: Color,
    /// Highlight for a tile that just wrapped across an edge
    pub wrap: Color,
    /// Rebuilt board color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 90, g: 95, b: 115 },
            placed: Color::Rgb { r: 140, g: 200, b: 140 },
            misplaced: Color::Rgb { r: 235, g: 235, b: 245 },
            empty_bg: Color::Rgb { r: 55, g: 60, b: 80 },
            slide: Color::Rgb { r: 80, g: 180, b: 255 },
            wrap: Color::Rgb { r: 255, g: 170, b: 60 },
            success: Color::Rgb { r: 100, g: 220, b: 120 },
            info: Color::Rgb { r: 160, g: 165, b: 190 },
            key: Color::Rgb { r: 255, g: 210, b: 90 },
        }
    }
}
