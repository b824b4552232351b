use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub ui: UiColors,
    pub syntax: SyntaxColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiColors {
    pub background: ThemeColor,
    pub foreground: ThemeColor,
    pub border: ThemeColor,
    pub border_focused: ThemeColor,
    pub title: ThemeColor,
    pub title_focused: ThemeColor,
    pub line_numbers: ThemeColor,
    pub search_match: ThemeColor,
    pub search_match_current: ThemeColor,

    // Status bar
    pub status_bar_bg: ThemeColor,
    pub status_bar_fg: ThemeColor,
    pub status_chip_bg: ThemeColor,
    pub status_chip_fg: ThemeColor,
    pub mode_normal_bg: ThemeColor,
    pub mode_normal_fg: ThemeColor,
    pub mode_insert_bg: ThemeColor,
    pub mode_insert_fg: ThemeColor,
    pub mode_command_bg: ThemeColor,
    pub mode_command_fg: ThemeColor,
    pub mode_search_bg: ThemeColor,
    pub mode_search_fg: ThemeColor,

    // Output panel
    pub output_stdout: ThemeColor,
    pub output_stderr: ThemeColor,
    pub output_notice: ThemeColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxColors {
    pub keyword: ThemeColor,    // def, class, if, for, return, ...
    pub comment: ThemeColor,    // # comments
    pub string: ThemeColor,     // "quoted" and 'quoted'
    pub number: ThemeColor,     // integer and decimal literals
    pub definition: ThemeColor, // def/class names
    pub plain: ThemeColor,      // everything else
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Rgb { r: u8, g: u8, b: u8 },
    Named(String),
}

impl ThemeColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        match self {
            ThemeColor::Rgb { r, g, b } => Color::Rgb(*r, *g, *b),
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => Color::Black,
                "red" => Color::Red,
                "green" => Color::Green,
                "yellow" => Color::Yellow,
                "blue" => Color::Blue,
                "magenta" => Color::Magenta,
                "cyan" => Color::Cyan,
                "white" => Color::White,
                "gray" | "grey" => Color::Gray,
                "darkgray" | "darkgrey" => Color::DarkGray,
                "lightred" => Color::LightRed,
                "lightgreen" => Color::LightGreen,
                "lightyellow" => Color::LightYellow,
                "lightblue" => Color::LightBlue,
                "lightmagenta" => Color::LightMagenta,
                "lightcyan" => Color::LightCyan,
                _ => {
                    // Try parsing hex color #RRGGBB
                    if name.starts_with('#') && name.len() == 7 {
                        if let (Ok(r), Ok(g), Ok(b)) = (
                            u8::from_str_radix(&name[1..3], 16),
                            u8::from_str_radix(&name[3..5], 16),
                            u8::from_str_radix(&name[5..7], 16),
                        ) {
                            return Color::Rgb(r, g, b);
                        }
                    }
                    Color::White
                }
            },
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: String::from("dark"),
            ui: UiColors {
                background: ThemeColor::rgb(30, 30, 30),
                foreground: ThemeColor::rgb(212, 212, 212),
                border: ThemeColor::rgb(60, 60, 60),
                border_focused: ThemeColor::rgb(100, 149, 237),
                title: ThemeColor::rgb(100, 100, 100),
                title_focused: ThemeColor::rgb(100, 149, 237),
                line_numbers: ThemeColor::rgb(90, 90, 90),
                search_match: ThemeColor::rgb(100, 80, 0),
                search_match_current: ThemeColor::rgb(150, 120, 0),

                status_bar_bg: ThemeColor::rgb(25, 25, 25),
                status_bar_fg: ThemeColor::rgb(150, 150, 150),
                status_chip_bg: ThemeColor::rgb(45, 45, 45),
                status_chip_fg: ThemeColor::rgb(212, 212, 212),
                mode_normal_bg: ThemeColor::rgb(86, 156, 214),
                mode_normal_fg: ThemeColor::rgb(30, 30, 30),
                mode_insert_bg: ThemeColor::rgb(78, 201, 176),
                mode_insert_fg: ThemeColor::rgb(30, 30, 30),
                mode_command_bg: ThemeColor::rgb(220, 220, 170),
                mode_command_fg: ThemeColor::rgb(30, 30, 30),
                mode_search_bg: ThemeColor::rgb(214, 157, 86),
                mode_search_fg: ThemeColor::rgb(30, 30, 30),

                output_stdout: ThemeColor::rgb(212, 212, 212),
                output_stderr: ThemeColor::rgb(244, 135, 113),
                output_notice: ThemeColor::rgb(86, 156, 214),
            },
            syntax: SyntaxColors {
                keyword: ThemeColor::rgb(86, 156, 214),    // Blue
                comment: ThemeColor::rgb(106, 153, 85),    // Green
                string: ThemeColor::rgb(206, 145, 120),    // Orange/brown
                number: ThemeColor::rgb(181, 206, 168),    // Light green
                definition: ThemeColor::rgb(78, 201, 176), // Teal
                plain: ThemeColor::rgb(212, 212, 212),     // Fg
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: String::from("light"),
            ui: UiColors {
                background: ThemeColor::rgb(255, 255, 255),
                foreground: ThemeColor::rgb(30, 30, 30),
                border: ThemeColor::rgb(200, 200, 200),
                border_focused: ThemeColor::rgb(0, 122, 204),
                title: ThemeColor::rgb(120, 120, 120),
                title_focused: ThemeColor::rgb(0, 122, 204),
                line_numbers: ThemeColor::rgb(150, 150, 150),
                search_match: ThemeColor::rgb(255, 235, 150),
                search_match_current: ThemeColor::rgb(255, 215, 0),

                status_bar_bg: ThemeColor::rgb(240, 240, 240),
                status_bar_fg: ThemeColor::rgb(80, 80, 80),
                status_chip_bg: ThemeColor::rgb(255, 255, 255),
                status_chip_fg: ThemeColor::rgb(30, 30, 30),
                mode_normal_bg: ThemeColor::rgb(0, 122, 204),
                mode_normal_fg: ThemeColor::rgb(255, 255, 255),
                mode_insert_bg: ThemeColor::rgb(22, 163, 74),
                mode_insert_fg: ThemeColor::rgb(255, 255, 255),
                mode_command_bg: ThemeColor::rgb(180, 140, 0),
                mode_command_fg: ThemeColor::rgb(255, 255, 255),
                mode_search_bg: ThemeColor::rgb(234, 88, 12),
                mode_search_fg: ThemeColor::rgb(255, 255, 255),

                output_stdout: ThemeColor::rgb(30, 30, 30),
                output_stderr: ThemeColor::rgb(220, 38, 38),
                output_notice: ThemeColor::rgb(0, 122, 204),
            },
            syntax: SyntaxColors {
                keyword: ThemeColor::rgb(0, 0, 255),       // Blue
                comment: ThemeColor::rgb(0, 128, 0),       // Green
                string: ThemeColor::rgb(163, 21, 21),      // Red/brown
                number: ThemeColor::rgb(9, 134, 88),       // Green
                definition: ThemeColor::rgb(38, 127, 153), // Teal
                plain: ThemeColor::rgb(30, 30, 30),        // Black
            },
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: String::from("gruvbox"),
            ui: UiColors {
                background: ThemeColor::rgb(40, 40, 40),
                foreground: ThemeColor::rgb(235, 219, 178),
                border: ThemeColor::rgb(80, 73, 69),
                border_focused: ThemeColor::rgb(215, 153, 33),
                title: ThemeColor::rgb(146, 131, 116),
                title_focused: ThemeColor::rgb(215, 153, 33),
                line_numbers: ThemeColor::rgb(124, 111, 100),
                search_match: ThemeColor::rgb(215, 153, 33),
                search_match_current: ThemeColor::rgb(250, 189, 47),

                status_bar_bg: ThemeColor::rgb(50, 48, 47),
                status_bar_fg: ThemeColor::rgb(168, 153, 132),
                status_chip_bg: ThemeColor::rgb(60, 56, 54),
                status_chip_fg: ThemeColor::rgb(235, 219, 178),
                mode_normal_bg: ThemeColor::rgb(131, 165, 152),
                mode_normal_fg: ThemeColor::rgb(40, 40, 40),
                mode_insert_bg: ThemeColor::rgb(184, 187, 38),
                mode_insert_fg: ThemeColor::rgb(40, 40, 40),
                mode_command_bg: ThemeColor::rgb(250, 189, 47),
                mode_command_fg: ThemeColor::rgb(40, 40, 40),
                mode_search_bg: ThemeColor::rgb(254, 128, 25),
                mode_search_fg: ThemeColor::rgb(40, 40, 40),

                output_stdout: ThemeColor::rgb(235, 219, 178),
                output_stderr: ThemeColor::rgb(251, 73, 52),
                output_notice: ThemeColor::rgb(131, 165, 152),
            },
            syntax: SyntaxColors {
                keyword: ThemeColor::rgb(251, 73, 52),     // Red
                comment: ThemeColor::rgb(146, 131, 116),   // Gray
                string: ThemeColor::rgb(184, 187, 38),     // Green
                number: ThemeColor::rgb(211, 134, 155),    // Purple
                definition: ThemeColor::rgb(250, 189, 47), // Yellow
                plain: ThemeColor::rgb(235, 219, 178),     // Fg
            },
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::dark(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["dark", "light", "gruvbox"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
