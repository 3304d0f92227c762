use crossterm::style::{Color, Stylize};

/// Design tokens for the report tags.
pub mod colors {
    use super::Color;

    pub const PRODUCE: Color = Color::Blue;
    pub const OKEY: Color = Color::Green;
    pub const FIXED: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
}

/// Width of the widest tag, `[PRODUCE]`; narrower tags are right-aligned to it.
pub const TAG_WIDTH: usize = 9;

/// Right-align `tag` to `TAG_WIDTH`, coloring only the tag itself.
pub fn tag(text: &str, color: Color, enabled: bool) -> String {
    let pad = " ".repeat(TAG_WIDTH.saturating_sub(text.len()));
    if enabled {
        format!("{pad}{}", text.with(color).bold())
    } else {
        format!("{pad}{text}")
    }
}
