use crate::color::Color;
use std::fmt;
use std::str::FromStr;

/// The editing tools available on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Paints single cells with the active color
    #[default]
    Pencil,
    /// Clears single cells back to transparent
    Eraser,
    /// Bucket fill of a connected same-colored region
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pencil, Tool::Eraser, Tool::Fill];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Eraser => "eraser",
            Self::Fill => "fill",
        }
    }

    /// Whether dragging the pointer keeps painting cells
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Pencil | Self::Eraser)
    }

    /// The color this tool writes, given the active color
    pub fn paint_color(&self, active: Color) -> Color {
        match self {
            Self::Pencil | Self::Fill => active,
            Self::Eraser => Color::Transparent,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool {0:?}, expected pencil, eraser or fill")]
pub struct UnknownTool(String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTool(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("pencil".parse(), Ok(Tool::Pencil));
        assert_eq!("Fill".parse(), Ok(Tool::Fill));
        assert!("brush".parse::<Tool>().is_err());
    }

    #[test]
    fn eraser_writes_transparent() {
        assert_eq!(Tool::Eraser.paint_color(Color::RED), Color::Transparent);
        assert_eq!(Tool::Pencil.paint_color(Color::RED), Color::RED);
    }
}
