//! Color tokens resolved through the host application's palette.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named color in the application palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    Brand,
    BgDark,
    Filter,
    Summarize,
    Accent4,
}

impl ColorToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorToken::Brand => "brand",
            ColorToken::BgDark => "bg-dark",
            ColorToken::Filter => "filter",
            ColorToken::Summarize => "summarize",
            ColorToken::Accent4 => "accent4",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps color tokens to concrete colors (theming is owned by the host).
pub trait Palette {
    fn color(&self, token: ColorToken) -> String;
}

/// The stock light theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPalette;

impl Palette for DefaultPalette {
    fn color(&self, token: ColorToken) -> String {
        let hex = match token {
            ColorToken::Brand => "#509EE3",
            ColorToken::BgDark => "#93A1AB",
            ColorToken::Filter => "#7172AD",
            ColorToken::Summarize => "#88BF4D",
            ColorToken::Accent4 => "#F9D45C",
        };
        hex.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&ColorToken::BgDark).unwrap(), r#""bg-dark""#);
        assert_eq!(ColorToken::Accent4.to_string(), "accent4");
    }

    #[test]
    fn test_default_palette() {
        assert_eq!(DefaultPalette.color(ColorToken::Brand), "#509EE3");
    }
}
