use inksac::prelude::*;

use crate::core::outcome::{Output, ResultKind, Theme};

type Rgb = (u8, u8, u8);

/// Foreground colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Rgb,
    pub error: Rgb,
    pub warning: Rgb,
    pub dirlist: Rgb,
    pub suggestion: Rgb,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Default => Palette {
                text: (192, 192, 192),
                error: (255, 80, 80),
                warning: (255, 165, 0),
                dirlist: (120, 180, 255),
                suggestion: (100, 100, 100),
            },
            Theme::Solarized => Palette {
                text: (131, 148, 150),
                error: (220, 50, 47),
                warning: (181, 137, 0),
                dirlist: (38, 139, 210),
                suggestion: (147, 161, 161),
            },
            Theme::Dracula => Palette {
                text: (248, 248, 242),
                error: (255, 85, 85),
                warning: (241, 250, 140),
                dirlist: (139, 233, 253),
                suggestion: (98, 114, 164),
            },
        }
    }

    pub fn for_kind(&self, kind: ResultKind) -> Rgb {
        match kind {
            ResultKind::Error => self.error,
            ResultKind::Warning => self.warning,
            ResultKind::DirList => self.dirlist,
            ResultKind::Normal | ResultKind::Theme | ResultKind::Clear => self.text,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    theme: Theme,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(Theme::Default)
    }
}

impl SyntaxHighlighter {
    pub fn new(theme: Theme) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
            theme,
        }
    }

    /// A highlighter that never emits escape codes.
    pub fn plain(theme: Theme) -> Self {
        Self {
            color_support: ColorSupport::NoColor,
            theme,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    fn paint(&self, text: &str, (r, g, b): Rgb, bold: bool) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return text.to_string();
        }

        let color = Color::RGB(r, g, b);
        let style = if bold {
            Style::builder().foreground(color).bold().build()
        } else {
            Style::builder().foreground(color).build()
        };
        text.style(style).to_string()
    }

    /// Every line of the output in the colour of its kind.
    pub fn render(&self, output: &Output) -> String {
        let color = self.palette().for_kind(output.kind);
        output
            .lines()
            .map(|line| self.paint(line, color, false))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Input-line colouring: the verb in bold, `-flags` in the warning colour.
    pub fn highlight_command(&self, input: &str, known_verb: bool) -> String {
        let Some(first) = input.split_whitespace().next() else {
            return input.to_string();
        };
        let palette = self.palette();
        let verb_color = if known_verb { palette.dirlist } else { palette.error };

        let start = input.len() - input.trim_start().len();
        let rest = &input[start + first.len()..];
        let mut highlighted = String::with_capacity(input.len() * 2);
        highlighted.push_str(&input[..start]);
        highlighted.push_str(&self.paint(first, verb_color, true));

        for (i, piece) in rest.split(' ').enumerate() {
            if i > 0 {
                highlighted.push(' ');
            }
            if piece.starts_with('-') {
                highlighted.push_str(&self.paint(piece, palette.warning, false));
            } else {
                highlighted.push_str(piece);
            }
        }
        highlighted
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        self.paint(hint, self.palette().suggestion, false)
    }
}
