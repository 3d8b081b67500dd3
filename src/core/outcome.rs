use std::fmt;
use std::str::FromStr;

/// Classification attached to interpreter output. Drives presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Normal,
    Error,
    Warning,
    DirList,
    Theme,
    Clear,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultKind::Normal => "normal",
            ResultKind::Error => "error",
            ResultKind::Warning => "warning",
            ResultKind::DirList => "dirlist",
            ResultKind::Theme => "theme",
            ResultKind::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// A classified, possibly multi-line piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub kind: ResultKind,
    pub text: String,
}

impl Output {
    pub fn new(kind: ResultKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(ResultKind::Normal, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ResultKind::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(ResultKind::Warning, text)
    }

    pub fn dirlist(text: impl Into<String>) -> Self {
        Self::new(ResultKind::DirList, text)
    }

    pub fn theme(theme: Theme) -> Self {
        Self::new(ResultKind::Theme, theme.name())
    }

    pub fn clear() -> Self {
        Self::new(ResultKind::Clear, "")
    }

    /// Lines for display; every line inherits `kind`.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// What a single dispatch produced: either output, or a request to leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(Output),
    Exit,
}

impl Outcome {
    pub fn output(&self) -> Option<&Output> {
        match self {
            Outcome::Output(output) => Some(output),
            Outcome::Exit => None,
        }
    }
}

impl From<Output> for Outcome {
    fn from(output: Output) -> Self {
        Outcome::Output(output)
    }
}

/// The closed set of colour themes the `theme` verb accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Solarized,
    Dracula,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Solarized, Theme::Dracula];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Solarized => "solarized",
            Theme::Dracula => "dracula",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name() == s)
            .ok_or_else(|| format!("Unknown theme '{}'.", s))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
