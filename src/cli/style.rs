//! Terminal styling for stage output
//!
//! Every styled fragment names a [`Tone`] rather than a color, so command
//! output stays consistent. Color is dropped when the target stream is not a
//! terminal or `NO_COLOR` is set.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

/// What a fragment of output means to the person marking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Students, branches, counts
    Accent,
    /// Stage complete
    Done,
    /// A failed stage or push
    Failure,
    /// Skipped students and late submissions
    Attention,
    /// Reasons, URLs, timestamps
    Muted,
    /// Phase headers
    Heading,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Done => Style::new().green(),
            Self::Failure => Style::new().red(),
            Self::Attention => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Heading => Style::new().bold(),
        }
    }

    /// Failures and warnings go to stderr unless redirected
    const fn default_stream(self) -> Stream {
        match self {
            Self::Failure | Self::Attention => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A value rendered in a [`Tone`] for one output stream
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, tone: Tone) -> Self {
        Self {
            value,
            tone,
            stream: tone.default_stream(),
        }
    }

    /// Check color support against stderr
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }

    /// Check color support against stdout
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Tone shortcuts for anything displayable
pub trait Stylize: Display {
    /// Students, branch names and counts
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Accent)
    }

    /// Error text (stderr)
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Failure)
    }

    /// Needs a look from the marker (stderr)
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Attention)
    }

    /// Secondary detail
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Muted)
    }

    /// Headers
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Heading)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Stage finished
pub const fn check() -> Styled<&'static str> {
    Styled::new("✓", Tone::Done)
}

/// Stage or push failed
pub const fn cross() -> Styled<&'static str> {
    Styled::new("✗", Tone::Failure)
}

/// Links a pull request to its head branch
pub const fn arrow() -> Styled<&'static str> {
    Styled::new("→", Tone::Accent)
}

/// Skipped entry marker
pub const fn bullet() -> Styled<&'static str> {
    Styled::new("○", Tone::Muted)
}

/// Render `url` as an OSC 8 hyperlink when the terminal supports it
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while student repositories are fetched
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("spinner template is a literal")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
