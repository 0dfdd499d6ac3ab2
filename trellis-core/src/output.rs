//! # Output Formatting
//!
//! Provides the status glyph set and formatted output helpers with colors and
//! consistent styling for user-facing terminal lines.

use std::fmt;

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

/// Visual marker for a build, commit, or job outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
  Good,
  Bad,
  Progress,
}

impl Glyph {
  // Windows consoles don't reliably render the Unicode set, so they get
  // ASCII markers.
  fn symbol(self) -> &'static str {
    if cfg!(windows) {
      match self {
        Glyph::Good => "OK",
        Glyph::Bad => "X",
        Glyph::Progress => "O",
      }
    } else {
      match self {
        Glyph::Good => "✔",
        Glyph::Bad => "✖",
        Glyph::Progress => "♢",
      }
    }
  }
}

impl fmt::Display for Glyph {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Glyph::Good => write!(f, "{}", self.symbol().green()),
      Glyph::Bad => write!(f, "{}", self.symbol().red()),
      Glyph::Progress => write!(f, "{}", self.symbol().yellow()),
    }
  }
}

/// Glyph for a resolved build's overall outcome.
///
/// A missing `status` means the build is still in progress; a nonzero
/// `result` is a failure.
pub fn outcome_glyph(result: Option<i64>, status: Option<i64>) -> Glyph {
  if status.is_none() {
    Glyph::Progress
  } else if result.unwrap_or(0) != 0 {
    Glyph::Bad
  } else {
    Glyph::Good
  }
}

/// Glyph for a build state string.
///
/// Anything that is not a terminal `passed`/`failed` state renders as in
/// progress, including a missing state.
pub fn state_glyph(state: Option<&str>) -> Glyph {
  match state {
    Some("failed") => Glyph::Bad,
    Some("passed") => Glyph::Good,
    _ => Glyph::Progress,
  }
}

/// Glyph for a single job: failures win, then unfinished jobs, then good.
pub fn job_glyph(state: &str, finished: bool) -> Glyph {
  if state == "failed" {
    Glyph::Bad
  } else if !finished {
    Glyph::Progress
  } else {
    Glyph::Good
  }
}

/// Print an error message
pub fn print_error(message: &str) {
  eprintln!("{} {}", Glyph::Bad, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  println!("{} {}", Glyph::Progress, message);
}

/// Print an info message
pub fn print_info(message: &str) {
  println!("{} {}", "i".blue().bold(), message);
}
