//! # Prompts Module
//!
//! Provides a custom dialoguer theme for consistent styling across trellis's
//! interactive credential prompts.

use console::Style;
use dialoguer::theme::ColorfulTheme;

/// Returns a custom dialoguer theme matching trellis's color palette.
pub fn trellis_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    ..ColorfulTheme::default()
  }
}
