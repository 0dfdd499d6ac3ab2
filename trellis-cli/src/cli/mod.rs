//! # Command Line Interface
//!
//! Defines the CLI surface of the trellis tool and dispatches into the
//! status pipeline.

pub mod status;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use trellis_core::creds::default_credential_source;
use trellis_core::output::ColorMode;

/// Top-level CLI command for the trellis tool
#[derive(Parser)]
#[command(name = "trellis")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Report Travis CI build status for the current branch")]
#[command(
  long_about = "Trellis reports the latest Travis CI build status for the current git\n\
        repository and branch, including per-job results.\n\n\
        Without arguments the repository is derived from the 'origin' remote of the\n\
        current working directory; explicit owner/repo slugs may be passed instead."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Branch to report instead of the detected one
  #[arg(long, short = 'b', value_name = "NAME")]
  pub branch: Option<String>,

  /// Repositories to report as owner/repo slugs (defaults to the current
  /// repository's origin)
  #[arg(value_name = "REPO")]
  pub repos: Vec<String>,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {
      // Let owo_colors use its default auto-detection
    }
  }

  let targets = status::resolve_targets(&cli.repos, cli.branch.as_deref())?;
  let source = default_credential_source();

  status::run(&targets, source.as_ref())
}
