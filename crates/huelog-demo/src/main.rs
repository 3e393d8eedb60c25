//! Prints one sample record per level through a huelog theme.
//!
//! ```text
//! huelog-demo --theme light --format '${time:%H:%M:%S} ${level:%s:right} %s'
//! huelog-demo --palette my-palette.yaml --multi-line
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use huelog::host::{Level, Log};
use huelog::theme::ThemePalette;
use huelog::Compiler;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeName {
    Dark,
    Light,
    Default,
}

impl ThemeName {
    fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Default => "default",
        }
    }
}

#[derive(Parser)]
#[command(name = "huelog-demo")]
#[command(about = "Print sample log records through a huelog theme")]
struct Cli {
    /// Builtin palette
    #[arg(long, value_enum, default_value = "default")]
    theme: ThemeName,

    /// YAML palette file, overrides --theme
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Line format; `${level}` gets the level style, `%s` is the message
    #[arg(long, default_value = "${time} ${level:%s:right} %s")]
    format: String,

    /// Lowest level to print
    #[arg(long, default_value = "trace")]
    level: Level,

    /// Print each message over three lines
    #[arg(long)]
    multi_line: bool,

    /// Force colors on or off instead of detecting the terminal
    #[arg(long)]
    color: Option<bool>,
}

fn load_palette(cli: &Cli) -> Result<ThemePalette> {
    if let Some(path) = &cli.palette {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading palette {}", path.display()))?;
        return ThemePalette::from_yaml(&yaml)
            .with_context(|| format!("parsing palette {}", path.display()));
    }

    let name = cli.theme.as_str();
    ThemePalette::named(name)
        .cloned()
        .with_context(|| format!("no builtin palette named {:?}", name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.format.contains("${level") {
        bail!("format {:?} has no ${{level}} field", cli.format);
    }

    let palette = load_palette(&cli)?;
    let compiler = match cli.color {
        Some(enabled) => Compiler::new().styling(enabled),
        None => Compiler::from_env(),
    };
    let theme = compiler
        .apply_default_theme(&cli.format, &palette)
        .context("building theme")?;

    let mut log = Log::new();
    log.set_theme(theme);
    log.set_level(cli.level);

    for level in Level::ALL {
        if cli.multi_line {
            log.log(
                level,
                format_args!("{} message\ncontinued\nand done", level.as_str()),
            );
        } else {
            log.log(level, format_args!("{} message", level.as_str()));
        }
    }

    Ok(())
}
