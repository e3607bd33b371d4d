use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uni_core::render::{self, RenderOptions};
use uni_core::{
    CoreError, EmojiSelection, Repository, Tone, identify, print, search, select_emoji,
};

/// Print Unicode information about characters.
#[derive(Parser, Debug)]
#[command(name = "uni", version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Quiet output; don't print header, \"no matches\", etc."
    )]
    quiet: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Raw output; don't substitute control characters or mark combining characters"
    )]
    raw: bool,

    #[arg(
        long,
        global = true,
        env = "UNI_DATA_DIR",
        value_name = "PATH",
        help = "Directory with UnicodeData.txt, Blocks.txt and emoji-test.txt (defaults to bundled data)"
    )]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Identify all the characters in the given strings.
    #[command(visible_alias = "i")]
    Identify { strings: Vec<String> },

    /// Search descriptions for all of the words.
    #[command(visible_alias = "s")]
    Search { words: Vec<String> },

    /// Print characters by codepoint, category, block, or "all".
    #[command(
        visible_alias = "p",
        after_help = "Identifiers:
    Character    ⁂, a (a single character names itself)
    Codepoint    U+2042, 2042, U+2042..U+2050
    Category     OtherPunctuation, Po
    Block        GeneralPunctuation
    all          Everything

Names are matched case insensitive; spaces, commas and underscores are
ignored. \"Po\", \"po\", \"Punctuation, OTHER\" and \"Punctuation_other\" are
all identical."
    )]
    Print { idents: Vec<String> },

    /// Print emoji by group or subgroup name ("all", "groups", or a substring).
    #[command(visible_alias = "e")]
    Emoji {
        #[arg(
            short,
            long,
            value_name = "TONE",
            help = "Skin tone: light, mediumlight, medium, mediumdark, or dark"
        )]
        tone: Option<String>,
        groups: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse_from(single_dash_tone(std::env::args_os()));
    let quiet = cli.quiet;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let no_matches = matches!(err.downcast_ref::<CoreError>(), Some(CoreError::NoMatches));
            if !(quiet && no_matches) {
                eprintln!("uni: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let loaded;
    let repo = match &cli.data_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "loading repository from data directory");
            loaded = Repository::from_dir(dir)
                .with_context(|| format!("failed to load Unicode data from {}", dir.display()))?;
            &loaded
        }
        None => Repository::bundled()?,
    };

    let options = RenderOptions {
        quiet: cli.quiet,
        raw: cli.raw,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Identify { strings } => {
            let input = args_or_stdin(strings, cli.quiet)?.concat();
            let records = identify(repo, &input)?;
            render::write_codepoints(&mut out, &records, options)?;
        }
        Command::Search { words } => {
            let words = args_or_stdin(words, cli.quiet)?;
            let records = search(repo, words.as_slice())?;
            render::write_codepoints(&mut out, &records, options)?;
        }
        Command::Print { idents } => {
            let idents = args_or_stdin(idents, cli.quiet)?;
            let records = print(repo, idents.as_slice())?;
            render::write_codepoints(&mut out, &records, options)?;
        }
        Command::Emoji { tone, groups } => {
            // An invalid tone is reported before any group is matched.
            let tone = tone.as_deref().map(str::parse::<Tone>).transpose()?;
            let groups = args_or_stdin(groups, cli.quiet)?;
            match select_emoji(repo, groups.as_slice(), tone)? {
                EmojiSelection::Groups => render::write_groups(&mut out, repo.emoji_groups())?,
                EmojiSelection::Rows(rows) => render::write_emoji(&mut out, &rows, options)?,
            }
        }
    }

    out.flush().context("failed to write output")?;
    Ok(())
}

/// Accept `-tone` and `-tone=NAME` as spellings of `--tone`.
///
/// Without this clap reads `-tone` as `-t one`. Arguments after `--` are
/// left alone.
fn single_dash_tone(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut options_ended = false;
    args.into_iter()
        .map(|arg| {
            if options_ended {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    options_ended = true;
                    arg
                }
                Some("-tone") => OsString::from("--tone"),
                Some(text) if text.starts_with("-tone=") => OsString::from(format!("-{text}")),
                _ => arg,
            }
        })
        .collect()
}

/// Use the command-line arguments, or one argument per line of stdin.
fn args_or_stdin(args: Vec<String>, quiet: bool) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    if !quiet {
        eprintln!("uni: reading from stdin...");
    }
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("failed to read stdin")?;
    let text = match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => {
            if !quiet {
                eprintln!("uni: WARNING: input is not valid UTF-8");
            }
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Ok(text
        .trim_end_matches('\n')
        .split('\n')
        .map(String::from)
        .collect())
}
