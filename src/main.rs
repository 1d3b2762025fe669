use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use colored::Colorize;
use frontend::{
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::TokenKind,
    },
    parser::parser::parse_source,
};
use log::{info, LevelFilter, Log, Metadata, Record};

/// Parse a source file and print its canonical form
#[derive(ClapParser, Debug)]
#[command(name = "frontend", version, about)]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Log parser progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {}", format!("[{}]", record.level()).dimmed(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    log::set_logger(&LOGGER).context("failed to install logger")?;
    log::set_max_level(if cli.verbose { LevelFilter::Trace } else { LevelFilter::Warn });

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    if cli.tokens {
        dump_tokens(&source, &file_name);
    }

    let start = Instant::now();
    let (parser, program) = parse_source(&source, Some(file_name));
    info!("parsed in {:?}", start.elapsed());

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            display_error(error, &source, &cli.file);
        }

        anyhow::bail!("{} syntax error(s)", parser.errors().len());
    }

    println!("{}", program);

    Ok(())
}

fn dump_tokens(source: &str, file_name: &str) {
    let mut lexer = Lexer::new(source.to_string(), Some(file_name.to_string()));

    loop {
        let token = lexer.next_token();
        println!("{:>5}  {}", token.span.start.0, token);

        if token.kind == TokenKind::EOF {
            break;
        }
    }
}

fn display_error(error: &Error, source: &str, file: &Path) {
    /*
        error: message
        -> final.lang
           |
        20 | let a = #;
           | --------^
    */

    match error.get_tip() {
        ErrorTip::None => eprintln!("{}: {}", "error".red().bold(), error),
        tip => eprintln!("{}: {} ({})", "error".red().bold(), error, tip),
    }
    eprintln!("{} {}", "->".blue(), file.display());

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0) else {
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    let trimmed = line_text.trim_start_matches(' ');
    let removed_whitespace = line_text.len() - trimmed.len();

    eprintln!("{}", format!("{:>padding$}", "|").blue());
    eprintln!("{} {} {}", line_str.blue(), "|".blue(), trimmed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    eprintln!("{} {}", format!("{:>padding$}", "|").blue(), format!("{:->arrows$}", "^").red());
}
