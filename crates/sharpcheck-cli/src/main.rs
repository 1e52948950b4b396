mod common;
mod repl;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use log::debug;
use serde::Serialize;

use sharpcheck_lexer::{LexDiagnostic, Lexer};
use sharpcheck_parser::parse;
use sharpcheck_syntax::error::Error;
use sharpcheck_syntax::token::Token;
use sharpcheck_syntax::types::Type;

use common::Painter;

#[derive(Parser, Debug)]
#[command(
    name = "sharpcheck",
    version,
    about = "Tokenize and type-check programs written in a small C#-like language"
)]
struct Cli {
    /// Source file to analyze. Reads standard input when omitted or `-`.
    file: Option<PathBuf>,

    /// Print the token stream (lexeme, kind, line)
    #[arg(short = 't', long = "tokens")]
    tokens: bool,

    /// Output format for tokens, symbols and the analysis result
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Print the global symbol table after a successful analysis
    #[arg(short = 's', long = "symbols")]
    symbols: bool,

    /// Write the input text to this file before analyzing it
    #[arg(long = "save", value_name = "PATH")]
    save: Option<PathBuf>,

    /// Disable colored output (also honored: NO_COLOR)
    #[arg(long = "no-color")]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Start the interactive editor instead of analyzing a file
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic {
    character: String,
    line: usize,
    col: usize,
}

impl From<&LexDiagnostic> for JsonDiagnostic {
    fn from(d: &LexDiagnostic) -> Self {
        Self {
            character: d.ch.to_string(),
            line: d.line,
            col: d.col,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonSymbol {
    name: String,
    #[serde(rename = "type")]
    ty: Type,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonOutcome {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        symbols: Option<Vec<JsonSymbol>>,
    },
    Failure {
        kind: String,
        message: String,
        line: usize,
        col: usize,
    },
}

impl From<&Error> for JsonOutcome {
    fn from(e: &Error) -> Self {
        JsonOutcome::Failure {
            kind: e.kind.name().to_string(),
            message: e.msg.clone(),
            line: e.line,
            col: e.col,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'a [Token]>,
    diagnostics: Vec<JsonDiagnostic>,
    outcome: JsonOutcome,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn read_source(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn fail(p: &Painter, msg: String) -> ! {
    eprintln!("{}: {}", p.red_bold("error"), p.red(msg));
    std::process::exit(2);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let painter = Painter::new(color);

    if cli.interactive || (cli.file.is_none() && io::stdin().is_terminal()) {
        repl::start_repl(&painter);
        return;
    }

    let src = match read_source(cli.file.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            let what = cli
                .file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "standard input".to_string());
            fail(&painter, format!("Failed to read {}: {}", what, e))
        }
    };

    if let Some(target) = &cli.save {
        if let Err(e) = fs::write(target, &src) {
            fail(&painter, format!("Failed to write {}: {}", target.display(), e));
        }
        debug!("saved {} bytes to {}", src.len(), target.display());
        if cli.format == Format::Table {
            println!("Saved input to {}", target.display());
        }
    }

    let mut lexer = Lexer::new(&src);
    let tokens = lexer.tokenize();
    debug!("{} token(s), {} skipped character(s)", tokens.len(), lexer.diagnostics().len());

    if cli.format == Format::Json {
        let result = parse(tokens.clone());
        let outcome = match &result {
            Ok(globals) => JsonOutcome::Success {
                symbols: cli.symbols.then(|| {
                    globals
                        .iter()
                        .map(|(name, ty)| JsonSymbol {
                            name: name.to_string(),
                            ty,
                        })
                        .collect()
                }),
            },
            Err(e) => JsonOutcome::from(e),
        };
        let report = JsonReport {
            tokens: cli.tokens.then_some(tokens.as_slice()),
            diagnostics: lexer.diagnostics().iter().map(JsonDiagnostic::from).collect(),
            outcome,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&painter, format!("Failed to encode report: {}", e)),
        }
        if result.is_err() {
            std::process::exit(1);
        }
        return;
    }

    if cli.tokens {
        common::print_token_table(&painter, &tokens);
        println!();
    }

    match parse(tokens) {
        Ok(globals) => {
            println!("{}", painter.green_bold("Analysis completed successfully"));
            if cli.symbols {
                common::print_symbols(&painter, &globals);
            }
        }
        Err(e) => {
            common::render_error(&painter, &src, &e);
            std::process::exit(1);
        }
    }
}
