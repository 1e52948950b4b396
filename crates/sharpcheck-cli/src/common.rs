use std::fmt::Display;

use owo_colors::{OwoColorize, Style};
use sharpcheck_parser::SymbolTable;
use sharpcheck_syntax::error::{Error, ErrorKind};
use sharpcheck_syntax::token::Token;

/// Applies terminal styles unless color output is turned off.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: impl Display, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn red(&self, text: impl Display) -> String {
        self.paint(text, Style::new().red())
    }

    pub fn red_bold(&self, text: impl Display) -> String {
        self.paint(text, Style::new().red().bold())
    }

    pub fn green_bold(&self, text: impl Display) -> String {
        self.paint(text, Style::new().green().bold())
    }

    pub fn yellow(&self, text: impl Display) -> String {
        self.paint(text, Style::new().yellow())
    }

    pub fn dim(&self, text: impl Display) -> String {
        self.paint(text, Style::new().bright_black())
    }
}

pub fn render_error(p: &Painter, source: &str, err: &Error) {
    eprintln!("{}: {}", p.red_bold(err.kind), p.red(&err.msg));
    eprintln!("  --> line {}, column {}", err.line, err.col);
    if let Some(src_line) = source.lines().nth(err.line.saturating_sub(1)) {
        let line_num_str = format!("{:3} | ", err.line);
        eprintln!("     |");
        eprintln!("{}{}", p.dim(&line_num_str), src_line);

        let mut marker = " ".repeat(line_num_str.len() + err.col.saturating_sub(1));
        marker.push('^');
        eprintln!("{}{}", p.red(marker), p.red(" error here"));
        eprintln!("     |");
    }
    provide_error_suggestions(p, err);
}

pub fn provide_error_suggestions(p: &Painter, err: &Error) {
    match err.kind {
        ErrorKind::UndeclaredVariable => {
            eprintln!("{}", p.yellow("Help: Declare the variable before using it."));
            eprintln!("    {}", p.dim("Example: int total = 0;"));
            eprintln!(
                "    {}",
                p.dim("Inside a method only its parameters and locals are visible, not class fields.")
            );
        }
        ErrorKind::DuplicateDeclaration => {
            eprintln!("{}", p.yellow("Help: Each name can be declared once per scope."));
            if err.msg.contains("already declared") {
                eprintln!(
                    "    {}",
                    p.dim("For-loop variables share the method scope; pick a different name.")
                );
            }
        }
        ErrorKind::TypeMismatch => {
            eprintln!("{}", p.yellow("Help: Both sides must have exactly the same type."));
            eprintln!(
                "    {}",
                p.dim("Number literals are INT unless they end in 'f' (FLOAT): 2.5f")
            );
            if err.msg.contains("BOOL operands") {
                eprintln!(
                    "    {}",
                    p.dim("'&&' and '||' only combine comparisons or bool values.")
                );
            }
        }
        ErrorKind::Syntax => {
            if err.msg.contains("compound assignment operator") || err.msg.contains("found NUMBER") {
                eprintln!("{}", p.yellow("Help: A for-loop step has the form `i += 1`."));
                eprintln!(
                    "    {}",
                    p.dim("Supported: += -= *= /= %= ++ -- followed by a number")
                );
            } else if err.msg.contains("access modifier") {
                eprintln!(
                    "{}",
                    p.yellow("Help: Classes and members start with public, private or protected.")
                );
            } else if err.msg.contains("COMMENT") {
                eprintln!(
                    "{}",
                    p.yellow("Help: Comments are not allowed at this position.")
                );
            } else if err.msg.contains("end of input") {
                eprintln!("{}", p.yellow("Help: Check that every '{' has a matching '}'."));
            } else if err.msg.contains("Expected SEMICOLON") {
                eprintln!("{}", p.yellow("Help: Did you forget a ';'?"));
            }
        }
    }
}

fn display_lexeme(lexeme: &str) -> String {
    lexeme.replace('\r', "").replace('\n', "\\n").replace('\t', "\\t")
}

pub fn print_token_table(p: &Painter, tokens: &[Token]) {
    let rows: Vec<(String, &Token)> = tokens
        .iter()
        .map(|t| (display_lexeme(&t.lexeme), t))
        .collect();
    let width = rows
        .iter()
        .map(|(lexeme, _)| lexeme.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(6, 40);
    println!(
        "{}",
        p.paint(
            format!("{:<width$}  {:<20}  {}", "Lexeme", "Kind", "Line", width = width),
            Style::new().bold()
        )
    );
    for (lexeme, tok) in rows {
        println!(
            "{:<width$}  {:<20}  {}",
            lexeme,
            tok.kind.name(),
            tok.line,
            width = width
        );
    }
}

pub fn print_symbols(p: &Painter, globals: &SymbolTable) {
    if globals.is_empty() {
        println!("{}", p.dim("<no global symbols>"));
        return;
    }
    for (name, ty) in globals.iter() {
        println!("{}: {}", p.yellow(name), ty);
    }
}
