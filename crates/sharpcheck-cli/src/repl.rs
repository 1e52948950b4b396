use std::fs;
use std::io::{self, Write};

use sharpcheck_lexer::{tokenize, Lexer};
use sharpcheck_parser::parse;
use sharpcheck_syntax::token::TokenKind;

use crate::common::{self, Painter};

pub fn start_repl(p: &Painter) {
    println!(
        "{}",
        p.green_bold("sharpcheck interactive editor. Type :help for help, :quit to exit.")
    );

    let mut buffer = String::new();
    loop {
        let prompt = if brace_depth(&buffer) > 0 { "... > " } else { "sharp> " };
        print!("{}", p.paint(prompt, owo_colors::Style::new().cyan()));
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim();

        if !trimmed.starts_with(':') {
            buffer.push_str(&line);
            if !line.ends_with('\n') {
                buffer.push('\n');
            }
            continue;
        }

        let (command, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (trimmed, ""),
        };
        match command {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye.");
                break;
            }
            ":help" | ":h" => print_help(p),
            ":check" | ":c" => check(p, &buffer),
            ":tokens" | ":t" => {
                let mut lexer = Lexer::new(&buffer);
                let tokens = lexer.tokenize();
                common::print_token_table(p, &tokens);
                for diag in lexer.diagnostics() {
                    println!("{}", p.yellow(diag));
                }
            }
            ":show" => show(p, &buffer),
            ":clear" => {
                buffer.clear();
                println!("{}", p.yellow("Input cleared."));
            }
            ":save" => {
                if arg.is_empty() {
                    println!("{}", p.red("Usage: :save <path>"));
                } else {
                    match fs::write(arg, &buffer) {
                        Ok(()) => println!("Saved input to {}", arg),
                        Err(e) => eprintln!(
                            "{}: {}",
                            p.red_bold("error"),
                            p.red(format!("Failed to write {}: {}", arg, e))
                        ),
                    }
                }
            }
            _ => println!("{}", p.red("Unknown command. Type :help.")),
        }
    }
}

fn print_help(p: &Painter) {
    println!("{}", p.paint("Commands:", owo_colors::Style::new().bold()));
    let rows = [
        (":check", "Analyze the current input"),
        (":tokens", "Show the token stream of the current input"),
        (":show", "Print the current input with line numbers"),
        (":clear", "Discard the current input"),
        (":save <path>", "Write the current input to a file"),
        (":quit", "Exit"),
    ];
    for (cmd, text) in rows {
        println!("  {}{}", p.yellow(format!("{:<14}", cmd)), text);
    }
    println!("Any other line is appended to the input.");
}

fn check(p: &Painter, buffer: &str) {
    match parse(tokenize(buffer)) {
        Ok(globals) => {
            println!("{}", p.green_bold("Analysis completed successfully"));
            common::print_symbols(p, &globals);
        }
        Err(e) => common::render_error(p, buffer, &e),
    }
}

fn show(p: &Painter, buffer: &str) {
    if buffer.is_empty() {
        println!("{}", p.dim("<empty>"));
        return;
    }
    for (i, line) in buffer.lines().enumerate() {
        println!("{}{}", p.dim(format!("{:3} | ", i + 1)), line);
    }
}

/// Open braces not yet closed, used to pick the continuation prompt.
fn brace_depth(input: &str) -> i32 {
    tokenize(input).iter().fold(0, |depth, tk| match tk.kind {
        TokenKind::LBrace => depth + 1,
        TokenKind::RBrace => depth - 1,
        _ => depth,
    })
}
