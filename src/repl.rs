// ABOUTME: Interactive REPL — rustyline line editing over a persistent Interpreter

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use crate::config::{HISTORY_FILE, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use crate::interp::Interpreter;
use crate::io::StdIo;
use crate::{lexer, parser};

/// Runs the read-eval-print loop against a single persistent
/// `Interpreter`, so top-level variables, functions, and classes
/// survive across REPL entries (the single process-wide global
/// environment model of §3).
pub fn run() {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = match DefaultEditor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {e}");
            return;
        }
    };

    let _ = rl.load_history(HISTORY_FILE);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    let mut interpreter = Interpreter::new(StdIo);
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "glam> " } else { "   .. " };
        match rl.readline(prompt) {
            Ok(line) => {
                if buffer.is_empty() {
                    match line.trim() {
                        ":quit" | ":exit" => {
                            println!("Goodbye!");
                            break;
                        }
                        ":clear" => {
                            print!("\x1B[2J\x1B[H");
                            continue;
                        }
                        "" => continue,
                        _ => {}
                    }
                }

                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if !is_input_complete(&buffer) {
                    continue;
                }

                let source = std::mem::take(&mut buffer);
                match lexer::lex(&source).and_then(parser::parse) {
                    Ok(program) => {
                        if let Err(e) = interpreter.run(&program) {
                            eprintln!("{e}");
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C clears the current (possibly multi-line) input.
                buffer.clear();
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
}

/// Tracks paren/brace/bracket depth and string-literal state across a
/// (possibly multi-line) accumulated buffer, the same way the source
/// interpreter's own REPL helper tracks s-expression depth, but
/// generalized to Glam's brace/paren/bracket block syntax. A buffer is
/// complete once every opener has a matching closer and it ends with
/// a statement terminator (`;` or `}`) outside of a string.
fn is_input_complete(buffer: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut last_significant = None;

    for ch in buffer.chars() {
        if in_string {
            if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => depth -= 1,
            c if !c.is_whitespace() => last_significant = Some(c),
            _ => {}
        }
    }

    !in_string && depth <= 0 && matches!(last_significant, Some(';') | Some('}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_statement_is_complete() {
        assert!(is_input_complete("int x = 1;"));
    }

    #[test]
    fn unterminated_statement_is_incomplete() {
        assert!(!is_input_complete("int x = 1"));
    }

    #[test]
    fn unbalanced_braces_are_incomplete() {
        assert!(!is_input_complete("if (x > 0) {"));
        assert!(is_input_complete("if (x > 0) { print(x); }"));
    }

    #[test]
    fn semicolon_inside_string_does_not_count() {
        assert!(!is_input_complete("print(\";\""));
    }

    #[test]
    fn multiline_class_is_tracked_across_lines() {
        let mut buf = String::new();
        buf.push_str("class P {\n");
        assert!(!is_input_complete(&buf));
        buf.push_str("  int x = 1;\n");
        assert!(!is_input_complete(&buf));
        buf.push('}');
        assert!(is_input_complete(&buf));
    }
}
