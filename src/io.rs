// ABOUTME: IO adapter trait — the print/input boundary between evaluator and host

use std::io::{self, BufRead, Write};

/// The external collaborator the evaluator calls out to for `print`
/// and `input`. Kept deliberately narrow — SPEC_FULL.md §1 scopes the
/// command-line driver and console formatting as the host's concern,
/// not the evaluator's.
pub trait IoAdapter {
    fn write_line(&mut self, text: &str);
    fn read_line(&mut self, prompt: &str) -> String;
}

/// The production adapter: writes to stdout, prompts and reads from
/// stdin without a trailing newline on the returned text.
#[derive(Default)]
pub struct StdIo;

impl IoAdapter for StdIo {
    fn write_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_line(&mut self, prompt: &str) -> String {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).unwrap_or(0);
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        line
    }
}

/// A buffer-backed adapter for tests: captures everything `print`
/// writes, and serves canned answers to `input` in order.
#[derive(Default)]
pub struct BufferIo {
    pub output: String,
    pub inputs: Vec<String>,
    next_input: usize,
}

impl BufferIo {
    pub fn with_inputs(inputs: Vec<&str>) -> Self {
        BufferIo {
            output: String::new(),
            inputs: inputs.into_iter().map(String::from).collect(),
            next_input: 0,
        }
    }
}

impl IoAdapter for BufferIo {
    fn write_line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn read_line(&mut self, _prompt: &str) -> String {
        let value = self.inputs.get(self.next_input).cloned().unwrap_or_default();
        self.next_input += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_io_captures_printed_lines() {
        let mut io = BufferIo::default();
        io.write_line("hello");
        io.write_line("world");
        assert_eq!(io.output, "hello\nworld\n");
    }

    #[test]
    fn buffer_io_serves_inputs_in_order() {
        let mut io = BufferIo::with_inputs(vec!["1", "2"]);
        assert_eq!(io.read_line("> "), "1");
        assert_eq!(io.read_line("> "), "2");
        assert_eq!(io.read_line("> "), "");
    }
}
