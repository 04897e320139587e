//! Line front end: tokenize, parse, show, execute.

use std::io::{self, Write};

use crate::config::{AstFormat, Config, Settings};
use crate::exec::Executor;
use crate::logging;
use crate::parse::{self, Ast, Token};

/// Exit status reported for a line that does not parse.
pub const SYNTAX_ERROR_STATUS: i32 = 2;

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Blank line, nothing done.
    Empty,
    /// An exit word was entered; the session should end.
    Exit,
    /// The line was processed with this status.
    Done(i32),
}

/// A shell session: settings plus the builtin registry.
pub struct Shell {
    settings: Settings,
    executor: Executor,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        let executor = Executor::from_config(&config);
        Self {
            settings: config.settings,
            executor,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one line, writing results to `out` and diagnostics to `err`.
    pub fn process_line(
        &self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Step> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Step::Empty);
        }
        if self.settings.exit_words.iter().any(|w| w == trimmed) {
            log::info!("exit requested");
            return Ok(Step::Exit);
        }

        let tokens = parse::tokenize(line);
        if self.settings.show_tokens {
            write_tokens(out, &tokens, self.settings.ast_format)?;
        }

        let ast = match parse::parse(&tokens) {
            Ok(ast) => ast,
            Err(e) => {
                // Already reported on `err`; keep it out of the terminal logger.
                log::info!("syntax error: {e}: {}", logging::line_summary(line, SYNTAX_ERROR_STATUS));
                writeln!(err, "syntax error: {e}")?;
                return Ok(Step::Done(SYNTAX_ERROR_STATUS));
            }
        };

        if self.settings.show_ast {
            write_ast(out, &ast, self.settings.ast_format)?;
        }

        let status = if self.settings.execute {
            let outcome = self.executor.execute(&ast);
            out.write_all(outcome.stdout.as_bytes())?;
            err.write_all(outcome.stderr.as_bytes())?;
            outcome.status
        } else {
            0
        };

        log::info!("{}", logging::line_summary(line, status));
        Ok(Step::Done(status))
    }
}

fn write_tokens(out: &mut dyn Write, tokens: &[Token], format: AstFormat) -> io::Result<()> {
    if format == AstFormat::Json {
        let json = serde_json::to_string(tokens).map_err(io::Error::other)?;
        return writeln!(out, "{json}");
    }
    writeln!(out, "Tokens:")?;
    for token in tokens {
        writeln!(out, "  [{}] {:?}", token.text, token.kind)?;
    }
    Ok(())
}

fn write_ast(out: &mut dyn Write, ast: &Ast, format: AstFormat) -> io::Result<()> {
    match format {
        AstFormat::Tree => {
            writeln!(out, "AST:")?;
            for line in ast.render() {
                writeln!(out, "  {line}")?;
            }
        }
        AstFormat::Line => writeln!(out, "AST: {ast}")?,
        AstFormat::Json => {
            let json = serde_json::to_string_pretty(ast).map_err(io::Error::other)?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_with(edit: impl FnOnce(&mut Settings)) -> Shell {
        let mut config = Config::default_config();
        edit(&mut config.settings);
        Shell::new(config)
    }

    fn run(shell: &Shell, line: &str) -> (Step, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let step = shell.process_line(line, &mut out, &mut err).unwrap();
        (
            step,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn blank_line_is_empty() {
        let shell = shell_with(|_| {});
        assert_eq!(run(&shell, "   ").0, Step::Empty);
    }

    #[test]
    fn exit_words() {
        let shell = shell_with(|_| {});
        assert_eq!(run(&shell, "-1").0, Step::Exit);
        assert_eq!(run(&shell, "  quit ").0, Step::Exit);
        // Only the whole line counts
        assert_ne!(run(&shell, "echo quit").0, Step::Exit);
    }

    #[test]
    fn default_prints_tree_and_runs() {
        let shell = shell_with(|_| {});
        let (step, out, err) = run(&shell, "echo a && echo b");
        assert_eq!(step, Step::Done(0));
        assert_eq!(
            out,
            "AST:\n  Operator: '&&'\n    Command: echo [a]\n    Command: echo [b]\na\nb\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn shows_tokens() {
        let shell = shell_with(|s| {
            s.show_tokens = true;
            s.show_ast = false;
            s.execute = false;
        });
        let (_, out, _) = run(&shell, "ls 'a b'|wc");
        assert_eq!(
            out,
            "Tokens:\n  [ls] Word\n  [a b] Quoted\n  [|] Pipe\n  [wc] Word\n"
        );
    }

    #[test]
    fn line_format() {
        let shell = shell_with(|s| {
            s.ast_format = AstFormat::Line;
            s.execute = false;
        });
        let (step, out, _) = run(&shell, "a | b && c");
        assert_eq!(step, Step::Done(0));
        assert_eq!(out, "AST: (a | b) && c\n");
    }

    #[test]
    fn json_format() {
        let shell = shell_with(|s| {
            s.ast_format = AstFormat::Json;
            s.execute = false;
        });
        let (_, out, _) = run(&shell, "a ; b");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["op"], ";");
        assert_eq!(value["right"]["name"], "b");
    }

    #[test]
    fn json_tokens() {
        let shell = shell_with(|s| {
            s.show_tokens = true;
            s.show_ast = false;
            s.ast_format = AstFormat::Json;
            s.execute = false;
        });
        let (_, out, _) = run(&shell, "a && 'b'");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "Word");
        assert_eq!(value[1]["kind"], "And");
        assert_eq!(value[1]["text"], "&&");
        assert_eq!(value[2]["kind"], "Quoted");
    }

    #[test]
    fn syntax_error_reported() {
        let shell = shell_with(|_| {});
        let (step, out, err) = run(&shell, "| a");
        assert_eq!(step, Step::Done(SYNTAX_ERROR_STATUS));
        assert!(out.is_empty());
        assert_eq!(err, "syntax error: expected command, found operator '|'\n");
    }

    #[test]
    fn failing_command_status() {
        let shell = shell_with(|s| s.show_ast = false);
        let (step, out, err) = run(&shell, "nope");
        assert_eq!(step, Step::Done(1));
        assert!(out.is_empty());
        assert_eq!(err, "unknown command: nope\n");
    }
}
