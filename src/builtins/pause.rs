use std::io::BufRead;

use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Blocks until a line (or EOF) arrives on stdin.
pub struct Pause;

impl Builtin for Pause {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        if let Some(err) = ctx.reject_args() {
            return err;
        }
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) => Outcome::default(),
            Err(e) => Outcome::failure(format!("pause: {e}\n")),
        }
    }

    fn usage(&self) -> &'static str {
        "pause                  Wait for Enter."
    }
}
