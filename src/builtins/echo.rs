use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Prints its arguments joined by single spaces. A leading `-n` suppresses
/// the trailing newline.
pub struct Echo;

impl Builtin for Echo {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let (newline, words) = match ctx.arg(0) {
            Some("-n") => (false, &ctx.args[1..]),
            _ => (true, ctx.args),
        };
        let mut out = words.join(" ");
        if newline {
            out.push('\n');
        }
        Outcome::success(out)
    }

    fn usage(&self) -> &'static str {
        "echo [-n] [text...]    Print text."
    }
}
