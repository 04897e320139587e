use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Prints each file in order. Unreadable files are reported and skipped;
/// the status is 1 if any file failed.
pub struct Cat;

impl Builtin for Cat {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        if ctx.args.is_empty() {
            return Outcome::failure("cat: missing file operand\n");
        }
        let mut out = Outcome::default();
        for file in ctx.args {
            match std::fs::read(file) {
                Ok(bytes) => out.stdout.push_str(&String::from_utf8_lossy(&bytes)),
                Err(e) => {
                    out.stderr.push_str(&format!("cat: cannot open {file}: {e}\n"));
                    out.status = 1;
                }
            }
        }
        out
    }

    fn usage(&self) -> &'static str {
        "cat <file...>          Print file contents."
    }
}
