use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Lists the enabled builtins. Built by the executor once the rest of the
/// registry is known.
pub struct Help {
    lines: Vec<&'static str>,
}

impl Help {
    pub fn new(mut lines: Vec<&'static str>) -> Self {
        lines.push(HELP_USAGE);
        lines.sort_unstable();
        Self { lines }
    }
}

const HELP_USAGE: &str = "help                   Show help.";

impl Builtin for Help {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        if let Some(err) = ctx.reject_args() {
            return err;
        }
        let mut out = String::from("Available commands:\n");
        for line in &self.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("Operators: ; & || && | > >> <\n");
        Outcome::success(out)
    }

    fn usage(&self) -> &'static str {
        HELP_USAGE
    }
}
