use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Cursor home, then erase to end of screen.
const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";

pub struct Clr;

impl Builtin for Clr {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        if let Some(err) = ctx.reject_args() {
            return err;
        }
        Outcome::success(CLEAR_SCREEN)
    }

    fn usage(&self) -> &'static str {
        "clr                    Clear the screen."
    }
}
