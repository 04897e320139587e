use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

pub struct Pwd;

impl Builtin for Pwd {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        if let Some(err) = ctx.reject_args() {
            return err;
        }
        match std::env::current_dir() {
            Ok(dir) => Outcome::success(format!("{}\n", dir.display())),
            Err(e) => Outcome::failure(format!("pwd: failed to get current directory: {e}\n")),
        }
    }

    fn usage(&self) -> &'static str {
        "pwd                    Print working directory."
    }
}
