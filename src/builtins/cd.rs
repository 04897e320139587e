use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Changes the process working directory. No argument means `~`;
/// a leading `~` in the argument is expanded.
pub struct Cd;

impl Builtin for Cd {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let target = match ctx.args {
            [] => "~",
            [dir] => dir.as_str(),
            _ => return Outcome::failure("cd: too many arguments\n"),
        };
        let path = shellexpand::tilde(target);
        match std::env::set_current_dir(&*path) {
            Ok(()) => {
                log::debug!("cd -> {path}");
                Outcome::default()
            }
            Err(e) => Outcome::failure(format!("cd: failed to change directory: {path}: {e}\n")),
        }
    }

    fn usage(&self) -> &'static str {
        "cd [dir]               Change directory."
    }
}
