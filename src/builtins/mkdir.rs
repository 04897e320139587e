use crate::builtins::{Builtin, split_flags};
use crate::exec::{CommandContext, Outcome};

/// Creates each directory. `-p` creates missing parents and accepts
/// directories that already exist.
pub struct Mkdir;

impl Builtin for Mkdir {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let (flags, dirs) = match split_flags(ctx, "p") {
            Ok(split) => split,
            Err(err) => return err,
        };
        if dirs.is_empty() {
            return Outcome::failure("mkdir: missing operand\n");
        }
        let parents = flags.contains(&'p');

        let mut out = Outcome::default();
        for dir in dirs {
            let result = if parents {
                std::fs::create_dir_all(dir)
            } else {
                std::fs::create_dir(dir)
            };
            if let Err(e) = result {
                out.stderr
                    .push_str(&format!("mkdir: cannot create directory '{dir}': {e}\n"));
                out.status = 1;
            }
        }
        out
    }

    fn usage(&self) -> &'static str {
        "mkdir [-p] <dir...>    Create directories."
    }
}
