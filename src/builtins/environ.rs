use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

pub struct Environ;

impl Builtin for Environ {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        if let Some(err) = ctx.reject_args() {
            return err;
        }
        let mut out = String::new();
        for (key, value) in std::env::vars_os() {
            out.push_str(&format!(
                "{}={}\n",
                key.to_string_lossy(),
                value.to_string_lossy()
            ));
        }
        Outcome::success(out)
    }

    fn usage(&self) -> &'static str {
        "environ                Display environment variables."
    }
}
