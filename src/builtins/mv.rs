use std::path::{Path, PathBuf};

use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Renames `src` to `dst`; an existing directory `dst` receives `src`
/// under its own file name.
pub struct Mv;

impl Builtin for Mv {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let [src, dst] = ctx.args else {
            return Outcome::failure(
                "mv: requires exactly two arguments: source and destination\n",
            );
        };
        let target = destination(Path::new(src), Path::new(dst));
        match std::fs::rename(src, &target) {
            Ok(()) => Outcome::default(),
            Err(e) => Outcome::failure(format!(
                "mv: failed to move '{src}' to '{}': {e}\n",
                target.display()
            )),
        }
    }

    fn usage(&self) -> &'static str {
        "mv <src> <dst>         Move or rename."
    }
}

fn destination(src: &Path, dst: &Path) -> PathBuf {
    match src.file_name() {
        Some(name) if dst.is_dir() => dst.join(name),
        _ => dst.to_path_buf(),
    }
}
