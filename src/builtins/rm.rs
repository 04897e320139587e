use std::path::Path;

use crate::builtins::{Builtin, split_flags};
use crate::exec::{CommandContext, Outcome};

/// Removes files. `-r`/`-R` removes directory trees; `-f` ignores paths
/// that do not exist.
pub struct Rm;

impl Builtin for Rm {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let (flags, paths) = match split_flags(ctx, "rRf") {
            Ok(split) => split,
            Err(err) => return err,
        };
        if paths.is_empty() {
            return Outcome::failure("rm: missing operand\n");
        }
        let recursive = flags.contains(&'r') || flags.contains(&'R');
        let force = flags.contains(&'f');

        let mut out = Outcome::default();
        for path in paths {
            if let Err(msg) = remove(Path::new(path), recursive, force) {
                out.stderr.push_str(&format!("rm: cannot remove '{path}': {msg}\n"));
                out.status = 1;
            }
        }
        out
    }

    fn usage(&self) -> &'static str {
        "rm [-r] [-f] <path...> Remove files or directories."
    }
}

fn remove(path: &Path, recursive: bool, force: bool) -> Result<(), String> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if force && e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.to_string()),
    };
    let result = if !meta.is_dir() {
        std::fs::remove_file(path)
    } else if recursive {
        log::debug!("rm: removing tree {}", path.display());
        std::fs::remove_dir_all(path)
    } else {
        return Err("is a directory".into());
    };
    result.map_err(|e| e.to_string())
}
