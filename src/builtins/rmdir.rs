use std::io;
use std::path::Path;

use crate::builtins::{Builtin, split_flags};
use crate::exec::{CommandContext, Outcome};

/// Removes one empty directory. With `-p`, each parent component named in
/// the path is removed afterwards, stopping at the first failure.
pub struct Rmdir;

impl Builtin for Rmdir {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let (flags, operands) = match split_flags(ctx, "p") {
            Ok(split) => split,
            Err(err) => return err,
        };
        let path = match operands {
            [] => return Outcome::failure("rmdir: missing operand\n"),
            [path] => path.trim_end_matches('/'),
            _ => return Outcome::failure("rmdir: too many arguments\n"),
        };
        if path.is_empty() {
            return Outcome::failure("rmdir: refusing to remove '/'\n");
        }

        let mut out = Outcome::default();
        let mut current = Some(Path::new(path));
        while let Some(dir) = current {
            if let Err(e) = std::fs::remove_dir(dir) {
                out.stderr.push_str(&format!(
                    "rmdir: failed to remove '{}': {}\n",
                    dir.display(),
                    describe(&e)
                ));
                out.status = 1;
                break;
            }
            out.stdout
                .push_str(&format!("Removed directory: {}\n", dir.display()));
            if !flags.contains(&'p') {
                break;
            }
            current = dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty() && p.parent().is_some());
        }
        out
    }

    fn usage(&self) -> &'static str {
        "rmdir [-p] <dir>       Remove empty directories."
    }
}

fn describe(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::DirectoryNotEmpty => "directory not empty".into(),
        io::ErrorKind::NotFound => "no such file or directory".into(),
        io::ErrorKind::NotADirectory => "not a directory".into(),
        io::ErrorKind::PermissionDenied => "permission denied".into(),
        _ => e.to_string(),
    }
}
