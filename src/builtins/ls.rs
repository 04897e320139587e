use std::fs::Metadata;
use std::path::Path;

use crate::builtins::{Builtin, split_flags};
use crate::exec::{CommandContext, Outcome};

/// Lists a directory (default `.`), sorted by name.
///
/// `-a` includes hidden entries plus `.` and `..`, `-A` includes hidden
/// entries only, `-l` prints one entry per line with type, permission
/// bits and size.
pub struct Ls;

/// `dir`: same listing as [`Ls`].
pub struct Dir;

impl Builtin for Ls {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        list(ctx)
    }

    fn usage(&self) -> &'static str {
        "ls [-a] [-A] [-l] [path] List directory contents."
    }
}

impl Builtin for Dir {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        list(ctx)
    }

    fn usage(&self) -> &'static str {
        "dir [-a] [-A] [-l] [path] List directory contents."
    }
}

fn list(ctx: &CommandContext) -> Outcome {
    let (flags, operands) = match split_flags(ctx, "aAl") {
        Ok(split) => split,
        Err(err) => return err,
    };
    let show_hidden = flags.contains(&'a') || flags.contains(&'A');
    let show_dots = flags.contains(&'a') && !flags.contains(&'A');
    let long = flags.contains(&'l');

    let dir = match operands {
        [] => Path::new("."),
        [path] => Path::new(path),
        _ => return Outcome::failure(format!("{}: too many arguments\n", ctx.name)),
    };
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            return Outcome::failure(format!(
                "{}: cannot open directory '{}': {e}\n",
                ctx.name,
                dir.display()
            ));
        }
    };

    let mut out = Outcome::default();
    let mut names = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => names.push(entry.file_name().to_string_lossy().into_owned()),
            Err(e) => {
                out.stderr.push_str(&format!("{}: {e}\n", ctx.name));
                out.status = 1;
            }
        }
    }
    if !show_hidden {
        names.retain(|n| !n.starts_with('.'));
    }
    if show_dots {
        names.push(".".into());
        names.push("..".into());
    }
    names.sort();

    if !long {
        if !names.is_empty() {
            out.stdout = names.join("  ");
            out.stdout.push('\n');
        }
        return out;
    }

    for name in &names {
        match std::fs::metadata(dir.join(name)) {
            Ok(meta) => {
                out.stdout
                    .push_str(&format!("{} {} {name}\n", mode_string(&meta), meta.len()));
            }
            Err(e) => {
                out.stderr
                    .push_str(&format!("{}: cannot access {name}: {e}\n", ctx.name));
                out.status = 1;
            }
        }
    }
    out
}

/// `drwxr-xr-x` style summary.
fn mode_string(meta: &Metadata) -> String {
    let bits = permission_bits(meta);
    let mut s = String::with_capacity(10);
    s.push(if meta.is_dir() { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        for (mask, c) in [(4, 'r'), (2, 'w'), (1, 'x')] {
            s.push(if (bits >> shift) & mask != 0 { c } else { '-' });
        }
    }
    s
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o644 }
}
