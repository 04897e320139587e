//! Built-in commands run in-process by the executor.
//!
//! Each builtin implements [`Builtin`]. The executor builds a registry of
//! the builtins enabled in configuration and dispatches command leaves to
//! them by name.

/// `cat <file...>`: print file contents.
pub mod cat;
/// `cd [dir]`: change the working directory.
pub mod cd;
/// `chmod <mode> <file>`: change permission bits.
pub mod chmod;
/// `clr`: clear the screen.
pub mod clr;
/// `echo [text...]`: print arguments.
pub mod echo;
/// `environ`: print the process environment.
pub mod environ;
/// `help`: list enabled builtins.
pub mod help;
/// `ls`/`dir`: list a directory.
pub mod ls;
/// `mkdir [-p] <dir...>`: create directories.
pub mod mkdir;
/// `mv <src> <dst>`: move or rename.
pub mod mv;
/// `pause`: wait for Enter.
pub mod pause;
/// `pwd`: print the working directory.
pub mod pwd;
/// `rm [-r] [-f] <path...>`: remove files or trees.
pub mod rm;
/// `rmdir [-p] <dir>`: remove empty directories.
pub mod rmdir;
/// `wc [-l] [-w] [-c] <file...>`: count lines, words, bytes.
pub mod wc;

use crate::exec::{CommandContext, Outcome};

/// Trait for in-process commands.
pub trait Builtin: Send + Sync {
    /// Run the command and collect its output.
    fn run(&self, ctx: &CommandContext) -> Outcome;

    /// One-line usage shown by `help`.
    fn usage(&self) -> &'static str;
}

/// Construct a builtin by name. `help` is not listed here: it needs the
/// final set of enabled builtins and is built by the executor.
pub fn by_name(name: &str) -> Option<Box<dyn Builtin>> {
    match name {
        "cat" => Some(Box::new(cat::Cat)),
        "cd" => Some(Box::new(cd::Cd)),
        "chmod" => Some(Box::new(chmod::Chmod)),
        "clr" => Some(Box::new(clr::Clr)),
        "dir" => Some(Box::new(ls::Dir)),
        "echo" => Some(Box::new(echo::Echo)),
        "environ" => Some(Box::new(environ::Environ)),
        "ls" => Some(Box::new(ls::Ls)),
        "mkdir" => Some(Box::new(mkdir::Mkdir)),
        "mv" => Some(Box::new(mv::Mv)),
        "pause" => Some(Box::new(pause::Pause)),
        "pwd" => Some(Box::new(pwd::Pwd)),
        "rm" => Some(Box::new(rm::Rm)),
        "rmdir" => Some(Box::new(rmdir::Rmdir)),
        "wc" => Some(Box::new(wc::Wc)),
        _ => None,
    }
}

/// Split leading `-xyz` arguments into single-letter flags checked against
/// `allowed`. Returns the flags and the remaining operands.
pub(crate) fn split_flags<'a>(
    ctx: &CommandContext<'a>,
    allowed: &str,
) -> Result<(Vec<char>, &'a [String]), Outcome> {
    let mut flags = Vec::new();
    let mut rest = ctx.args;
    while let Some((first, tail)) = rest.split_first() {
        let Some(letters) = first.strip_prefix('-') else {
            break;
        };
        if letters.is_empty() {
            break;
        }
        for c in letters.chars() {
            if !allowed.contains(c) {
                return Err(Outcome::failure(format!(
                    "{}: invalid option -- '{c}'\n",
                    ctx.name
                )));
            }
            flags.push(c);
        }
        rest = tail;
    }
    Ok((flags, rest))
}
