use crate::builtins::Builtin;
use crate::exec::{CommandContext, Outcome};

/// Sets permission bits from an octal mode such as `644` or `0755`.
pub struct Chmod;

impl Builtin for Chmod {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let [mode, file] = ctx.args else {
            return Outcome::failure(
                "chmod: requires exactly two arguments: permissions and file\n",
            );
        };
        let Some(mode) = parse_mode(mode) else {
            return Outcome::failure(format!("chmod: invalid mode: '{mode}'\n"));
        };
        match set_mode(file, mode) {
            Ok(()) => Outcome::default(),
            Err(e) => Outcome::failure(format!(
                "chmod: failed to change permissions for '{file}': {e}\n"
            )),
        }
    }

    fn usage(&self) -> &'static str {
        "chmod <mode> <file>    Change permissions."
    }
}

/// Octal digits only, at most `7777`.
fn parse_mode(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| ('0'..='7').contains(&c)) {
        return None;
    }
    u32::from_str_radix(text, 8).ok().filter(|m| *m <= 0o7777)
}

#[cfg(unix)]
fn set_mode(file: &str, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(file, std::fs::Permissions::from_mode(mode))
}

/// Only the owner write bit maps onto a read-only flag here.
#[cfg(not(unix))]
fn set_mode(file: &str, mode: u32) -> std::io::Result<()> {
    let mut perms = std::fs::metadata(file)?.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    std::fs::set_permissions(file, perms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::testing::{args, path_arg, scratch_dir};

    fn chmod(list: &[String]) -> Outcome {
        Chmod.run(&CommandContext::new("chmod", list))
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(parse_mode("644"), Some(0o644));
        assert_eq!(parse_mode("0755"), Some(0o755));
        assert_eq!(parse_mode("789"), None);
        assert_eq!(parse_mode("u+x"), None);
        assert_eq!(parse_mode(""), None);
        assert_eq!(parse_mode("17777"), None);
    }

    #[cfg(unix)]
    #[test]
    fn sets_bits() {
        use std::os::unix::fs::PermissionsExt;
        let dir = scratch_dir("chmod");
        let file = dir.join("f");
        std::fs::write(&file, "x").unwrap();
        assert!(chmod(&["600".into(), path_arg(&file)]).is_success());
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn invalid_mode() {
        let out = chmod(&args(&["rwx", "f"]));
        assert_eq!(out.status, 1);
        assert_eq!(out.stderr, "chmod: invalid mode: 'rwx'\n");
    }

    #[test]
    fn wrong_argument_count() {
        let out = chmod(&args(&["644"]));
        assert_eq!(
            out.stderr,
            "chmod: requires exactly two arguments: permissions and file\n"
        );
    }

    #[test]
    fn missing_file() {
        let out = chmod(&args(&["644", "/definitely/not/here/opsh"]));
        assert_eq!(out.status, 1);
        assert!(out.stderr.starts_with("chmod: failed to change permissions for '/definitely"));
    }
}
