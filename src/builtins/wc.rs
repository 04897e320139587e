use crate::builtins::{Builtin, split_flags};
use crate::exec::{CommandContext, Outcome};

/// Counts lines, words and bytes per file. With no flags all three are
/// printed; otherwise only the ones selected, always in that order.
pub struct Wc;

#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    lines: usize,
    words: usize,
    bytes: usize,
}

impl Counts {
    fn of(data: &[u8]) -> Self {
        let mut counts = Counts {
            bytes: data.len(),
            ..Counts::default()
        };
        let mut in_word = false;
        for &b in data {
            if b == b'\n' {
                counts.lines += 1;
            }
            if b.is_ascii_whitespace() {
                in_word = false;
            } else if !in_word {
                counts.words += 1;
                in_word = true;
            }
        }
        counts
    }
}

impl Builtin for Wc {
    fn run(&self, ctx: &CommandContext) -> Outcome {
        let (mut flags, files) = match split_flags(ctx, "lwc") {
            Ok(split) => split,
            Err(err) => return err,
        };
        if files.is_empty() {
            return Outcome::failure("wc: missing file operand\n");
        }
        if flags.is_empty() {
            flags = vec!['l', 'w', 'c'];
        }

        let mut out = Outcome::default();
        for file in files {
            let data = match std::fs::read(file) {
                Ok(data) => data,
                Err(e) => {
                    out.stderr
                        .push_str(&format!("wc: cannot open file '{file}': {e}\n"));
                    out.status = 1;
                    continue;
                }
            };
            let counts = Counts::of(&data);
            let mut line = String::new();
            for (flag, n) in [('l', counts.lines), ('w', counts.words), ('c', counts.bytes)] {
                if flags.contains(&flag) {
                    line.push_str(&format!("{n} "));
                }
            }
            out.stdout.push_str(&format!("{line}{file}\n"));
        }
        out
    }

    fn usage(&self) -> &'static str {
        "wc [-l] [-w] [-c] <file...> Count lines, words, bytes."
    }
}
