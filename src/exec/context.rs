/// Context for running a single command leaf.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The command name as typed.
    pub name: &'a str,
    /// Arguments after the name.
    pub args: &'a [String],
}

impl<'a> CommandContext<'a> {
    pub fn new(name: &'a str, args: &'a [String]) -> Self {
        Self { name, args }
    }

    /// Positional argument `n`, if present.
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.args.get(n).map(String::as_str)
    }

    /// Standard failure for commands that take no arguments.
    pub fn reject_args(&self) -> Option<super::Outcome> {
        if self.args.is_empty() {
            None
        } else {
            Some(super::Outcome::failure(format!(
                "{}: this command takes no arguments\n",
                self.name
            )))
        }
    }
}
