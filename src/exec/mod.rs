pub mod context;
pub mod outcome;

pub use context::CommandContext;
pub use outcome::Outcome;

use std::collections::HashMap;

use crate::builtins::{self, Builtin, help::Help};
use crate::config::Config;
use crate::parse::{Ast, Operator};

/// Registry of enabled builtins, keyed by command name, plus the tree walker.
pub struct Executor {
    builtins: HashMap<String, Box<dyn Builtin>>,
}

impl Executor {
    /// Build the registry from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut registry: HashMap<String, Box<dyn Builtin>> = HashMap::new();
        let mut help_enabled = false;

        for name in &config.builtins.enabled {
            if name == "help" {
                help_enabled = true;
                continue;
            }
            match builtins::by_name(name) {
                Some(builtin) => {
                    registry.insert(name.clone(), builtin);
                }
                None => log::warn!("ignoring unknown builtin in config: {name}"),
            }
        }

        // help lists whatever else ended up enabled
        if help_enabled {
            let usages = registry.values().map(|b| b.usage()).collect();
            registry.insert("help".into(), Box::new(Help::new(usages)));
        }

        Self { builtins: registry }
    }

    /// Names of the enabled builtins, sorted.
    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a builtin by exact command name.
    fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.builtins.get(name).map(|b| b.as_ref())
    }

    /// Run a whole tree.
    pub fn execute(&self, ast: &Ast) -> Outcome {
        match ast {
            Ast::Command { name, args } => self.run_command(name, args),
            Ast::Operator { op, left, right } => self.run_operator(*op, left, right),
        }
    }

    fn run_command(&self, name: &str, args: &[String]) -> Outcome {
        let Some(builtin) = self.get(name) else {
            log::debug!("unknown command: {name}");
            return Outcome::failure(format!("unknown command: {name}\n"));
        };
        let ctx = CommandContext::new(name, args);
        let outcome = builtin.run(&ctx);
        log::debug!("{name} exited with status {}", outcome.status);
        outcome
    }

    fn run_operator(&self, op: Operator, left: &Ast, right: &Ast) -> Outcome {
        match op {
            Operator::Semi => self.execute(left).then(self.execute(right)),
            Operator::And => {
                let first = self.execute(left);
                if first.is_success() {
                    first.then(self.execute(right))
                } else {
                    first
                }
            }
            Operator::Or => {
                let first = self.execute(left);
                if first.is_success() {
                    first
                } else {
                    first.then(self.execute(right))
                }
            }
            // Process wiring, redirection and job control are not performed.
            Operator::Pipe
            | Operator::RedirOut
            | Operator::Append
            | Operator::RedirIn
            | Operator::Background => {
                log::info!("refusing unsupported operator '{op}'");
                Outcome::failure(format!("{op}: {} is not supported\n", op.describe()))
            }
        }
    }
}
