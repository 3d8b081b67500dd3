use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        let mut add = |name: &'static str,
                       short: &'static str,
                       long: &'static str,
                       description: &'static str,
                       takes_value: bool| {
            flags.insert(
                name,
                Flag {
                    short,
                    long,
                    description,
                    takes_value,
                    value: None,
                },
            );
        };

        add("help", "-h", "--help", "Print this help message", false);
        add("version", "-v", "--version", "Show version information", false);
        add("config", "-c", "--config", "Read this rc file instead of ~/.winuxrc", true);
        add("quiet", "-q", "--quiet", "Suppress the banner and warnings", false);
        add("debug", "-d", "--debug", "Print dispatch diagnostics to stderr", false);
        add("execute", "-e", "--execute", "Run one command line and exit", true);

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("Unknown option {}", arg)))?;

            flag.value = if flag.takes_value {
                let value = args.next().ok_or_else(|| {
                    ShellError::FlagError(format!("Flag {} requires a value", arg))
                })?;
                Some(value.clone())
            } else {
                Some("true".to_string())
            };
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_deref())
    }

    pub fn print_help(&self) {
        println!("Usage: winux [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} <value>", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {}, {:<18} {}", flag.short, long, flag.description);
        }
    }
}
