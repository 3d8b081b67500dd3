use super::EnvError;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::env;

/// Session view of the environment. Every `set` is mirrored into the
/// process environment so spawned tools (`ping`, `ps`) see it too.
#[derive(Clone, Debug)]
pub struct EnvVarManager {
    vars: BTreeMap<Box<str>, Box<str>>,
}

impl Default for EnvVarManager {
    fn default() -> Self {
        Self::from_process()
    }
}

impl EnvVarManager {
    /// Snapshot of the current process environment.
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned().into_boxed_str(),
                    value.to_string_lossy().into_owned().into_boxed_str(),
                )
            })
            .collect();

        Self { vars }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidValue("NUL byte in value"));
        }

        self.vars.insert(name.into(), value.into());
        env::set_var(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&str, EnvError> {
        self.vars
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(move || EnvError::VarNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Replaces `$HOME` and `$PATH` references, leaving everything else alone.
    pub fn expand_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if !value.contains('$') {
            return Cow::Borrowed(value);
        }

        let mut result = value.to_string();
        for name in ["HOME", "PATH"] {
            let token = format!("${}", name);
            if let Ok(current) = self.get(name) {
                result = result.replace(&token, current);
            }
        }
        Cow::Owned(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() -> Result<(), EnvError> {
        let mut manager = EnvVarManager::from_process();
        manager.set("WINUX_TEST_SET_AND_GET", "test value")?;
        assert_eq!(manager.get("WINUX_TEST_SET_AND_GET")?, "test value");
        assert_eq!(
            env::var("WINUX_TEST_SET_AND_GET").as_deref(),
            Ok("test value")
        );
        Ok(())
    }

    #[test]
    fn test_snapshot_sees_process_vars() {
        env::set_var("WINUX_TEST_SNAPSHOT", "1");
        let manager = EnvVarManager::from_process();
        assert_eq!(manager.get("WINUX_TEST_SNAPSHOT"), Ok("1"));
    }

    #[test]
    fn test_expand_value() -> Result<(), EnvError> {
        let mut manager = EnvVarManager::from_process();
        manager.vars.insert("HOME".into(), "/home/test".into());
        manager.vars.insert("PATH".into(), "/usr/bin".into());
        assert_eq!(manager.expand_value("$HOME/bin:$PATH"), "/home/test/bin:/usr/bin");
        assert_eq!(manager.expand_value("plain"), "plain");
        Ok(())
    }

    #[test]
    fn test_invalid_var_name() {
        let mut manager = EnvVarManager::from_process();
        assert!(manager.set("", "value").is_err());
        assert!(manager.set("A\0B", "value").is_err());
        assert!(manager.set("OK_NAME", "bad\0value").is_err());
    }

    #[test]
    fn test_missing_var() {
        let manager = EnvVarManager::from_process();
        assert_eq!(
            manager.get("WINUX_DEFINITELY_UNSET_VAR"),
            Err(EnvError::VarNotFound("WINUX_DEFINITELY_UNSET_VAR".to_string()))
        );
    }
}
