use std::{collections::HashMap, env, fs, path::PathBuf, time::Duration};

use clap::ValueEnum;
use directories::BaseDirs;

use crate::{
    error::{Error, Result},
    execution::FailurePolicy,
    extract::{ExtractMode, LOGIN_MARKER},
    locator::DEFAULT_EXTENSION,
    process::DEFAULT_INTERPRETER,
};

const KEYS: &[&str] = &[
    "NBCHECK_INTERPRETER",
    "NBCHECK_EXTENSION",
    "NBCHECK_EXTRACT_MODE",
    "NBCHECK_POLICY",
    "NBCHECK_TIMEOUT",
    "NBCHECK_SKIP_SUBSTRINGS",
    "NBCHECK_KEEP_SCRIPTS",
];

/// Settings from built-in defaults, overlaid by `.nbcheckrc`, overlaid by the
/// environment. Command-line flags win over all of these.
#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Self {
        let rc = fs::read_to_string(default_config_path()).unwrap_or_default();
        Self::from_parts(&rc, env::vars())
    }

    /// Defaults plus the `KEY=VALUE` lines of `rc`.
    pub fn from_rc(rc: &str) -> Self {
        Self::from_parts(rc, std::iter::empty())
    }

    /// Defaults, then `rc`, then the recognised keys of `env`.
    pub fn from_parts<I>(rc: &str, env: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = default_map();
        map.extend(parse_rc(rc));
        map.extend(env.into_iter().filter(|(k, _)| is_config_key(k)));
        Self { inner: map }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    pub fn interpreter(&self) -> String {
        self.get("NBCHECK_INTERPRETER")
            .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string())
    }

    pub fn extension(&self) -> String {
        self.get("NBCHECK_EXTENSION")
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }

    pub fn extract_mode(&self) -> Result<ExtractMode> {
        match self.get("NBCHECK_EXTRACT_MODE") {
            Some(v) => ExtractMode::from_str(v.trim(), true)
                .map_err(|_| Error::Config(format!("unknown NBCHECK_EXTRACT_MODE: {}", v))),
            None => Ok(ExtractMode::default()),
        }
    }

    pub fn policy(&self) -> Result<FailurePolicy> {
        match self.get("NBCHECK_POLICY") {
            Some(v) => FailurePolicy::from_str(v.trim(), true)
                .map_err(|_| Error::Config(format!("unknown NBCHECK_POLICY: {}", v))),
            None => Ok(FailurePolicy::default()),
        }
    }

    /// `None` when unset, empty or zero.
    pub fn timeout(&self) -> Result<Option<Duration>> {
        let Some(v) = self.get("NBCHECK_TIMEOUT") else {
            return Ok(None);
        };
        let v = v.trim();
        if v.is_empty() {
            return Ok(None);
        }
        let secs = v
            .parse::<u64>()
            .map_err(|_| Error::Config(format!("NBCHECK_TIMEOUT is not a number of seconds: {}", v)))?;
        Ok((secs > 0).then(|| Duration::from_secs(secs)))
    }

    pub fn skip_substrings(&self) -> Vec<String> {
        self.get("NBCHECK_SKIP_SUBSTRINGS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn keep_scripts(&self) -> bool {
        self.get_bool("NBCHECK_KEEP_SCRIPTS")
    }
}

pub fn is_config_key(k: &str) -> bool {
    KEYS.contains(&k)
}

fn parse_rc(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| is_config_key(k))
        .collect()
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("nbcheck").join(".nbcheckrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("NBCHECK_INTERPRETER".into(), DEFAULT_INTERPRETER.into());
    m.insert("NBCHECK_EXTENSION".into(), DEFAULT_EXTENSION.into());
    m.insert("NBCHECK_EXTRACT_MODE".into(), "cells".into());
    m.insert("NBCHECK_POLICY".into(), "fail-fast".into());
    m.insert("NBCHECK_SKIP_SUBSTRINGS".into(), LOGIN_MARKER.into());
    m.insert("NBCHECK_KEEP_SCRIPTS".into(), "false".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_rc("");
        assert_eq!(cfg.interpreter(), "python");
        assert_eq!(cfg.extension(), "ipynb");
        assert_eq!(cfg.extract_mode().unwrap(), ExtractMode::Cells);
        assert_eq!(cfg.policy().unwrap(), FailurePolicy::FailFast);
        assert_eq!(cfg.timeout().unwrap(), None);
        assert_eq!(cfg.skip_substrings(), vec!["login"]);
        assert!(!cfg.keep_scripts());
    }

    #[test]
    fn test_rc_overrides_defaults() {
        let cfg = Config::from_rc(
            "# local settings\n\
             NBCHECK_INTERPRETER = python3\n\
             NBCHECK_EXTRACT_MODE=lines\n\
             NBCHECK_POLICY=collect-all\n\
             NBCHECK_TIMEOUT=30\n\
             NBCHECK_SKIP_SUBSTRINGS=login, getpass ,\n\
             NBCHECK_KEEP_SCRIPTS=true\n\
             UNRELATED=1\n",
        );
        assert_eq!(cfg.interpreter(), "python3");
        assert_eq!(cfg.extract_mode().unwrap(), ExtractMode::Lines);
        assert_eq!(cfg.policy().unwrap(), FailurePolicy::CollectAll);
        assert_eq!(cfg.timeout().unwrap(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.skip_substrings(), vec!["login", "getpass"]);
        assert!(cfg.keep_scripts());
        assert_eq!(cfg.get("UNRELATED"), None);
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let cfg = Config::from_rc("NBCHECK_POLICY=maybe\nNBCHECK_TIMEOUT=soon\nNBCHECK_EXTRACT_MODE=ast");
        assert!(matches!(cfg.policy(), Err(Error::Config(_))));
        assert!(matches!(cfg.timeout(), Err(Error::Config(_))));
        assert!(matches!(cfg.extract_mode(), Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides_rc() {
        let cfg = Config::from_parts(
            "NBCHECK_POLICY=collect-all\nNBCHECK_INTERPRETER=python3\n",
            [
                ("NBCHECK_POLICY".to_string(), "fail-fast".to_string()),
                ("HOME".to_string(), "/root".to_string()),
            ],
        );
        assert_eq!(cfg.policy().unwrap(), FailurePolicy::FailFast);
        assert_eq!(cfg.interpreter(), "python3");
        assert_eq!(cfg.get("HOME"), None);
    }

    #[test]
    fn test_zero_timeout_disables() {
        assert_eq!(Config::from_rc("NBCHECK_TIMEOUT=0").timeout().unwrap(), None);
    }
}
