use std::collections::HashMap;

/// Source of environment-backed defaults.
///
/// Production code reads the process environment; tests use a fixed map so they
/// never race on `std::env`.
#[derive(Debug, Clone, Default)]
pub enum Environment {
    /// Reads `std::env` on every lookup.
    #[default]
    Process,
    /// A fixed set of variables.
    Fixed(HashMap<String, String>),
}

impl Environment {
    /// The real process environment.
    pub fn process() -> Self {
        Self::Process
    }

    /// A fixed environment built from key/value pairs.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// An environment with no variables set.
    pub fn empty() -> Self {
        Self::Fixed(HashMap::new())
    }

    /// Looks up a variable.
    pub fn var(&self, key: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        }
    }

    /// Looks up a boolean flag. `1`, `true`, `yes` and `on` are true, anything else is false.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.var(key).map(|v| parse_flag(&v))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
