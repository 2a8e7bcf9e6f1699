//! Access to the process environment.

/// A source of environment variables.
///
/// Implementations only need to look up the raw value. Tests substitute
/// [`FakeEnv`] to avoid mutating the process environment.
pub(crate) trait Environment {
    /// Look up the variable as an OS string.
    fn read_os(&self, key: &str) -> Option<std::ffi::OsString>;

    /// Look up the variable as a string.
    fn read(&self, key: &str) -> Result<String, std::env::VarError> {
        match self.read_os(key) {
            Some(value) => value.into_string().map_err(std::env::VarError::NotUnicode),
            None => Err(std::env::VarError::NotPresent),
        }
    }
}

/// The process environment.
#[derive(Debug, Default)]
pub(crate) struct Env;

impl Environment for Env {
    fn read_os(&self, key: &str) -> Option<std::ffi::OsString> {
        std::env::var_os(key)
    }
}

#[cfg(test)]
mod test {
    use super::Environment;
    use std::collections::HashMap;

    /// An environment backed by a hash map.
    #[derive(Debug, Default)]
    pub(crate) struct FakeEnv {
        bindings: HashMap<String, String>,
    }

    impl FakeEnv {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn set(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> &mut Self {
            self.bindings
                .insert(key.as_ref().to_string(), value.as_ref().to_string());
            self
        }
    }

    impl Environment for FakeEnv {
        fn read_os(&self, key: &str) -> Option<std::ffi::OsString> {
            self.bindings.get(key).map(|v| v.into())
        }
    }

    #[test]
    fn test_fake_env() {
        let mut env = FakeEnv::new();
        env.set("OKGAMUT_LOG", "detailed");
        assert_eq!(env.read("OKGAMUT_LOG"), Ok("detailed".to_string()));
        assert_eq!(env.read("OKGAMUT_NOPE"), Err(std::env::VarError::NotPresent));
    }
}

#[cfg(test)]
pub(crate) use test::FakeEnv;
