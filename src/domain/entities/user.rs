use std::fmt;

/// Author of a chat line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    /// Lowercase login name, stable across renames of the display name
    pub login: String,
    pub display_name: Option<String>,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prefers_display_name() {
        let user = User::new("somebody");
        assert_eq!(user.name(), "somebody");

        let user = user.with_display_name("SomeBody");
        assert_eq!(user.name(), "SomeBody");
        assert_eq!(user.to_string(), "SomeBody");
    }
}
