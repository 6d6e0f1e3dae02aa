//! Parsed directive options.

/// Directive options in source order.
///
/// Values are `None` for flag options written without a value.
///
/// # Example
///
/// ```
/// use rstfmt_rst::Options;
///
/// let mut options = Options::new();
/// options.insert("width", Some("200".to_owned())).unwrap();
/// options.insert("hidden", None).unwrap();
///
/// assert_eq!(options.value("width"), Some("200"));
/// assert!(options.contains("hidden"));
/// assert!(options.insert("width", None).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(String, Option<String>)>,
}

impl Options {
    /// Create an empty option list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option.
    ///
    /// # Errors
    ///
    /// Returns the error message when the option is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) -> Result<(), String> {
        let name = name.into();
        if self.contains(&name) {
            return Err(format!("duplicate option \"{name}\""));
        }
        self.entries.push((name, value));
        Ok(())
    }

    /// Get an option entry by name.
    ///
    /// The outer `Option` reports presence, the inner one the value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref())
    }

    /// Get an option value by name; `None` for absent or flag options.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).flatten()
    }

    /// Whether the option is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Iterate over options in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
