//! Directive shape: argument counts, content flag and option schema.
//!
//! The shape decides where a directive invocation ends and how its block is
//! split into arguments, options and content. It carries no behavior.

/// How an option value is validated and converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// No value allowed.
    Flag,
    /// Any text, missing value becomes an empty string.
    Unchanged,
    /// Any non-empty text.
    UnchangedRequired,
    /// Integer greater than zero.
    PositiveInt,
    /// Integer greater than or equal to zero.
    NonNegativeInt,
    /// One of the listed values (case-insensitive).
    Choice(&'static [&'static str]),
    /// Space-separated class names.
    Class,
    /// URI with whitespace removed.
    Uri,
}

impl OptionKind {
    /// Validate and convert a raw option value.
    ///
    /// Returns the detail message on failure.
    pub fn convert(self, value: Option<&str>) -> Result<Option<String>, String> {
        match self {
            Self::Flag => match value {
                Some(v) if !v.trim().is_empty() => {
                    Err(format!("no argument is permitted; \"{v}\" supplied"))
                }
                _ => Ok(None),
            },
            Self::Unchanged => Ok(Some(value.unwrap_or_default().to_owned())),
            Self::UnchangedRequired => required(value).map(|v| Some(v.to_owned())),
            Self::PositiveInt => {
                let n = parse_int(required(value)?)?;
                if n < 1 {
                    return Err("negative or zero value; must be positive".to_owned());
                }
                Ok(Some(n.to_string()))
            }
            Self::NonNegativeInt => {
                let n = parse_int(required(value)?)?;
                if n < 0 {
                    return Err("negative value; must be positive or zero".to_owned());
                }
                Ok(Some(n.to_string()))
            }
            Self::Choice(values) => {
                let v = required(value)?.trim().to_lowercase();
                if values.contains(&v.as_str()) {
                    Ok(Some(v))
                } else {
                    let choices = values
                        .iter()
                        .map(|c| format!("\"{c}\""))
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(format!("\"{v}\" unknown; choose from {choices}"))
                }
            }
            Self::Class => {
                let v = required(value)?;
                let classes: Vec<String> = v.split_whitespace().map(normalize_class).collect();
                if classes.iter().any(String::is_empty) {
                    return Err(format!("cannot make \"{v}\" into a class name"));
                }
                Ok(Some(classes.join(" ")))
            }
            Self::Uri => {
                let v: String = required(value)?.split_whitespace().collect();
                Ok(Some(v))
            }
        }
    }
}

fn required(value: Option<&str>) -> Result<&str, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err("argument required but none supplied".to_owned()),
    }
}

fn parse_int(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid literal for int(): \"{}\"", value.trim()))
}

/// Lowercase, map non-alphanumerics to hyphens, trim hyphens.
fn normalize_class(name: &str) -> String {
    let mapped: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    mapped.trim_matches('-').to_owned()
}

/// Option schema of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionSpec {
    /// The directive takes no options; option-like lines are plain text.
    #[default]
    None,
    /// Only the listed options are accepted.
    Declared(&'static [(&'static str, OptionKind)]),
    /// Any option name is accepted and its value is kept as written.
    Any,
}

impl OptionSpec {
    /// Whether option lines are parsed at all.
    #[must_use]
    pub fn accepts_options(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Validate and convert a single option.
    pub fn convert(self, name: &str, value: Option<&str>) -> Result<Option<String>, String> {
        match self {
            Self::None => Err(format!("unknown option: \"{name}\"")),
            Self::Any => Ok(value.map(str::to_owned)),
            Self::Declared(options) => {
                let kind = options
                    .iter()
                    .find(|(option, _)| *option == name)
                    .map(|(_, kind)| *kind)
                    .ok_or_else(|| format!("unknown option: \"{name}\""))?;
                kind.convert(value).map_err(|detail| {
                    format!(
                        "invalid option value: (option: \"{name}\"; value: {value:?})\n{detail}"
                    )
                })
            }
        }
    }
}

/// Options shared by most base directives.
pub const CLASS_NAME_OPTIONS: &[(&str, OptionKind)] = &[
    ("class", OptionKind::Class),
    ("name", OptionKind::Unchanged),
];

/// Parsing shape of a directive.
///
/// # Example
///
/// ```
/// use rstfmt_rst::{DirectiveShape, OptionSpec};
///
/// const IMAGE: DirectiveShape = DirectiveShape::new()
///     .required(1)
///     .final_whitespace()
///     .options(OptionSpec::Any);
///
/// assert!(IMAGE.takes_arguments());
/// assert!(!IMAGE.has_content);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectiveShape {
    /// Number of required arguments.
    pub required_arguments: usize,
    /// Number of optional arguments.
    pub optional_arguments: usize,
    /// Whether the last argument may contain whitespace.
    pub final_argument_whitespace: bool,
    /// Whether body content is allowed.
    pub has_content: bool,
    /// Option schema.
    pub options: OptionSpec,
}

impl DirectiveShape {
    /// Shape with no arguments, no options and no content.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            required_arguments: 0,
            optional_arguments: 0,
            final_argument_whitespace: false,
            has_content: false,
            options: OptionSpec::None,
        }
    }

    /// Set the number of required arguments.
    #[must_use]
    pub const fn required(mut self, count: usize) -> Self {
        self.required_arguments = count;
        self
    }

    /// Set the number of optional arguments.
    #[must_use]
    pub const fn optional(mut self, count: usize) -> Self {
        self.optional_arguments = count;
        self
    }

    /// Allow whitespace in the final argument.
    #[must_use]
    pub const fn final_whitespace(mut self) -> Self {
        self.final_argument_whitespace = true;
        self
    }

    /// Allow body content.
    #[must_use]
    pub const fn content(mut self) -> Self {
        self.has_content = true;
        self
    }

    /// Set the option schema.
    #[must_use]
    pub const fn options(mut self, options: OptionSpec) -> Self {
        self.options = options;
        self
    }

    /// Whether any argument is accepted.
    #[must_use]
    pub const fn takes_arguments(&self) -> bool {
        self.required_arguments + self.optional_arguments > 0
    }

    /// Largest number of arguments accepted.
    #[must_use]
    pub const fn max_arguments(&self) -> usize {
        self.required_arguments + self.optional_arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: OptionSpec = OptionSpec::Declared(&[
        ("width", OptionKind::PositiveInt),
        ("align", OptionKind::Choice(&["left", "center", "right"])),
        ("hidden", OptionKind::Flag),
        ("target", OptionKind::Uri),
    ]);

    #[test]
    fn test_flag() {
        assert_eq!(OptionKind::Flag.convert(None), Ok(None));
        assert!(OptionKind::Flag.convert(Some("yes")).is_err());
    }

    #[test]
    fn test_unchanged() {
        assert_eq!(OptionKind::Unchanged.convert(None), Ok(Some(String::new())));
        assert_eq!(
            OptionKind::Unchanged.convert(Some("a b")),
            Ok(Some("a b".to_owned()))
        );
    }

    #[test]
    fn test_positive_int() {
        assert_eq!(
            OptionKind::PositiveInt.convert(Some(" 12 ")),
            Ok(Some("12".to_owned()))
        );
        assert!(OptionKind::PositiveInt.convert(Some("0")).is_err());
        assert!(OptionKind::PositiveInt.convert(Some("12px")).is_err());
        assert!(OptionKind::PositiveInt.convert(None).is_err());
    }

    #[test]
    fn test_choice_is_case_insensitive() {
        let kind = OptionKind::Choice(&["left", "right"]);
        assert_eq!(kind.convert(Some("LEFT")), Ok(Some("left".to_owned())));
        let err = kind.convert(Some("up")).unwrap_err();
        assert!(err.contains("choose from \"left\", \"right\""));
    }

    #[test]
    fn test_class_normalization() {
        assert_eq!(
            OptionKind::Class.convert(Some("Big_Box  small")),
            Ok(Some("big-box small".to_owned()))
        );
        assert!(OptionKind::Class.convert(Some("!!!")).is_err());
    }

    #[test]
    fn test_uri_strips_whitespace() {
        assert_eq!(
            OptionKind::Uri.convert(Some("https://example.com/\n  path")),
            Ok(Some("https://example.com/path".to_owned()))
        );
    }

    #[test]
    fn test_declared_unknown_option() {
        let err = SPEC.convert("unknown-opt", Some("value")).unwrap_err();
        assert_eq!(err, "unknown option: \"unknown-opt\"");
    }

    #[test]
    fn test_declared_invalid_value() {
        let err = SPEC.convert("width", Some("wide")).unwrap_err();
        assert!(err.starts_with("invalid option value: (option: \"width\""));
    }

    #[test]
    fn test_any_keeps_value() {
        assert_eq!(
            OptionSpec::Any.convert("unknown-opt", Some("  raw  value")),
            Ok(Some("  raw  value".to_owned()))
        );
        assert_eq!(OptionSpec::Any.convert("flag", None), Ok(None));
    }

    #[test]
    fn test_shape_builder() {
        const SHAPE: DirectiveShape = DirectiveShape::new()
            .required(1)
            .optional(2)
            .final_whitespace()
            .content();
        assert_eq!(SHAPE.max_arguments(), 3);
        assert!(SHAPE.takes_arguments());
        assert!(SHAPE.has_content);
        assert!(!SHAPE.options.accepts_options());
        assert!(!DirectiveShape::new().takes_arguments());
    }
}
