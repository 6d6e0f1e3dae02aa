//! Registration of passthrough directives and roles.

use std::sync::{Arc, OnceLock};

use rstfmt_config::ExtensionsConfig;
use rstfmt_rst::sphinx::{
    AUTODOC, GLOSSARY, HIGHLIGHT, LITERAL_INCLUDE, ONLY, TOCTREE, TODO, VERSION_CHANGE,
    VERSION_CHANGE_NAMES, autodoc_objtypes,
};
use rstfmt_rst::{BuiltinDirective, Registry, Role, RoleKind};

use crate::ExtrasError;
use crate::catalog::{Catalog, walk};
use crate::intercept::{GenericRole, Passthrough, ReferenceRole, intercept_role};
use crate::plugins::Capabilities;
use crate::policy::{GENERIC_ROLES, ROLE_DIRECTIVE, is_raw};

/// Directives with bespoke registrations, applied after the base grammar.
const SPECIAL_DIRECTIVES: &[(&str, &BuiltinDirective, bool)] = &[
    ("glossary", &GLOSSARY, false),
    ("literalinclude", &LITERAL_INCLUDE, true),
    ("toctree", &TOCTREE, true),
    ("only", &ONLY, true),
    ("highlight", &HIGHLIGHT, true),
    ("todo", &TODO, true),
];

/// Base-grammar directives that get a bespoke registration instead of the
/// generic one.
const EXCLUDED_BASE_DIRECTIVES: &[&str] = &["role"];

/// Outcome of [`register`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// Number of directive registrations, including overrides.
    pub directives: usize,
    /// Number of role registrations, including overrides.
    pub roles: usize,
    /// Plugins that were registered.
    pub plugins: Vec<&'static str>,
    /// Plugins that were left out.
    pub skipped_plugins: Vec<&'static str>,
}

/// Counts registrations while forwarding them to the registry.
struct Installer<'a> {
    registry: &'a mut Registry,
    summary: RegistrationSummary,
}

impl Installer<'_> {
    fn directive(&mut self, name: &str, passthrough: Passthrough) {
        self.registry.register_directive(name, Arc::new(passthrough));
        self.summary.directives += 1;
    }

    fn role(&mut self, name: &str, role: Arc<dyn Role>) {
        self.registry.register_role(name, role);
        self.summary.roles += 1;
    }

    fn generic_roles(&mut self) {
        for name in GENERIC_ROLES {
            self.role(name, Arc::new(GenericRole));
        }
        self.role("download", Arc::new(ReferenceRole));
        tracing::debug!(roles = self.summary.roles, "Registered generic roles");
    }

    fn domain_roles(&mut self, catalog: &Catalog) {
        for entry in &catalog.roles {
            let passthrough = intercept_role(entry.item.as_ref());
            // Cross-reference roles resolve bare in every domain.
            let names = match passthrough.kind() {
                RoleKind::Reference => vec![entry.name.clone(), entry.qualified_name()],
                RoleKind::Generic => entry.names(),
            };
            for name in names {
                self.role(&name, Arc::clone(&passthrough));
            }
        }
        tracing::debug!(roles = catalog.roles.len(), "Registered domain roles");
    }

    fn domain_directives(&mut self, catalog: &Catalog) {
        for entry in &catalog.directives {
            self.directive(
                &entry.qualified_name(),
                Passthrough::wrap(entry.item.as_ref(), true),
            );
        }
        for entry in catalog.directives.iter().filter(|entry| entry.is_default) {
            self.directive(&entry.name, Passthrough::wrap(entry.item.as_ref(), true));
        }
        tracing::debug!(
            directives = catalog.directives.len(),
            "Registered domain directives"
        );
    }

    fn base_directives(&mut self, base: Vec<(String, Passthrough)>) {
        self.directive("role", Passthrough::new(ROLE_DIRECTIVE, true));
        let count = base.len();
        for (name, passthrough) in base {
            self.directive(&name, passthrough);
        }
        tracing::debug!(directives = count, "Registered base directives");
    }

    fn special_directives(&mut self) {
        for (name, directive, raw) in SPECIAL_DIRECTIVES {
            self.directive(name, Passthrough::wrap(*directive, *raw));
        }
        for name in VERSION_CHANGE_NAMES {
            self.directive(name, Passthrough::wrap(&VERSION_CHANGE, true));
        }
        for objtype in autodoc_objtypes() {
            self.directive(
                &format!("auto{objtype}"),
                Passthrough::wrap(&AUTODOC, false),
            );
        }
    }

    fn plugins(&mut self, capabilities: &Capabilities) {
        for plugin in capabilities.enabled() {
            for directive in plugin.directives {
                self.directive(
                    directive.name,
                    Passthrough::new(directive.shape, directive.raw),
                );
            }
            for name in plugin.reference_roles {
                self.role(name, Arc::new(ReferenceRole));
            }
            tracing::debug!(plugin = plugin.name, "Registered plugin");
            self.summary.plugins.push(plugin.name);
        }
        for name in capabilities.skipped() {
            tracing::debug!(plugin = name, "Skipped plugin");
        }
        self.summary.skipped_plugins = capabilities.skipped().to_vec();
    }
}

/// Replace every known directive and role of `registry` with a passthrough.
///
/// Later steps override earlier registrations of the same name, so the
/// bespoke entries win over the generic ones. Running it again on the same
/// registry registers the same passthroughs again.
///
/// # Errors
///
/// Returns [`ExtrasError::UnknownDomain`] if the registry has domains but
/// none named `config.default_domain`, and [`ExtrasError::UnknownPlugin`] if
/// the configuration enables a plugin that does not exist.
pub fn register(
    registry: &mut Registry,
    config: &ExtensionsConfig,
) -> Result<RegistrationSummary, ExtrasError> {
    let capabilities = Capabilities::resolve(config)?;
    let domains = registry.domains();
    if !domains.is_empty() && domains.get(&config.default_domain).is_none() {
        return Err(ExtrasError::UnknownDomain(config.default_domain.clone()));
    }
    let catalog = walk(domains, &config.default_domain);
    let base: Vec<(String, Passthrough)> = registry
        .base_directives()
        .filter(|(name, _)| !EXCLUDED_BASE_DIRECTIVES.contains(name))
        .map(|(name, directive)| {
            (
                name.to_owned(),
                Passthrough::wrap(directive.as_ref(), is_raw(name)),
            )
        })
        .collect();

    let mut installer = Installer {
        registry,
        summary: RegistrationSummary::default(),
    };
    installer.generic_roles();
    installer.domain_roles(&catalog);
    installer.domain_directives(&catalog);
    installer.base_directives(base);
    installer.special_directives();
    installer.plugins(&capabilities);

    let summary = installer.summary;
    tracing::info!(
        directives = summary.directives,
        roles = summary.roles,
        plugins = summary.plugins.len(),
        default_domain = %config.default_domain,
        "Registered passthrough extensions"
    );
    Ok(summary)
}

/// Build and freeze a passthrough registry over the documentation grammar.
///
/// # Errors
///
/// Returns the error of [`register`].
pub fn build_registry(config: &ExtensionsConfig) -> Result<Arc<Registry>, ExtrasError> {
    let mut registry = Registry::sphinx();
    register(&mut registry, config)?;
    Ok(Arc::new(registry))
}

/// Process-wide passthrough registry with the default configuration.
///
/// Built on first use; later calls share the same registry.
///
/// # Errors
///
/// Returns the error of [`register`].
pub fn default_registry() -> Result<Arc<Registry>, ExtrasError> {
    static REGISTRY: OnceLock<Result<Arc<Registry>, ExtrasError>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| build_registry(&ExtensionsConfig::default()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ROLE_ALIASES;
    use crate::{DirectiveNode, PLUGINS, RefRoleNode, RoleNode};
    use pretty_assertions::assert_eq;
    use rstfmt_rst::{Block, DirectiveShape, Document, Inline, ParseError, Parser, ParserConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> ExtensionsConfig {
        ExtensionsConfig::default()
    }

    fn parse(config: &ExtensionsConfig, source: &str) -> Document {
        Parser::new(build_registry(config).unwrap())
            .parse(source)
            .unwrap()
    }

    fn directive_node(doc: &Document) -> &DirectiveNode {
        doc.children[0]
            .downcast_ref::<DirectiveNode>()
            .expect("expected a passthrough directive")
    }

    fn first_inline(doc: &Document) -> &Inline {
        doc.inlines()
            .find(|inline| matches!(inline, Inline::Custom(_)))
            .expect("expected a passthrough role")
    }

    /// Smallest invocation the shape accepts.
    fn sample_source(name: &str, shape: DirectiveShape) -> String {
        let mut source = format!(".. {name}::");
        for _ in 0..shape.required_arguments {
            source.push_str(" arg");
        }
        if shape.has_content {
            source.push_str("\n\n   body");
        }
        source.push('\n');
        source
    }

    /// Smallest invocation the shape accepts, with one undeclared option.
    fn sample_with_option(name: &str, shape: DirectiveShape) -> String {
        let mut source = format!(".. {name}::");
        for _ in 0..shape.required_arguments {
            source.push_str(" arg");
        }
        source.push_str("\n   :unknown-opt: value");
        if shape.has_content {
            source.push_str("\n\n   body");
        }
        source.push('\n');
        source
    }

    fn raw_flags(registry: &Registry) -> Vec<(String, bool)> {
        let parser = Parser::new(Arc::new(registry.clone()));
        registry
            .registered_directives()
            .map(|(name, directive)| {
                let doc = parser
                    .parse(&sample_source(name, directive.shape()))
                    .unwrap_or_else(|err| panic!("{name}: {err}"));
                let node = doc.children[0]
                    .downcast_ref::<DirectiveNode>()
                    .unwrap_or_else(|| panic!("{name} was expanded"));
                (name.to_owned(), node.raw)
            })
            .collect()
    }

    #[test]
    fn test_note_is_reflowed() {
        let doc = parse(&config(), ".. note:: some *text*");
        let node = directive_node(&doc);

        assert_eq!(node.name(), "note");
        assert!(!node.raw);
        assert_eq!(
            node.children,
            vec![Block::Paragraph {
                line: 1,
                children: vec![
                    Inline::Text("some ".to_owned()),
                    Inline::Emphasis("text".to_owned()),
                ],
            }]
        );
    }

    #[test]
    fn test_pep_role() {
        let doc = parse(&config(), "See :pep:`8`.");
        assert_eq!(
            first_inline(&doc).downcast_ref::<RoleNode>(),
            Some(&RoleNode {
                role: "PEP".to_owned(),
                rawtext: ":pep:`8`".to_owned(),
                text: "8".to_owned(),
            })
        );
    }

    #[test]
    fn test_role_aliases() {
        for (alias, canonical) in ROLE_ALIASES {
            let doc = parse(&config(), &format!(":{alias}:`1`"));
            let node = first_inline(&doc)
                .downcast_ref::<RoleNode>()
                .unwrap_or_else(|| panic!("{alias} did not produce a role node"));
            assert_eq!(node.role, *canonical);
        }
    }

    #[test]
    fn test_unknown_option_is_carried() {
        let doc = parse(&config(), ".. image:: cat.png\n   :unknown-opt: value\n");
        let node = directive_node(&doc);

        assert!(node.raw);
        assert_eq!(node.invocation.arguments, vec!["cat.png"]);
        assert_eq!(node.invocation.options.value("unknown-opt"), Some("value"));
    }

    #[test]
    fn test_shape_errors_are_kept() {
        let registry = build_registry(&config()).unwrap();
        let err = Parser::new(registry).parse(".. image::\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Directive {
                name: "image".to_owned(),
                line: 1,
                message: "1 argument(s) required, 0 supplied".to_owned(),
            }
        );
    }

    #[test]
    fn test_raw_directive_round_trip() {
        let source = "\
.. code:: python
   :number-lines: 3
   :unknown-opt: any value

   def f():
       return 1
";
        let first = parse(&config(), source);
        let first = directive_node(&first);
        assert!(first.raw);

        let reparsed = parse(&config(), &first.invocation.to_source());
        let second = directive_node(&reparsed);
        assert_eq!(second.invocation.arguments, first.invocation.arguments);
        assert_eq!(second.invocation.options, first.invocation.options);
        assert_eq!(second.invocation.content, first.invocation.content);
    }

    #[test]
    fn test_role_directive_takes_one_argument() {
        let doc = parse(&config(), ".. role:: custom\n   :class: special\n");
        let node = directive_node(&doc);
        assert!(node.raw);
        assert_eq!(node.invocation.arguments, vec!["custom"]);
        assert_eq!(node.invocation.options.value("class"), Some("special"));
    }

    #[test]
    fn test_special_directives() {
        let doc = parse(&config(), ".. glossary::\n\n   term\n      Definition.\n");
        assert!(!directive_node(&doc).raw);

        let doc = parse(&config(), ".. versionchanged:: 2.0 Reworded.\n");
        let node = directive_node(&doc);
        assert!(node.raw);
        assert_eq!(node.invocation.arguments, vec!["2.0", "Reworded."]);

        let doc = parse(&config(), ".. autofunction:: spam.eggs\n   :noindex:\n");
        let node = directive_node(&doc);
        assert!(!node.raw);
        assert_eq!(node.invocation.options.get("noindex"), Some(None));
    }

    #[test]
    fn test_domain_roles() {
        let doc = parse(&config(), ":py:func:`spam <eggs.spam>`");
        assert_eq!(
            first_inline(&doc).downcast_ref::<RefRoleNode>(),
            Some(&RefRoleNode {
                rawtext: ":py:func:`spam <eggs.spam>`".to_owned(),
                name: "py:func".to_owned(),
                has_explicit_title: true,
                target: "eggs.spam".to_owned(),
                title: "spam".to_owned(),
            })
        );

        let doc = parse(&config(), ":ref:`intro`");
        assert!(first_inline(&doc).downcast_ref::<RefRoleNode>().is_some());

        let doc = parse(&config(), ":cpp:expr:`a + b`");
        let node = first_inline(&doc).downcast_ref::<RoleNode>().unwrap();
        assert_eq!(node.role, "cpp:expr");
        assert_eq!(node.text, "a + b");
    }

    #[test]
    fn test_default_domain() {
        let doc = parse(&config(), ".. function:: spam(eggs)\n");
        assert_eq!(directive_node(&doc).name(), "function");

        let cpp = ExtensionsConfig {
            default_domain: "cpp".to_owned(),
            ..config()
        };
        let registry = build_registry(&cpp).unwrap();
        assert!(registry.registered_directives().any(|(name, _)| name == "enum-class"));
        assert!(registry.directive("py:function").is_some());
        assert!(registry.role("texpr").is_some());
        assert!(build_registry(&config()).unwrap().role("texpr").is_none());
    }

    #[test]
    fn test_unknown_default_domain() {
        let config = ExtensionsConfig {
            default_domain: "go".to_owned(),
            ..config()
        };
        let err = register(&mut Registry::sphinx(), &config).unwrap_err();
        assert_eq!(err, ExtrasError::UnknownDomain("go".to_owned()));
    }

    #[test]
    fn test_empty_registry() {
        let config = ExtensionsConfig {
            plugins: Some(Vec::new()),
            ..config()
        };
        let mut registry = Registry::new();
        let summary = register(&mut registry, &config).unwrap();
        assert_eq!(summary.roles, GENERIC_ROLES.len() + 1);
        assert!(registry.directive("note").is_none());
        assert!(registry.directive("role").is_some());
    }

    #[test]
    fn test_every_directive_is_passthrough() {
        let registry = build_registry(&config()).unwrap();
        let flags = raw_flags(&registry);
        let names: Vec<&str> = flags.iter().map(|(name, _)| name.as_str()).collect();

        let catalog = walk(Registry::sphinx().domains(), "py");
        for entry in &catalog.directives {
            for name in entry.names() {
                assert!(names.contains(&name.as_str()), "{name} not registered");
            }
        }
        for (name, _) in Registry::sphinx().base_directives() {
            assert!(names.contains(&name), "{name} not registered");
        }
    }

    #[test]
    fn test_every_role_is_passthrough() {
        let registry = build_registry(&config()).unwrap();
        let parser = Parser::new(Arc::clone(&registry));
        for (name, _) in registry.registered_roles() {
            let doc = parser
                .parse(&format!(":{name}:`x`"))
                .unwrap_or_else(|err| panic!("{name}: {err}"));
            let inline = first_inline(&doc);
            assert!(
                inline.downcast_ref::<RoleNode>().is_some()
                    || inline.downcast_ref::<RefRoleNode>().is_some(),
                "{name} was expanded"
            );
        }
    }

    #[test]
    fn test_raw_flags_are_stable() {
        let mut registry = Registry::sphinx();
        register(&mut registry, &config()).unwrap();
        let first = raw_flags(&registry);
        register(&mut registry, &config()).unwrap();
        assert_eq!(raw_flags(&registry), first);
    }

    #[test]
    fn test_disabled_plugins_are_not_registered() {
        let config = ExtensionsConfig {
            plugins: Some(Vec::new()),
            ..config()
        };
        let mut registry = Registry::sphinx();
        let summary = register(&mut registry, &config).unwrap();

        assert!(summary.plugins.is_empty());
        assert_eq!(summary.skipped_plugins.len(), PLUGINS.len());
        for plugin in PLUGINS {
            for directive in plugin.directives {
                assert!(registry.directive(directive.name).is_none(), "{}", directive.name);
            }
            for role in plugin.reference_roles {
                assert!(registry.role(role).is_none(), "{role}");
            }
        }
    }

    #[test]
    fn test_compiled_plugins_are_registered() {
        let mut registry = Registry::sphinx();
        let summary = register(&mut registry, &config()).unwrap();
        let parser = Parser::new(Arc::new(registry));

        for plugin in PLUGINS.iter().filter(|plugin| plugin.compiled) {
            assert!(summary.plugins.contains(&plugin.name));
            for directive in plugin.directives {
                let doc = parser
                    .parse(&sample_source(directive.name, directive.shape))
                    .unwrap();
                assert_eq!(directive_node(&doc).raw, directive.raw, "{}", directive.name);
            }
            for role in plugin.reference_roles {
                let doc = parser.parse(&format!(":{role}:`main.c`")).unwrap();
                assert!(first_inline(&doc).downcast_ref::<RefRoleNode>().is_some());
            }
        }
    }

    #[test]
    fn test_default_registry_is_shared() {
        let first = default_registry().unwrap();
        let second = default_registry().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_registry_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rstfmt.toml");
        std::fs::write(
            &path,
            "[extensions]\ndefault_domain = \"c\"\nplugins = []\n",
        )
        .unwrap();
        let config = rstfmt_config::Config::load(Some(&path), None).unwrap();

        let registry = build_registry(&config.extensions).unwrap();
        assert!(registry.directive("macro").is_some());
        assert!(registry.directive("click").is_none());
    }

    #[test]
    fn test_every_directive_keeps_unknown_options() {
        let registry = build_registry(&config()).unwrap();
        let parser = Parser::new(Arc::clone(&registry));
        for (name, directive) in registry.registered_directives() {
            let doc = parser
                .parse(&sample_with_option(name, directive.shape()))
                .unwrap_or_else(|err| panic!("{name}: {err}"));
            let node = directive_node(&doc);
            assert_eq!(
                node.invocation.options.value("unknown-opt"),
                Some("value"),
                "{name}"
            );
        }
    }

    #[test]
    fn test_directives_do_not_read_files() {
        let source = "\
.. include:: part.rst

.. literalinclude:: code.py
   :lines: 1-3

.. raw:: html
   :file: snippet.html
";
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let parser = Parser::new(build_registry(&config()).unwrap()).with_config(
            ParserConfig::new().with_read_file(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("Included.".to_owned())
            }),
        );

        let doc = parser.parse(source).unwrap();
        assert_eq!(doc.children.len(), 3);
        for block in &doc.children {
            assert!(block.downcast_ref::<DirectiveNode>().is_some());
        }
        assert_eq!(reads.load(Ordering::SeqCst), 0);
    }
}
