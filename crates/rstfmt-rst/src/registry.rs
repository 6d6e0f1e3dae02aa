//! Directive and role registry.
//!
//! A [`Registry`] is built once, then frozen behind an `Arc` and shared with
//! every [`Parser`](crate::Parser). Lookups follow the reST rules:
//!
//! 1. the lowercased name in the registered table,
//! 2. the canonical name (after alias resolution) in the registered table,
//!    then in the base grammar,
//! 3. for `domain:name`, the domain's own table (including inherited entries).

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::directive::base_directives;
use crate::domain::{Domain, DomainRegistry, sphinx_domains};
use crate::language::{directive_alias, role_alias};
use crate::role::base_roles;
use crate::{Directive, Role, sphinx};

/// Directives and roles known to the parser.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    directives: BTreeMap<String, Arc<dyn Directive>>,
    roles: BTreeMap<String, Arc<dyn Role>>,
    base_directives: BTreeMap<String, Arc<dyn Directive>>,
    base_roles: BTreeMap<String, Arc<dyn Role>>,
    domains: DomainRegistry,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard reST directives and roles.
    #[must_use]
    pub fn with_base_grammar() -> Self {
        let mut registry = Self::new();
        for (name, directive) in base_directives() {
            registry
                .base_directives
                .insert(name.to_owned(), Arc::new(directive));
        }
        for (name, role) in base_roles() {
            registry.base_roles.insert(name.to_owned(), Arc::new(role));
        }
        registry
    }

    /// Base grammar plus the documentation domains and application-level
    /// directives of a documentation generator.
    #[must_use]
    pub fn sphinx() -> Self {
        let mut registry = Self::with_base_grammar();
        registry.domains = sphinx_domains();
        sphinx::register(&mut registry);
        registry
    }

    /// Register a directive, replacing any previous registration of the name.
    pub fn register_directive(&mut self, name: &str, directive: Arc<dyn Directive>) {
        self.directives.insert(name.to_lowercase(), directive);
    }

    /// Register a role, replacing any previous registration of the name.
    pub fn register_role(&mut self, name: &str, role: Arc<dyn Role>) {
        self.roles.insert(name.to_lowercase(), role);
    }

    /// Register a domain.
    pub fn register_domain(&mut self, domain: Domain) {
        self.domains.register(domain);
    }

    /// Registered domains.
    #[must_use]
    pub fn domains(&self) -> &DomainRegistry {
        &self.domains
    }

    /// Base-grammar directives by canonical name.
    pub fn base_directives(&self) -> impl Iterator<Item = (&str, &Arc<dyn Directive>)> {
        self.base_directives
            .iter()
            .map(|(name, directive)| (name.as_str(), directive))
    }

    /// Base-grammar roles by canonical name.
    pub fn base_roles(&self) -> impl Iterator<Item = (&str, &Arc<dyn Role>)> {
        self.base_roles.iter().map(|(name, role)| (name.as_str(), role))
    }

    /// Explicitly registered directives.
    pub fn registered_directives(&self) -> impl Iterator<Item = (&str, &Arc<dyn Directive>)> {
        self.directives
            .iter()
            .map(|(name, directive)| (name.as_str(), directive))
    }

    /// Explicitly registered roles.
    pub fn registered_roles(&self) -> impl Iterator<Item = (&str, &Arc<dyn Role>)> {
        self.roles.iter().map(|(name, role)| (name.as_str(), role))
    }

    /// Look up a directive by name as written.
    #[must_use]
    pub fn directive(&self, name: &str) -> Option<&Arc<dyn Directive>> {
        let name = name.to_lowercase();
        if let Some(directive) = self.directives.get(&name) {
            return Some(directive);
        }
        let canonical = directive_alias(&name).unwrap_or(name.as_str());
        self.directives
            .get(canonical)
            .or_else(|| self.base_directives.get(canonical))
            .or_else(|| {
                let (domain, local) = name.split_once(':')?;
                self.domains.directive(domain, local)
            })
    }

    /// Look up a role by name as written.
    #[must_use]
    pub fn role(&self, name: &str) -> Option<&Arc<dyn Role>> {
        let name = name.to_lowercase();
        if let Some(role) = self.roles.get(&name) {
            return Some(role);
        }
        let canonical = role_alias(&name).unwrap_or(name.as_str());
        self.roles
            .get(canonical)
            .or_else(|| self.base_roles.get(canonical))
            .or_else(|| {
                let (domain, local) = name.split_once(':')?;
                self.domains.role(domain, local)
            })
    }
}
