//! Domains: namespaced groups of directives and roles.
//!
//! Every domain module contributes itself through an explicit `register`
//! call; [`sphinx_domains`] collects the standard set.

mod c;
mod cpp;
mod javascript;
mod math;
mod python;
mod rst;
mod std_domain;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{Directive, Role};

/// Namespaced group of directives and roles.
///
/// A domain may extend another one and then inherits every directive and
/// role it does not define itself.
#[derive(Debug, Clone)]
pub struct Domain {
    /// Domain name (e.g. `py`).
    pub name: String,
    /// Name of the extended domain.
    pub extends: Option<String>,
    /// Directives by name, without the domain prefix.
    pub directives: BTreeMap<String, Arc<dyn Directive>>,
    /// Roles by name, without the domain prefix.
    pub roles: BTreeMap<String, Arc<dyn Role>>,
}

impl Domain {
    /// Create an empty domain.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            directives: BTreeMap::new(),
            roles: BTreeMap::new(),
        }
    }

    /// Inherit from another domain.
    #[must_use]
    pub fn extending(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    /// Add a directive.
    #[must_use]
    pub fn with_directive(mut self, name: &str, directive: Arc<dyn Directive>) -> Self {
        self.directives.insert(name.to_owned(), directive);
        self
    }

    /// Add a role.
    #[must_use]
    pub fn with_role(mut self, name: &str, role: Arc<dyn Role>) -> Self {
        self.roles.insert(name.to_owned(), role);
        self
    }

    /// Add directives sharing one implementation.
    #[must_use]
    pub fn with_directives(mut self, names: &[&str], directive: &Arc<dyn Directive>) -> Self {
        for name in names {
            self.directives
                .insert((*name).to_owned(), Arc::clone(directive));
        }
        self
    }

    /// Add roles sharing one implementation.
    #[must_use]
    pub fn with_roles(mut self, names: &[&str], role: &Arc<dyn Role>) -> Self {
        for name in names {
            self.roles.insert((*name).to_owned(), Arc::clone(role));
        }
        self
    }
}

/// Registered domains by name.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    domains: BTreeMap<String, Domain>,
}

impl DomainRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain, replacing any domain of the same name.
    pub fn register(&mut self, domain: Domain) {
        self.domains.insert(domain.name.clone(), domain);
    }

    /// Get a domain by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    /// Iterate over domains in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    /// Whether no domain is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Chain of domains starting at `name` and following `extends`.
    ///
    /// Stops at unknown domains and at the first domain already on the chain.
    pub fn lineage<'a>(&'a self, name: &str) -> Vec<&'a Domain> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut next = Some(name);
        while let Some(current) = next {
            if !seen.insert(current) {
                break;
            }
            let Some(domain) = self.domains.get(current) else {
                break;
            };
            chain.push(domain);
            next = domain.extends.as_deref();
        }
        chain
    }

    /// Look up a directive of a domain, including inherited ones.
    #[must_use]
    pub fn directive(&self, domain: &str, name: &str) -> Option<&Arc<dyn Directive>> {
        self.lineage(domain)
            .into_iter()
            .find_map(|d| d.directives.get(name))
    }

    /// Look up a role of a domain, including inherited ones.
    #[must_use]
    pub fn role(&self, domain: &str, name: &str) -> Option<&Arc<dyn Role>> {
        self.lineage(domain)
            .into_iter()
            .find_map(|d| d.roles.get(name))
    }
}

/// The standard documentation domains.
#[must_use]
pub fn sphinx_domains() -> DomainRegistry {
    let mut registry = DomainRegistry::new();
    c::register(&mut registry);
    cpp::register(&mut registry);
    javascript::register(&mut registry);
    math::register(&mut registry);
    python::register(&mut registry);
    rst::register(&mut registry);
    std_domain::register(&mut registry);
    registry
}

/// Shape shared by object description directives (`.. py:function:: sig`).
pub(crate) const OBJECT_DESCRIPTION: crate::DirectiveShape = crate::DirectiveShape::new()
    .required(1)
    .final_whitespace()
    .content()
    .options(crate::OptionSpec::Declared(&[
        ("no-index", crate::OptionKind::Flag),
        ("noindex", crate::OptionKind::Flag),
        ("no-index-entry", crate::OptionKind::Flag),
        ("no-contents-entry", crate::OptionKind::Flag),
        ("no-typesetting", crate::OptionKind::Flag),
    ]));
