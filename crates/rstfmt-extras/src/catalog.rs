//! Extension catalog: every directive and role contributed by the domains.

use std::collections::BTreeMap;
use std::sync::Arc;

use rstfmt_rst::{Directive, DomainRegistry, Role};

/// One directive or role of a domain.
#[derive(Debug, Clone)]
pub struct CatalogEntry<T> {
    /// Domain the entry was found through.
    pub domain: String,
    /// Name without the domain prefix.
    pub name: String,
    /// The registered implementation.
    pub item: T,
    /// Whether the domain is the default one, so the bare name resolves too.
    pub is_default: bool,
}

impl<T> CatalogEntry<T> {
    /// `domain:name`
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.domain, self.name)
    }

    /// Names the entry is reachable under in a document.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names = vec![self.qualified_name()];
        if self.is_default {
            names.push(self.name.clone());
        }
        names
    }
}

/// Flattened view of all domains.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Directives, grouped by domain in name order.
    pub directives: Vec<CatalogEntry<Arc<dyn Directive>>>,
    /// Roles, grouped by domain in name order.
    pub roles: Vec<CatalogEntry<Arc<dyn Role>>>,
}

impl Catalog {
    /// Whether no domain contributed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.roles.is_empty()
    }
}

/// Walk every registered domain.
///
/// Entries inherited through `extends` are listed under the extending domain
/// as well; a domain's own entry wins over an inherited one of the same name.
#[must_use]
pub fn walk(domains: &DomainRegistry, default_domain: &str) -> Catalog {
    let mut catalog = Catalog::default();

    for domain in domains.iter() {
        let mut directives = BTreeMap::new();
        let mut roles = BTreeMap::new();
        for ancestor in domains.lineage(&domain.name).into_iter().rev() {
            directives.extend(ancestor.directives.iter());
            roles.extend(ancestor.roles.iter());
        }

        let is_default = domain.name == default_domain;
        catalog
            .directives
            .extend(directives.into_iter().map(|(name, item)| CatalogEntry {
                domain: domain.name.clone(),
                name: name.clone(),
                item: Arc::clone(item),
                is_default,
            }));
        catalog
            .roles
            .extend(roles.into_iter().map(|(name, item)| CatalogEntry {
                domain: domain.name.clone(),
                name: name.clone(),
                item: Arc::clone(item),
                is_default,
            }));
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstfmt_rst::role::BuiltinRole;
    use rstfmt_rst::{BuiltinDirective, DirectiveShape, Domain, Expansion};

    fn directive(required: usize) -> Arc<dyn Directive> {
        Arc::new(BuiltinDirective::new(
            "desc",
            DirectiveShape::new().required(required),
            Expansion::Empty,
        ))
    }

    fn names<T>(entries: &[CatalogEntry<T>]) -> Vec<String> {
        entries.iter().flat_map(CatalogEntry::names).collect()
    }

    #[test]
    fn test_empty_registry() {
        let catalog = walk(&DomainRegistry::new(), "py");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_default_domain_adds_bare_names() {
        let mut domains = DomainRegistry::new();
        domains.register(Domain::new("py").with_directive("function", directive(1)));
        domains.register(Domain::new("c").with_directive("macro", directive(1)));

        let catalog = walk(&domains, "py");
        assert_eq!(
            names(&catalog.directives),
            vec!["c:macro", "py:function", "function"]
        );
    }

    #[test]
    fn test_inherited_entries() {
        let mut domains = DomainRegistry::new();
        domains.register(
            Domain::new("base")
                .with_directive("object", directive(1))
                .with_directive("shared", directive(1))
                .with_role("ref", Arc::new(BuiltinRole::xref())),
        );
        domains.register(
            Domain::new("child")
                .extending("base")
                .with_directive("shared", directive(2)),
        );

        let catalog = walk(&domains, "none");
        assert_eq!(
            names(&catalog.directives),
            vec!["base:object", "base:shared", "child:object", "child:shared"]
        );
        assert_eq!(names(&catalog.roles), vec!["base:ref", "child:ref"]);

        let child_shared = catalog
            .directives
            .iter()
            .find(|e| e.qualified_name() == "child:shared")
            .unwrap();
        assert_eq!(child_shared.item.shape().required_arguments, 2);
    }

    #[test]
    fn test_sphinx_domains() {
        let registry = rstfmt_rst::Registry::sphinx();
        let catalog = walk(registry.domains(), "py");
        let directives = names(&catalog.directives);
        assert!(directives.contains(&"py:function".to_owned()));
        assert!(directives.contains(&"function".to_owned()));
        assert!(directives.contains(&"cpp:class".to_owned()));
        assert!(names(&catalog.roles).contains(&"std:ref".to_owned()));
    }
}
