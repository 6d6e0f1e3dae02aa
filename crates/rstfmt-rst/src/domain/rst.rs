//! reStructuredText domain.

use std::sync::Arc;

use super::{Domain, DomainRegistry, OBJECT_DESCRIPTION};
use crate::directive::{BuiltinDirective, Expansion};
use crate::role::BuiltinRole;
use crate::{Directive, OptionKind, OptionSpec, Role};

pub(super) fn register(registry: &mut DomainRegistry) {
    let object: Arc<dyn Directive> = Arc::new(BuiltinDirective::new(
        "desc",
        OBJECT_DESCRIPTION,
        Expansion::Body,
    ));
    let option = BuiltinDirective::new(
        "desc",
        OBJECT_DESCRIPTION.options(OptionSpec::Declared(&[
            ("type", OptionKind::Unchanged),
            ("default", OptionKind::Unchanged),
            ("no-index", OptionKind::Flag),
            ("noindex", OptionKind::Flag),
        ])),
        Expansion::Body,
    );
    let xref: Arc<dyn Role> = Arc::new(BuiltinRole::xref());

    registry.register(
        Domain::new("rst")
            .with_directives(&["directive", "role"], &object)
            .with_directive("directive:option", Arc::new(option))
            .with_roles(&["dir", "role"], &xref),
    );
}
