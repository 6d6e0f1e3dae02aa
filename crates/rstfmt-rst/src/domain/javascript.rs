//! JavaScript domain.

use std::sync::Arc;

use super::{Domain, DomainRegistry, OBJECT_DESCRIPTION};
use crate::directive::{BuiltinDirective, Expansion};
use crate::role::BuiltinRole;
use crate::{Directive, DirectiveShape, Role};

pub(super) fn register(registry: &mut DomainRegistry) {
    let object: Arc<dyn Directive> = Arc::new(BuiltinDirective::new(
        "desc",
        OBJECT_DESCRIPTION,
        Expansion::Body,
    ));
    let xref: Arc<dyn Role> = Arc::new(BuiltinRole::xref());

    registry.register(
        Domain::new("js")
            .with_directives(
                &["function", "method", "class", "data", "attribute"],
                &object,
            )
            .with_directive(
                "module",
                Arc::new(BuiltinDirective::new(
                    "module",
                    DirectiveShape::new().required(1).content(),
                    Expansion::Body,
                )),
            )
            .with_roles(&["func", "meth", "class", "data", "attr", "mod"], &xref),
    );
}
