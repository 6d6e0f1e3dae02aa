//! C domain.

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
    let namespace: Arc<dyn Directive> = Arc::new(BuiltinDirective::new(
        "namespace",
        DirectiveShape::new().required(1).final_whitespace(),
        Expansion::Empty,
    ));
    let xref: Arc<dyn Role> = Arc::new(BuiltinRole::xref());
    let expr: Arc<dyn Role> = Arc::new(BuiltinRole::text("desc_inline"));

    registry.register(
        Domain::new("c")
            .with_directives(
                &[
                    "member",
                    "var",
                    "function",
                    "macro",
                    "struct",
                    "union",
                    "enum",
                    "enumerator",
                    "type",
                    "alias",
                ],
                &object,
            )
            .with_directives(&["namespace", "namespace-push"], &namespace)
            .with_directive(
                "namespace-pop",
                Arc::new(BuiltinDirective::new(
                    "namespace",
                    DirectiveShape::new(),
                    Expansion::Empty,
                )),
            )
            .with_roles(
                &[
                    "member",
                    "var",
                    "func",
                    "macro",
                    "struct",
                    "union",
                    "enum",
                    "enumerator",
                    "type",
                ],
                &xref,
            )
            .with_roles(&["expr", "texpr"], &expr),
    );
}
