//! Python domain.

use std::sync::Arc;

use super::{Domain, DomainRegistry, OBJECT_DESCRIPTION};
use crate::directive::{BuiltinDirective, Expansion};
use crate::role::BuiltinRole;
use crate::{Directive, DirectiveShape, OptionKind, OptionSpec, Role};

const MODULE: DirectiveShape = DirectiveShape::new()
    .required(1)
    .content()
    .options(OptionSpec::Declared(&[
        ("platform", OptionKind::Unchanged),
        ("synopsis", OptionKind::Unchanged),
        ("no-index", OptionKind::Flag),
        ("noindex", OptionKind::Flag),
        ("no-contents-entry", OptionKind::Flag),
        ("deprecated", OptionKind::Flag),
    ]));

pub(super) fn register(registry: &mut DomainRegistry) {
    let object: Arc<dyn Directive> = Arc::new(BuiltinDirective::new(
        "desc",
        OBJECT_DESCRIPTION,
        Expansion::Body,
    ));
    let xref: Arc<dyn Role> = Arc::new(BuiltinRole::xref());

    registry.register(
        Domain::new("py")
            .with_directives(
                &[
                    "function",
                    "data",
                    "class",
                    "exception",
                    "method",
                    "classmethod",
                    "staticmethod",
                    "attribute",
                    "property",
                    "type",
                    "decorator",
                    "decoratormethod",
                ],
                &object,
            )
            .with_directive(
                "module",
                Arc::new(BuiltinDirective::new("module", MODULE, Expansion::Body)),
            )
            .with_directive(
                "currentmodule",
                Arc::new(BuiltinDirective::new(
                    "currentmodule",
                    DirectiveShape::new().required(1),
                    Expansion::Empty,
                )),
            )
            .with_roles(
                &[
                    "data", "exc", "func", "class", "const", "attr", "type", "meth", "mod", "obj",
                ],
                &xref,
            ),
    );
}
