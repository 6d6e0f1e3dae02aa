//! Standard domain: programs, options, glossaries and generic references.

use std::sync::Arc;

use super::{Domain, DomainRegistry, OBJECT_DESCRIPTION};
use crate::directive::{BuiltinDirective, Expansion};
use crate::role::BuiltinRole;
use crate::{Directive, DirectiveShape, OptionKind, OptionSpec, Role};

pub(super) fn register(registry: &mut DomainRegistry) {
    let object: Arc<dyn Directive> = Arc::new(BuiltinDirective::new(
        "desc",
        OBJECT_DESCRIPTION,
        Expansion::Body,
    ));
    let xref: Arc<dyn Role> = Arc::new(BuiltinRole::xref());

    registry.register(
        Domain::new("std")
            .with_directive(
                "program",
                Arc::new(BuiltinDirective::new(
                    "program",
                    DirectiveShape::new().required(1).final_whitespace(),
                    Expansion::Empty,
                )),
            )
            .with_directives(&["cmdoption", "option", "envvar"], &object)
            .with_directive(
                "glossary",
                Arc::new(BuiltinDirective::new(
                    "glossary",
                    DirectiveShape::new()
                        .content()
                        .options(OptionSpec::Declared(&[("sorted", OptionKind::Flag)])),
                    Expansion::Literal,
                )),
            )
            .with_directive(
                "productionlist",
                Arc::new(BuiltinDirective::new(
                    "productionlist",
                    DirectiveShape::new().required(1).final_whitespace(),
                    Expansion::Empty,
                )),
            )
            .with_roles(
                &[
                    "option", "envvar", "token", "term", "ref", "numref", "keyword", "doc",
                ],
                &xref,
            ),
    );
}
