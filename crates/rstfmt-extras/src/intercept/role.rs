use std::sync::Arc;

use rstfmt_rst::role::split_explicit_title;
use rstfmt_rst::util::unescape;
use rstfmt_rst::{Inline, Role, RoleError, RoleInvocation, RoleKind};

use crate::nodes::{RefRoleNode, RoleNode};
use crate::policy::canonical_role_name;

/// Role that records its name and text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenericRole;

impl Role for GenericRole {
    fn run(&self, invocation: &RoleInvocation<'_>) -> Result<Vec<Inline>, RoleError> {
        Ok(vec![Inline::Custom(Box::new(RoleNode {
            role: canonical_role_name(invocation.name).to_owned(),
            rawtext: invocation.rawtext.to_owned(),
            text: unescape(invocation.text, true),
        }))])
    }
}

/// Role that records a cross-reference target and title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceRole;

impl Role for ReferenceRole {
    fn kind(&self) -> RoleKind {
        RoleKind::Reference
    }

    fn run(&self, invocation: &RoleInvocation<'_>) -> Result<Vec<Inline>, RoleError> {
        let node = match split_explicit_title(invocation.text) {
            Some((title, target)) => RefRoleNode {
                rawtext: invocation.rawtext.to_owned(),
                name: invocation.name.to_lowercase(),
                has_explicit_title: true,
                target: unescape(target, false),
                title: unescape(title, false),
            },
            None => {
                let text = unescape(invocation.text, false);
                RefRoleNode {
                    rawtext: invocation.rawtext.to_owned(),
                    name: invocation.name.to_lowercase(),
                    has_explicit_title: false,
                    target: text.clone(),
                    title: text,
                }
            }
        };
        Ok(vec![Inline::Custom(Box::new(node))])
    }
}

/// Passthrough replacement for a role, chosen by its capability.
#[must_use]
pub fn intercept_role(original: &dyn Role) -> Arc<dyn Role> {
    match original.kind() {
        RoleKind::Reference => Arc::new(ReferenceRole),
        RoleKind::Generic => Arc::new(GenericRole),
    }
}
