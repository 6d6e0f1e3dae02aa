//! Math domain.

use std::sync::Arc;

use super::{Domain, DomainRegistry};
use crate::role::BuiltinRole;

pub(super) fn register(registry: &mut DomainRegistry) {
    registry.register(Domain::new("math").with_role("eq", Arc::new(BuiltinRole::xref())));
}
