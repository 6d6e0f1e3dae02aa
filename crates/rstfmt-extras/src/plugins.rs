//! Optional third-party integrations.
//!
//! Each integration is compiled in behind a cargo feature of the same name
//! and can be switched off again through `extensions.plugins` in the
//! configuration. A plugin that is not compiled in is skipped without error.

use rstfmt_config::ExtensionsConfig;
use rstfmt_rst::DirectiveShape;

use crate::ExtrasError;

/// Directive contributed by a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDirective {
    /// Directive name.
    pub name: &'static str,
    /// Parsing shape as declared by the plugin.
    pub shape: DirectiveShape,
    /// Whether invocations are kept verbatim.
    pub raw: bool,
}

impl PluginDirective {
    const fn raw(name: &'static str, shape: DirectiveShape) -> Self {
        Self {
            name,
            shape,
            raw: true,
        }
    }

    const fn flowed(name: &'static str, shape: DirectiveShape) -> Self {
        Self {
            name,
            shape,
            raw: false,
        }
    }
}

/// Optional integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plugin {
    /// Plugin name, also the cargo feature name.
    pub name: &'static str,
    /// Whether the plugin is compiled into this build.
    pub compiled: bool,
    /// Directives the plugin adds.
    pub directives: &'static [PluginDirective],
    /// Cross-reference roles the plugin adds.
    pub reference_roles: &'static [&'static str],
}

/// Shape of the `*diag` and `wavedrom` directives: an optional filename and
/// an inline diagram body.
const DIAGRAM: DirectiveShape = DirectiveShape::new().optional(1).final_whitespace().content();

/// Shape of the `doxygen*` directives.
const DOXYGEN: DirectiveShape = DirectiveShape::new().required(1).final_whitespace();

/// Every known plugin.
pub const PLUGINS: &[Plugin] = &[
    Plugin {
        name: "sphinx-tabs",
        compiled: cfg!(feature = "sphinx-tabs"),
        directives: &[
            PluginDirective::flowed("tabs", DirectiveShape::new().content()),
            PluginDirective::flowed(
                "tab",
                DirectiveShape::new().required(1).final_whitespace().content(),
            ),
            PluginDirective::flowed(
                "group-tab",
                DirectiveShape::new().required(1).final_whitespace().content(),
            ),
            PluginDirective::raw(
                "code-tab",
                DirectiveShape::new()
                    .required(1)
                    .optional(1)
                    .final_whitespace()
                    .content(),
            ),
        ],
        reference_roles: &[],
    },
    Plugin {
        name: "sphinx-click",
        compiled: cfg!(feature = "sphinx-click"),
        directives: &[PluginDirective::raw("click", DirectiveShape::new().required(1))],
        reference_roles: &[],
    },
    Plugin {
        name: "sphinx-argparse",
        compiled: cfg!(feature = "sphinx-argparse"),
        directives: &[PluginDirective::raw("argparse", DirectiveShape::new().content())],
        reference_roles: &[],
    },
    Plugin {
        name: "esp-docs",
        compiled: cfg!(feature = "esp-docs"),
        directives: &[
            PluginDirective::raw("include-build-file", DirectiveShape::new().required(1)),
            PluginDirective::raw("list", DirectiveShape::new().content()),
        ],
        reference_roles: &[
            "project",
            "project_file",
            "project_raw",
            "idf",
            "idf_file",
            "idf_raw",
            "component",
            "component_file",
            "component_raw",
            "example",
            "example_file",
            "example_raw",
            "link_to_translation",
        ],
    },
    Plugin {
        name: "sphinxcontrib-blockdiag",
        compiled: cfg!(feature = "sphinxcontrib-blockdiag"),
        directives: &[PluginDirective::raw("blockdiag", DIAGRAM)],
        reference_roles: &[],
    },
    Plugin {
        name: "sphinxcontrib-packetdiag",
        compiled: cfg!(feature = "sphinxcontrib-packetdiag"),
        directives: &[PluginDirective::raw("packetdiag", DIAGRAM)],
        reference_roles: &[],
    },
    Plugin {
        name: "sphinxcontrib-rackdiag",
        compiled: cfg!(feature = "sphinxcontrib-rackdiag"),
        directives: &[PluginDirective::raw("rackdiag", DIAGRAM)],
        reference_roles: &[],
    },
    Plugin {
        name: "sphinxcontrib-seqdiag",
        compiled: cfg!(feature = "sphinxcontrib-seqdiag"),
        directives: &[PluginDirective::raw("seqdiag", DIAGRAM)],
        reference_roles: &[],
    },
    Plugin {
        name: "sphinxcontrib-wavedrom",
        compiled: cfg!(feature = "sphinxcontrib-wavedrom"),
        directives: &[PluginDirective::raw("wavedrom", DIAGRAM)],
        reference_roles: &[],
    },
    Plugin {
        name: "breathe",
        compiled: cfg!(feature = "breathe"),
        directives: &[
            PluginDirective::raw("doxygenstruct", DOXYGEN),
            PluginDirective::raw("doxygenfunction", DOXYGEN),
        ],
        reference_roles: &[],
    },
];

/// Look up a plugin by name.
#[must_use]
pub fn plugin(name: &str) -> Option<&'static Plugin> {
    PLUGINS.iter().find(|plugin| plugin.name == name)
}

/// Plugins resolved for one registration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    enabled: Vec<&'static Plugin>,
    skipped: Vec<&'static str>,
}

impl Capabilities {
    /// Resolve enabled plugins from the build features and the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExtrasError::UnknownPlugin`] if the configuration names a
    /// plugin that does not exist.
    pub fn resolve(config: &ExtensionsConfig) -> Result<Self, ExtrasError> {
        if let Some(names) = &config.plugins
            && let Some(unknown) = names.iter().find(|name| plugin(name).is_none())
        {
            return Err(ExtrasError::UnknownPlugin(unknown.clone()));
        }

        let mut capabilities = Self::default();
        for plugin in PLUGINS {
            if plugin.compiled && config.allows_plugin(plugin.name) {
                capabilities.enabled.push(plugin);
            } else {
                capabilities.skipped.push(plugin.name);
            }
        }
        Ok(capabilities)
    }

    /// Plugins to register.
    pub fn enabled(&self) -> impl Iterator<Item = &'static Plugin> + '_ {
        self.enabled.iter().copied()
    }

    /// Plugins left out, either not compiled in or not allowed.
    #[must_use]
    pub fn skipped(&self) -> &[&'static str] {
        &self.skipped
    }

    /// Whether the named plugin is enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|plugin| plugin.name == name)
    }
}
