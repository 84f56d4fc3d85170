//! Execution context definitions and classification logic.
//!
//! Pure domain logic - no I/O, no platform dependencies.

use serde::{Deserialize, Serialize};

/// The kind of process hosting lockwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// Full application process. Direct OS lock queries are available.
    #[default]
    MainProcess,

    /// App extension with a normal sandbox. No direct lock query, but the
    /// shared container is writable so the marker file works.
    RestrictedExtension,

    /// Widget-style extension. Nothing trustworthy is reachable.
    UltraRestrictedExtension,
}

impl ExecutionContext {
    /// Returns a human-readable label for the context.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionContext::MainProcess => "main process",
            ExecutionContext::RestrictedExtension => "app extension",
            ExecutionContext::UltraRestrictedExtension => "widget extension",
        }
    }

    /// True for both extension kinds.
    pub fn is_app_extension(&self) -> bool {
        !matches!(self, ExecutionContext::MainProcess)
    }

    pub fn is_widget_extension(&self) -> bool {
        matches!(self, ExecutionContext::UltraRestrictedExtension)
    }
}

impl std::fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Extension-point identifiers that mark a widget-style extension.
pub const WIDGET_EXTENSION_POINTS: &[&str] = &[
    "com.apple.widgetkit-extension",
    "com.apple.widget-extension",
];

/// Package type Apple assigns to app extension bundles.
const EXTENSION_PACKAGE_TYPE: &str = "XPC!";

/// Bundle extension used by app extensions.
const EXTENSION_BUNDLE_SUFFIX: &str = "appex";

/// Packaging metadata of the running process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMetadata {
    /// File extension of the enclosing bundle directory (e.g. "app", "appex")
    pub bundle_extension: Option<String>,

    /// CFBundlePackageType (e.g. "APPL", "XPC!")
    pub package_type: Option<String>,

    /// NSExtension.NSExtensionPointIdentifier, present only for extensions
    pub extension_point: Option<String>,

    /// CFBundleIdentifier
    pub bundle_id: Option<String>,
}

impl BundleMetadata {
    /// Whether the packaging has the shape of an app extension.
    pub fn is_extension_bundle(&self) -> bool {
        self.bundle_extension.as_deref() == Some(EXTENSION_BUNDLE_SUFFIX)
            || self.package_type.as_deref() == Some(EXTENSION_PACKAGE_TYPE)
    }

    pub fn is_widget_extension_point(&self) -> bool {
        self.extension_point
            .as_deref()
            .is_some_and(|point| WIDGET_EXTENSION_POINTS.contains(&point))
    }
}

/// Classify the execution context from packaging metadata.
///
/// Priority:
/// 1. Not extension-shaped (or no metadata at all) -> MainProcess
/// 2. Widget extension point declared -> UltraRestrictedExtension
/// 3. Any other extension -> RestrictedExtension
pub fn classify(metadata: Option<&BundleMetadata>) -> ExecutionContext {
    let Some(metadata) = metadata else {
        return ExecutionContext::MainProcess;
    };

    if !metadata.is_extension_bundle() {
        return ExecutionContext::MainProcess;
    }

    if metadata.is_widget_extension_point() {
        return ExecutionContext::UltraRestrictedExtension;
    }

    ExecutionContext::RestrictedExtension
}
