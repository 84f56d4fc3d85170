//! Bundle discovery from the running executable.
//!
//! Walks up from the executable path to the innermost `.appex` or `.app`
//! directory and reads its Info.plist. Handles both the flat iOS layout
//! (`Foo.appex/Info.plist`) and the macOS layout (`Foo.appex/Contents/Info.plist`).

use crate::context::BundleMetadata;
use crate::provider::BundleProvider;
use std::path::{Path, PathBuf};

/// Reads metadata of the bundle that encloses the current executable.
#[derive(Debug, Clone, Default)]
pub struct ExecutableBundleProvider {
    /// Overrides `std::env::current_exe()` when set
    executable: Option<PathBuf>,
}

impl ExecutableBundleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable path instead of the running one.
    pub fn with_executable(path: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(path.into()),
        }
    }

    fn executable(&self) -> Option<PathBuf> {
        match &self.executable {
            Some(path) => Some(path.clone()),
            None => std::env::current_exe().ok(),
        }
    }
}

impl BundleProvider for ExecutableBundleProvider {
    fn bundle_metadata(&self) -> Option<BundleMetadata> {
        let exe = self.executable()?;
        let bundle = find_enclosing_bundle(&exe)?;
        read_bundle_metadata(bundle)
    }
}

/// Find the innermost `.appex` or `.app` ancestor of `path`.
///
/// An extension nested inside an app (`Host.app/PlugIns/Ext.appex/Ext`)
/// resolves to the extension, not the host.
pub fn find_enclosing_bundle(path: &Path) -> Option<&Path> {
    let mut current = Some(path);

    while let Some(p) = current {
        if is_bundle_dir(p) {
            return Some(p);
        }
        current = p.parent();
    }

    None
}

fn is_bundle_dir(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("app") | Some("appex")
    )
}

/// Read packaging metadata from a bundle directory.
///
/// Returns `None` if no Info.plist exists or it cannot be parsed.
pub fn read_bundle_metadata(bundle_path: &Path) -> Option<BundleMetadata> {
    let plist_path = [
        bundle_path.join("Info.plist"),
        bundle_path.join("Contents/Info.plist"),
    ]
    .into_iter()
    .find(|p| p.is_file())?;

    let plist_data = std::fs::read(&plist_path).ok()?;
    let plist: plist::Dictionary = match plist::from_bytes(&plist_data) {
        Ok(dict) => dict,
        Err(e) => {
            tracing::warn!(path = %plist_path.display(), error = %e, "unreadable Info.plist");
            return None;
        }
    };

    let string_value = |key: &str| {
        plist
            .get(key)
            .and_then(|v| v.as_string())
            .map(|s| s.to_string())
    };

    let extension_point = plist
        .get("NSExtension")
        .and_then(|v| v.as_dictionary())
        .and_then(|ext| ext.get("NSExtensionPointIdentifier"))
        .and_then(|v| v.as_string())
        .map(|s| s.to_string());

    Some(BundleMetadata {
        bundle_extension: bundle_path
            .extension()
            .and_then(|s| s.to_str())
            .map(String::from),
        package_type: string_value("CFBundlePackageType"),
        extension_point,
        bundle_id: string_value("CFBundleIdentifier"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{classify, ExecutionContext};

    const WIDGET_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleIdentifier</key>
    <string>com.example.host.widget</string>
    <key>CFBundlePackageType</key>
    <string>XPC!</string>
    <key>NSExtension</key>
    <dict>
        <key>NSExtensionPointIdentifier</key>
        <string>com.apple.widgetkit-extension</string>
    </dict>
</dict>
</plist>"#;

    #[test]
    fn test_find_enclosing_bundle_prefers_innermost() {
        let exe = Path::new("/Apps/Host.app/PlugIns/Widget.appex/Widget");
        assert_eq!(
            find_enclosing_bundle(exe),
            Some(Path::new("/Apps/Host.app/PlugIns/Widget.appex"))
        );
    }

    #[test]
    fn test_find_enclosing_bundle_none() {
        assert_eq!(find_enclosing_bundle(Path::new("/usr/local/bin/tool")), None);
    }

    #[test]
    fn test_read_ios_layout() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Widget.appex");
        std::fs::create_dir_all(&bundle).unwrap();
        std::fs::write(bundle.join("Info.plist"), WIDGET_PLIST).unwrap();

        let metadata = read_bundle_metadata(&bundle).unwrap();
        assert_eq!(metadata.bundle_extension.as_deref(), Some("appex"));
        assert_eq!(metadata.package_type.as_deref(), Some("XPC!"));
        assert_eq!(
            metadata.extension_point.as_deref(),
            Some("com.apple.widgetkit-extension")
        );
        assert_eq!(
            classify(Some(&metadata)),
            ExecutionContext::UltraRestrictedExtension
        );
    }

    #[test]
    fn test_read_macos_layout_via_executable() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Widget.appex");
        let macos_dir = bundle.join("Contents/MacOS");
        std::fs::create_dir_all(&macos_dir).unwrap();
        std::fs::write(bundle.join("Contents/Info.plist"), WIDGET_PLIST).unwrap();

        let provider = ExecutableBundleProvider::with_executable(macos_dir.join("Widget"));
        let metadata = provider.bundle_metadata().unwrap();
        assert_eq!(metadata.bundle_id.as_deref(), Some("com.example.host.widget"));
    }

    #[test]
    fn test_malformed_plist_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("Broken.appex");
        std::fs::create_dir_all(&bundle).unwrap();
        std::fs::write(bundle.join("Info.plist"), "not a plist").unwrap();

        let metadata = read_bundle_metadata(&bundle);
        assert!(metadata.is_none());
        assert_eq!(classify(metadata.as_ref()), ExecutionContext::MainProcess);
    }
}
