//! iOS protected file creation via NSFileManager.

use crate::error::MarkerError;
use objc::runtime::{Class, Object, BOOL, NO};
use objc::{msg_send, sel, sel_impl};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

#[link(name = "Foundation", kind = "framework")]
extern "C" {
    static NSFileProtectionKey: *mut Object;
    static NSFileProtectionComplete: *mut Object;
}

/// Create an empty file protected with `NSFileProtectionComplete`.
///
/// The OS refuses this while the device is locked because the class key
/// for complete protection is unavailable.
pub fn create_protected_file(path: &Path) -> Result<(), MarkerError> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let created: BOOL = unsafe {
        let (Some(string_class), Some(dict_class), Some(fm_class)) = (
            Class::get("NSString"),
            Class::get("NSDictionary"),
            Class::get("NSFileManager"),
        ) else {
            return Err(MarkerError::ProtectionRejected(path.to_path_buf()));
        };

        let ns_path: *mut Object = msg_send![string_class, stringWithUTF8String: c_path.as_ptr()];
        if ns_path.is_null() {
            return Err(MarkerError::ProtectionRejected(path.to_path_buf()));
        }

        // [NSDictionary dictionaryWithObject:NSFileProtectionComplete forKey:NSFileProtectionKey]
        let attributes: *mut Object = msg_send![
            dict_class,
            dictionaryWithObject: NSFileProtectionComplete
            forKey: NSFileProtectionKey
        ];

        let manager: *mut Object = msg_send![fm_class, defaultManager];
        let empty: *mut Object = std::ptr::null_mut();
        msg_send![manager, createFileAtPath: ns_path contents: empty attributes: attributes]
    };

    if created == NO {
        return Err(MarkerError::ProtectionRejected(path.to_path_buf()));
    }
    Ok(())
}
