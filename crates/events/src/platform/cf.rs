//! CFNotificationCenter-backed notification center.
//!
//! CoreFoundation callbacks carry no closure environment, only the
//! `observer` pointer passed at registration. We pass a registration id as
//! that pointer and look the handler up in a process-wide table, so a
//! callback racing with removal finds nothing instead of a freed handler.

use crate::center::{NotificationCenter, NotificationHandler, ObserverToken};
use core_foundation::base::{CFIndex, TCFType};
use core_foundation::dictionary::CFDictionaryRef;
use core_foundation::string::{CFString, CFStringRef};
use std::collections::HashMap;
use std::ffi::c_void;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

type CFNotificationCenterRef = *mut c_void;

type CFNotificationCallback = extern "C-unwind" fn(
    center: CFNotificationCenterRef,
    observer: *mut c_void,
    name: CFStringRef,
    object: *const c_void,
    user_info: CFDictionaryRef,
);

const SUSPENSION_DELIVER_IMMEDIATELY: CFIndex = 4;

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    #[cfg(target_os = "macos")]
    fn CFNotificationCenterGetDistributedCenter() -> CFNotificationCenterRef;
    fn CFNotificationCenterGetLocalCenter() -> CFNotificationCenterRef;
    fn CFNotificationCenterAddObserver(
        center: CFNotificationCenterRef,
        observer: *const c_void,
        call_back: CFNotificationCallback,
        name: CFStringRef,
        object: *const c_void,
        suspension_behavior: CFIndex,
    );
    fn CFNotificationCenterRemoveObserver(
        center: CFNotificationCenterRef,
        observer: *const c_void,
        name: CFStringRef,
        object: *const c_void,
    );
}

fn handlers() -> &'static Mutex<HashMap<u64, NotificationHandler>> {
    static HANDLERS: OnceLock<Mutex<HashMap<u64, NotificationHandler>>> = OnceLock::new();
    HANDLERS.get_or_init(|| Mutex::new(HashMap::new()))
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

extern "C-unwind" fn notification_callback(
    _center: CFNotificationCenterRef,
    observer: *mut c_void,
    _name: CFStringRef,
    _object: *const c_void,
    _user_info: CFDictionaryRef,
) {
    let id = observer as usize as u64;
    let handler = match handlers().lock() {
        Ok(guard) => guard.get(&id).map(Arc::clone),
        Err(_) => None,
    };

    if let Some(handler) = handler {
        handler();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CenterKind {
    #[cfg(target_os = "macos")]
    Distributed,
    Local,
}

/// CoreFoundation notification center.
///
/// Notifications arrive on the registering process's main run loop, so the
/// main thread must be running one.
#[derive(Debug, Clone, Copy)]
pub struct CfNotificationCenter {
    kind: CenterKind,
}

impl CfNotificationCenter {
    /// System-wide, cross-process center (macOS only).
    #[cfg(target_os = "macos")]
    pub fn distributed() -> Self {
        Self {
            kind: CenterKind::Distributed,
        }
    }

    /// Same-process center, bridged to NSNotificationCenter.defaultCenter.
    pub fn local() -> Self {
        Self {
            kind: CenterKind::Local,
        }
    }

    fn raw(&self) -> CFNotificationCenterRef {
        unsafe {
            match self.kind {
                #[cfg(target_os = "macos")]
                CenterKind::Distributed => CFNotificationCenterGetDistributedCenter(),
                CenterKind::Local => CFNotificationCenterGetLocalCenter(),
            }
        }
    }
}

impl NotificationCenter for CfNotificationCenter {
    fn add_observer(&self, name: &str, handler: NotificationHandler) -> Option<ObserverToken> {
        let center = self.raw();
        if center.is_null() {
            return None;
        }

        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        handlers().lock().ok()?.insert(id, handler);

        let cf_name = CFString::new(name);
        unsafe {
            CFNotificationCenterAddObserver(
                center,
                id as usize as *const c_void,
                notification_callback,
                cf_name.as_concrete_TypeRef(),
                std::ptr::null(),
                SUSPENSION_DELIVER_IMMEDIATELY,
            );
        }

        tracing::debug!(name, id, center = ?self.kind, "added notification observer");
        Some(ObserverToken(id))
    }

    fn remove_observer(&self, token: ObserverToken) {
        // Drop the handler first: an in-flight callback now finds nothing
        let removed = handlers()
            .lock()
            .map(|mut guard| guard.remove(&token.0).is_some())
            .unwrap_or(false);
        if !removed {
            return;
        }

        let center = self.raw();
        if center.is_null() {
            return;
        }

        // A null name removes every registration of this observer id
        unsafe {
            CFNotificationCenterRemoveObserver(
                center,
                token.0 as usize as *const c_void,
                std::ptr::null(),
                std::ptr::null(),
            );
        }
        tracing::debug!(id = token.0, center = ?self.kind, "removed notification observer");
    }
}
