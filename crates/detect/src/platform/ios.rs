//! iOS lock query through UIApplication.

use crate::query::LockQuery;
use crate::session::protected_data_verdict;
use lockwatch_context::ScreenState;
use objc::runtime::{Class, Object, BOOL, NO};
use objc::{msg_send, sel, sel_impl};

/// Reads `UIApplication.sharedApplication.isProtectedDataAvailable`.
///
/// UIKit must be touched from the main thread; calls from other threads
/// answer `Unknown`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProtectedDataQuery;

impl LockQuery for ProtectedDataQuery {
    fn query(&self) -> ScreenState {
        unsafe {
            let Some(thread_class) = Class::get("NSThread") else {
                return ScreenState::Unknown;
            };
            let is_main: BOOL = msg_send![thread_class, isMainThread];
            if is_main == NO {
                tracing::debug!("protected data query off the main thread");
                return ScreenState::Unknown;
            }

            // Absent in extensions, where UIApplication is unavailable
            let Some(app_class) = Class::get("UIApplication") else {
                return ScreenState::Unknown;
            };
            let app: *mut Object = msg_send![app_class, sharedApplication];
            if app.is_null() {
                return ScreenState::Unknown;
            }

            let available: BOOL = msg_send![app, isProtectedDataAvailable];
            protected_data_verdict(available != NO)
        }
    }
}
