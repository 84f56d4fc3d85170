//! Example: Print the lock state and watch transitions.
//!
//! Run with: cargo run -p lockwatch --example watch_lock
//!
//! Lock the screen (ctrl-cmd-Q on macOS) while it runs to see events.

use lockwatch::{LockWatch, LockWatchConfig, ScreenState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const RUN_FOR: Duration = Duration::from_secs(30);

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockwatch=debug")),
        )
        .init();

    let watch = Arc::new(LockWatch::new(LockWatchConfig::from_env()));

    println!("=== lockwatch ===");
    println!("Context:     {}", watch.context());
    match watch.protected_file_path() {
        Some(path) => println!("Marker:      {}", path.display()),
        None => println!("Marker:      (none)"),
    }
    println!("Initialized: {}", watch.initialize());
    println!("State:       {}\n", watch.current_state());

    let _subscription = watch.observe_state_changes(|state| {
        println!("[event] screen {state}");
    });

    // Extensions get no notifications; poll there instead
    let _poller = watch.is_app_extension().then(|| {
        watch.poll_state_changes(Arc::new(|state: ScreenState| {
            println!("[poll]  screen {state}");
        }))
    });

    println!("Running for {} seconds... (Ctrl+C to stop)\n", RUN_FOR.as_secs());
    run_for(RUN_FOR);

    println!("\nDone.");
}

/// Distributed notifications are delivered on the main run loop.
#[cfg(target_os = "macos")]
fn run_for(duration: Duration) {
    use core_foundation::runloop::{kCFRunLoopDefaultMode, CFRunLoop};
    CFRunLoop::run_in_mode(unsafe { kCFRunLoopDefaultMode }, duration, false);
}

#[cfg(not(target_os = "macos"))]
fn run_for(duration: Duration) {
    std::thread::sleep(duration);
}
