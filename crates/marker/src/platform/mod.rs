//! Platform-specific protected file creation.

#[cfg(target_os = "ios")]
mod ios;

#[cfg(target_os = "ios")]
pub use ios::create_protected_file;

#[cfg(not(target_os = "ios"))]
pub fn create_protected_file(path: &std::path::Path) -> Result<(), crate::MarkerError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(crate::MarkerError::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}
