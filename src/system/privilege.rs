//! Elevation detection
//!
//! Restore points, SFC and DISM all require an elevated process. Steps ask a
//! [`PrivilegeProbe`] before launching anything so a missing elevation is reported
//! up front instead of surfacing as an obscure tool error.

/// Answers whether the current process runs with administrative rights
pub trait PrivilegeProbe: Send + Sync {
    fn is_elevated(&self) -> bool;
}

/// Queries the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPrivileges;

impl PrivilegeProbe for SystemPrivileges {
    fn is_elevated(&self) -> bool {
        is_elevated()
    }
}

/// Fixed answer, for dry runs and tests
#[derive(Debug, Clone, Copy)]
pub struct AssumePrivileges(pub bool);

impl PrivilegeProbe for AssumePrivileges {
    fn is_elevated(&self) -> bool {
        self.0
    }
}

#[cfg(target_os = "windows")]
pub fn is_elevated() -> bool {
    // SAFETY: IsUserAnAdmin takes no arguments and only inspects the process token.
    unsafe { windows::Win32::UI::Shell::IsUserAnAdmin().as_bool() }
}

#[cfg(unix)]
pub fn is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(any(unix, target_os = "windows")))]
pub fn is_elevated() -> bool {
    false
}
