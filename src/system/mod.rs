//! Operating-system collaborators used by maintenance steps

mod privilege;
mod process;
mod restore;

pub use privilege::{AssumePrivileges, PrivilegeProbe, SystemPrivileges, is_elevated};
pub use process::{CommandRunner, ProcessOutput, SystemCommandRunner, decode_output};
pub use restore::{PowerShellRestorePoints, RestorePointInfo, RestorePointProvider};
