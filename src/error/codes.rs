#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    DirectoryNotFound = 3,
    UnknownOrganizer = 4,
    OverwriteConflict = 5,
    NameResolution = 6,
    ProbeError = 7,
    RenameError = 8,
    PermissionError = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
