//! Tests for error types

use fakeping::core::SchedulerError;

#[test]
fn test_release_failed_error() {
    let err = SchedulerError::ReleaseFailed {
        id: 7,
        reason: "broken pipe".to_string(),
    };
    assert_eq!(format!("{}", err), "release 7 failed: broken pipe");
}

#[test]
fn test_release_panicked_error() {
    let err = SchedulerError::ReleasePanicked { id: 2 };
    assert_eq!(format!("{}", err), "release 2 panicked");
}

#[test]
fn test_invalid_command_error() {
    let err = SchedulerError::InvalidCommand("unknown subcommand `pong`".to_string());
    assert_eq!(format!("{}", err), "invalid command: unknown subcommand `pong`");
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: SchedulerError = io.into();
    assert_eq!(format!("{}", err), "io error: missing");
}
