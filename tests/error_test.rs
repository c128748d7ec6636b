use std::io;
use std::path::PathBuf;

use piranhito::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid profile".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid profile");

    let err = Error::UnknownProfile {
        id: "Nope".to_string(),
        supported: "Orientamento, SnifferUtil".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Unknown project profile 'Nope' (supported: Orientamento, SnifferUtil)"
    );

    let err = Error::InvalidRandomDirective {
        pattern: "key".to_string(),
        directive: "@Random(x)".to_string(),
        reason: "length is not a positive integer".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid random directive '@Random(x)' for 'key': length is not a positive integer"
    );
}

#[test]
fn test_process_error_names_the_file() {
    let inner = Error::EncodingError {
        path: PathBuf::from("src/Main.swift"),
        reason: "invalid utf-8 sequence".to_string(),
    };
    let err = Error::ProcessError {
        source_path: PathBuf::from("src/Main.swift"),
        e: Box::new(inner),
    };

    let message = err.to_string();
    assert!(message.starts_with("Failed to process 'src/Main.swift': Encoding error"));
}
