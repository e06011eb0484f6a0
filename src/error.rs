use std::env;
use std::fmt::{self, Debug, Display};
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_internal_error(&self) -> bool {
        (1..=99).contains(&self.code)
    }

    pub fn is_invalid_invocation_error(&self) -> bool {
        self.code == 100
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        config_error(err)
    }
}

pub fn invalid_invocation_error() -> Error {
    Error {
        code: 100,
        message: "invalid invocation".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn io_error(err: io::Error) -> Error {
    Error {
        code: 2,
        message: format!("io error: {}", err),
    }
}

pub fn config_error<T: Debug>(err: T) -> Error {
    Error {
        code: 3,
        message: format!("config error: {:?}", err),
    }
}

#[test]
fn error_classification_test() {
    assert!(invalid_invocation_error().is_invalid_invocation_error());
    assert!(!invalid_invocation_error().is_internal_error());

    assert!(invalid_input_error().is_invalid_input_error());
    assert!(!invalid_input_error().is_invalid_invocation_error());

    let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "closed").into();
    assert!(err.is_internal_error());
    assert_eq!(err.code, 2);

    let err: Error = env::VarError::NotPresent.into();
    assert!(err.is_internal_error());
}
