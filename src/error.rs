use std::fmt;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

// Errors from editing a row list. These indicate a mismatch between the DOM and the model
// (e.g. a click on a row that has already been removed), not invalid user input. User input
// errors are `ValidityError`s.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ListEditError {
    NoSuchRow { index: usize, len: usize },
    UnknownOption { value: String },
}

impl fmt::Display for ListEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListEditError::NoSuchRow { index, len } => {
                write!(f, "row {index} does not exist (list has {len} rows)")
            }
            ListEditError::UnknownOption { value } => {
                write!(f, "\"{value}\" is not one of the available options")
            }
        }
    }
}

impl std::error::Error for ListEditError {}
