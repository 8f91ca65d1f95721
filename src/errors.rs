use std::{convert::Infallible, fmt::Display, num::TryFromIntError};

/// Jenks Errors
#[derive(Debug, PartialEq, Eq)]
pub enum JenksErr {
    EmptyInputError,
    TooFewClassesError,
    TooManyClassesError,
    TooFewDistinctValuesError,
    RangeOverflowError,
    ConversionError,
    BacktraceError,
    LowWindowError,
    HighWindowError,
    InfallibleError,
}

impl Display for JenksErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JenksErr::EmptyInputError => {
                write!(f, "You can't classify an empty sequence of values")
            }
            JenksErr::TooFewClassesError => {
                write!(f, "You can't specify 0 classes. Try a positive number")
            }
            JenksErr::TooManyClassesError => {
                write!(
                    f,
                    "You can't generate more classes than there are data values"
                )
            }
            JenksErr::TooFewDistinctValuesError => {
                write!(
                    f,
                    "You can't generate more classes than there are distinct data values"
                )
            }
            JenksErr::RangeOverflowError => {
                write!(
                    f,
                    "The data's range is too wide to classify in its numeric type"
                )
            }
            JenksErr::ConversionError => {
                write!(f, "An error occurred during numeric conversion")
            }
            JenksErr::BacktraceError => {
                write!(f, "A class boundary fell outside the input data")
            }
            JenksErr::LowWindowError => {
                write!(f, "Couldn't get last element of low window")
            }
            JenksErr::HighWindowError => {
                write!(f, "Couldn't get first element of high window")
            }
            JenksErr::InfallibleError => {
                write!(f, "An infallible numeric conversion failed")
            }
        }
    }
}

impl From<Infallible> for JenksErr {
    fn from(_: Infallible) -> Self {
        JenksErr::InfallibleError
    }
}

impl From<TryFromIntError> for JenksErr {
    fn from(_: TryFromIntError) -> Self {
        JenksErr::ConversionError
    }
}

impl std::error::Error for JenksErr {}
