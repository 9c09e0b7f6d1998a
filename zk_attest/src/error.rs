use ark_std::{fmt, string::String};
use zkattest_utils::ArithmeticError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A point or scalar belongs to a different group than the one expected. Returns (expected, found)
    IncompatibleGroup(String, String),
    UnknownGroup(String),
    /// Group descriptor failed validation
    InvalidGroupParameters(&'static str),
    InvalidPointEncoding,
    PointNotOnCurve,
    /// Coordinate not below the field modulus
    CoordinateOutOfRange,
    /// Scalar not below the group order
    ScalarOutOfRange,
    PointAtInfinity,
    /// Both Pedersen bases are the same point
    EqualCommitmentBases,
    XCoordCantBeSame,
    /// The commitments are not to the coordinates of the given point
    IncorrectPointOpening,
    InvalidPointAddResult,
    NotAProduct,
    /// The result point is not the base multiplied by the scalar (plus the offset)
    InvalidScalarMultResult,
    /// The commitment does not open to the given scalar
    IncorrectScalarOpening,
    /// Coordinates of the committed points must be scalars of the committing group
    ScalarFieldBaseFieldMismatch,
    /// Verifier asked for more repetitions than the proof has. Returns (asked, present)
    InsufficientNumberOfRepetitions(usize, usize),
    ZeroRepetitions,
    /// A challenge has only this many bits so more repetitions add no soundness. Returns (asked, max)
    TooManyRepetitions(usize, usize),
    IndexOutOfBounds(usize, usize),
    EmptyValueList,
    /// The commitment does not open to the list entry at the given index
    CommitmentDoesNotOpenToValue(usize),
    InvalidSignature,
    EcdsaSigResponseNotInvertible,
    InvalidTransformedEcdsaSig,
    Arithmetic(ArithmeticError),
}

impl From<ArithmeticError> for Error {
    fn from(e: ArithmeticError) -> Self {
        Self::Arithmetic(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleGroup(expected, found) => {
                write!(f, "expected an element of {} but found one of {}", expected, found)
            }
            Self::UnknownGroup(name) => write!(f, "unknown group {}", name),
            Self::PointNotOnCurve => write!(f, "point is not on the curve"),
            Self::CoordinateOutOfRange => write!(f, "coordinate is not below the field modulus"),
            Self::ScalarOutOfRange => write!(f, "scalar is not below the group order"),
            e => write!(f, "{:?}", e),
        }
    }
}
