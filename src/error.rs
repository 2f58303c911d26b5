use std::fmt;
use std::io;

/// Errors surfaced while decoding curve points from their binary encoding.
///
/// Decoding never silently substitutes the identity or a default value; every
/// failure is reported to the caller.
#[derive(Debug)]
pub enum SerializationError {
    /// The input buffer is smaller than the declared encoding.
    ShortBuffer,
    /// The parsed (x, y) pair does not satisfy the curve equation.
    NotOnCurve,
    /// A compressed x coordinate yields a non-residue y².
    NoSquareRoot,
    /// The decoded point is on the curve but outside the prime-order subgroup.
    NotInSubgroup,
    /// At least one element of a batched decode failed.
    BatchDecode,
    /// An underlying io failure while streaming.
    Io(io::Error),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::ShortBuffer => write!(f, "input buffer smaller than the declared encoding"),
            SerializationError::NotOnCurve => write!(f, "invalid point: not on curve"),
            SerializationError::NoSquareRoot => {
                write!(f, "invalid compressed coordinate: square root doesn't exist")
            }
            SerializationError::NotInSubgroup => write!(f, "invalid point: subgroup check failed"),
            SerializationError::BatchDecode => write!(f, "point decompression failed"),
            SerializationError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializationError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SerializationError {
    fn from(e: io::Error) -> Self {
        // a truncated stream is the streaming analogue of a short buffer
        if e.kind() == io::ErrorKind::UnexpectedEof {
            SerializationError::ShortBuffer
        } else {
            SerializationError::Io(e)
        }
    }
}
