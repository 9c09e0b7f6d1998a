use ark_std::string::String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    /// The element has no inverse modulo the given modulus
    NotInvertible,
    /// Modulus of 0 or otherwise unusable for the requested operation
    InvalidModulus,
    /// The element is not a square modulo the given prime
    NonResidue,
    /// Value needs more bytes than the fixed width it was asked to fit in. Returns (needed, available)
    ValueTooLarge(usize, usize),
    ExpectedSameSizeSequences(usize, usize),
    /// Two interpolation nodes are equal modulo the modulus
    RepeatedInterpolationNode(usize, usize),
    InterpolationFailed,
    InvalidHex(String),
}
