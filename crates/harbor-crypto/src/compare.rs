use subtle::ConstantTimeEq;

/// Byte comparison whose running time does not depend on where inputs differ.
/// Inputs of different length compare unequal.
pub fn constant_time_eq(expected: &[u8], provided: &[u8]) -> bool {
    expected.ct_eq(provided).into()
}
