/// Numeric conversion helpers.
///
/// Operands such as shift amounts, exponents and factorial arguments are
/// arbitrary-size integers in the calculator but must become machine integers
/// before they can drive a loop or a library call. These helpers perform that
/// narrowing and report the calculator's own errors when it is not possible.
pub mod num;
