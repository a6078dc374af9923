//! Multipart boundary tokens.

/// 26 dashes, as browsers emit.
pub const BOUNDARY_PREFIX: &str = "--------------------------";

const RANDOM_DIGITS: usize = 24;

/// 50-character boundary: the dash prefix plus 24 random hex digits.
pub fn generate_boundary() -> String {
    let mut boundary = String::with_capacity(BOUNDARY_PREFIX.len() + RANDOM_DIGITS);
    boundary.push_str(BOUNDARY_PREFIX);
    for _ in 0..RANDOM_DIGITS {
        let digit = rand::random_range(0..16u32);
        boundary.push(char::from_digit(digit, 16).unwrap_or('0'));
    }
    boundary
}
