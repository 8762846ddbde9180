/// Decode an unsigned register value as a two's-complement signed integer.
///
/// `raw` is first normalized modulo `2^bit_width`, so any integer input is
/// accepted; values with the high bit set come back negative.
pub fn signed_value(raw: i64, bit_width: u32) -> i64 {
    let modulus = 1i64 << bit_width;
    let unsigned = raw.rem_euclid(modulus);
    if unsigned >= modulus / 2 {
        unsigned - modulus
    } else {
        unsigned
    }
}

/// 16-bit convenience for register words off the wire.
pub fn signed16(raw: u16) -> i16 {
    signed_value(i64::from(raw), 16) as i16
}
