//! Key symbol mapping.
//!
//! Maps a raw key identity to a small integer code from a fixed 50-symbol
//! alphabet. Identities are case-folded before lookup; anything outside the
//! alphabet maps to [`UNKNOWN_KEY`]. Downstream consumers see codes only,
//! never the identity strings themselves.

/// Normalized key code in the closed range `0..=50`.
pub type KeyCode = u8;

/// Sentinel code for any identity outside the recognized alphabet.
pub const UNKNOWN_KEY: KeyCode = 0;

/// Code for the error-correction key.
pub const BACKSPACE_KEY: KeyCode = 47;

/// Highest assigned code.
pub const MAX_KEY_CODE: KeyCode = 50;

/// Map a raw key identity to its normalized code.
///
/// Total function: never fails, unknown identities map to [`UNKNOWN_KEY`].
pub fn key_code(identity: &str) -> KeyCode {
    let folded = identity.to_lowercase();
    match folded.as_str() {
        // Letters (1-26)
        "a" => 1,
        "b" => 2,
        "c" => 3,
        "d" => 4,
        "e" => 5,
        "f" => 6,
        "g" => 7,
        "h" => 8,
        "i" => 9,
        "j" => 10,
        "k" => 11,
        "l" => 12,
        "m" => 13,
        "n" => 14,
        "o" => 15,
        "p" => 16,
        "q" => 17,
        "r" => 18,
        "s" => 19,
        "t" => 20,
        "u" => 21,
        "v" => 22,
        "w" => 23,
        "x" => 24,
        "y" => 25,
        "z" => 26,

        // Digits (27-36)
        "0" => 27,
        "1" => 28,
        "2" => 29,
        "3" => 30,
        "4" => 31,
        "5" => 32,
        "6" => 33,
        "7" => 34,
        "8" => 35,
        "9" => 36,

        // Common punctuation (37-46)
        " " => 37,
        "." => 38,
        "," => 39,
        "!" => 40,
        "?" => 41,
        ":" => 42,
        ";" => 43,
        "'" => 44,
        "\"" => 45,
        "-" => 46,

        // Control keys (47-50)
        "backspace" => BACKSPACE_KEY,
        "enter" => 48,
        "tab" => 49,
        "shift" => 50,

        _ => UNKNOWN_KEY,
    }
}

/// Check whether an identity denotes the error-correction key.
pub fn is_error_key(identity: &str) -> bool {
    identity.eq_ignore_ascii_case("backspace")
}
