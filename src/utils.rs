use rand::Rng;

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// `len` random lowercase hex digits
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| HEX_DIGITS[rng.gen_range(0..16)] as char)
        .collect()
}

/// `0x` followed by 64 hex digits, the shape of a transaction hash
pub fn random_tx_hash() -> String {
    format!("0x{}", random_hex(&mut rand::thread_rng(), 64))
}

/// Keep `head` leading and `tail` trailing characters: `0x742d...f44e`
pub fn shorten(s: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= head + tail {
        return s.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}
