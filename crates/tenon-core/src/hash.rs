use xxhash_rust::xxh64::xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    if value == 0 {
        return "0".repeat(11);
    }
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        let idx = (value % 62) as usize;
        result.push(BASE62_CHARS[idx]);
        value /= 62;
    }
    // Pad to 11 chars
    while result.len() < 11 {
        result.push(b'0');
    }
    result.reverse();
    String::from_utf8(result).expect("base62 chars are valid UTF-8")
}

/// Compute the canonical cache key for a set of contract names.
///
/// key = base62(xxhash64(sorted, deduplicated names joined by NUL))
///
/// The key is order-independent: any permutation of the same name set
/// produces the same key. Used by the engine's implements-base memo cache.
pub fn cache_key(names: &[&str]) -> String {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut input = String::with_capacity(sorted.iter().map(|n| n.len() + 1).sum());
    for name in &sorted {
        input.push_str(name);
        input.push('\0'); // separator
    }

    let hash_value = xxh64(input.as_bytes(), 0);
    base62_encode(hash_value)
}
