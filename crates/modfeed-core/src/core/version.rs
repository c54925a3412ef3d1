/// Version code used when a tag carries no usable digits
pub const FALLBACK_VERSION_CODE: u64 = 1;

/// Derive the integer version code published in an update manifest
///
/// Every ASCII digit of the tag is concatenated in order and parsed as an
/// integer, so `v1.2.3` becomes `123`. Tags without digits, or whose digits
/// overflow a `u64`, get [`FALLBACK_VERSION_CODE`].
pub fn version_code(tag: &str) -> u64 {
    let digits: String = tag.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return FALLBACK_VERSION_CODE;
    }
    digits.parse().unwrap_or(FALLBACK_VERSION_CODE)
}
