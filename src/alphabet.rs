//! Canonical Arabic alphabet table.
//!
//! The training server's label encoder assigns each letter an integer class
//! in this order, so prediction indices map back through the same table.
//! The ordering is load-bearing and must not change.

/// The 28 letters of the Arabic alphabet in canonical order.
pub const ALPHABET: [char; 28] = [
    'ا', 'ب', 'ت', 'ث', 'ج', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ع',
    'غ', 'ف', 'ق', 'ك', 'ل', 'م', 'ن', 'ه', 'و', 'ي',
];

/// Look up the letter for a prediction index.
///
/// # Examples
///
/// ```
/// use mashq::alphabet::letter_at;
///
/// assert_eq!(letter_at(3), Some('ث'));
/// assert_eq!(letter_at(28), None);
/// ```
#[must_use]
pub fn letter_at(index: usize) -> Option<char> {
    ALPHABET.get(index).copied()
}

/// Whether `label` is exactly one letter from the canonical alphabet.
#[must_use]
pub fn contains(label: &str) -> bool {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => ALPHABET.contains(&letter),
        _ => false,
    }
}
