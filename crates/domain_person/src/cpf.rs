//! Brazilian CPF (Cadastro de Pessoas Físicas) tax IDs
//!
//! A CPF has 11 digits, written `XXX.XXX.XXX-XX`. The last two are check
//! digits derived from the first nine with a weighted modulo-11 sum:
//!
//! - first check digit: digits 1..9 weighted 10..2
//! - second check digit: digits 1..10 weighted 11..2
//!
//! Each check digit is `11 - (sum mod 11)`, with 10 and 11 collapsing to 0.
//! Numbers made of one repeated digit satisfy the checksum but are never
//! issued, so they are rejected explicitly.
//!
//! All functions accept formatted or bare input; anything that is not an
//! ASCII digit is ignored.
//!
//! # Examples
//!
//! ```rust
//! use domain_person::cpf;
//!
//! assert!(cpf::is_valid("123.456.789-09"));
//! assert_eq!(cpf::format("12345678909").as_deref(), Some("123.456.789-09"));
//! assert_eq!(cpf::unformat("123.456.789-09"), "12345678909");
//! assert_eq!(cpf::unformat(None), "");
//! ```

/// Number of digits in a CPF
pub const CPF_LENGTH: usize = 11;

/// Number of digits that carry identity (the rest are check digits)
pub const SEED_LENGTH: usize = 9;

/// Returns true if the input is a valid CPF, formatted or not
pub fn is_valid<'a>(input: impl Into<Option<&'a str>>) -> bool {
    let Some(input) = input.into() else {
        return false;
    };

    let digits = to_digits(&unformat(input));
    if digits.len() != CPF_LENGTH {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(&digits[..SEED_LENGTH]);
    let (first, second) = check_digits(&seed);

    digits[9] == first && digits[10] == second
}

/// Formats a CPF as `XXX.XXX.XXX-XX`
///
/// Returns `None` for absent input or when the input does not contain
/// exactly 11 digits. The check digits are not verified.
pub fn format<'a>(input: impl Into<Option<&'a str>>) -> Option<String> {
    let clean = unformat(input.into()?);
    if clean.len() != CPF_LENGTH {
        return None;
    }
    Some(format!(
        "{}.{}.{}-{}",
        &clean[0..3],
        &clean[3..6],
        &clean[6..9],
        &clean[9..11]
    ))
}

/// Strips every non-digit character
///
/// Absent input yields an empty string rather than `None`.
pub fn unformat<'a>(input: impl Into<Option<&'a str>>) -> String {
    input
        .into()
        .map(|s| s.chars().filter(char::is_ascii_digit).collect())
        .unwrap_or_default()
}

/// Computes both check digits for a nine-digit seed
///
/// Each seed entry must be in `0..=9`.
pub fn check_digits(seed: &[u8; SEED_LENGTH]) -> (u8, u8) {
    let first = check_digit(seed);

    let mut extended = [0u8; SEED_LENGTH + 1];
    extended[..SEED_LENGTH].copy_from_slice(seed);
    extended[SEED_LENGTH] = first;

    (first, check_digit(&extended))
}

/// Builds the formatted CPF that completes a nine-digit seed
///
/// Returns `None` if any seed entry is outside `0..=9`.
pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Option<String> {
    if seed.iter().any(|&d| d > 9) {
        return None;
    }
    let (first, second) = check_digits(seed);
    let digits: String = seed
        .iter()
        .chain([first, second].iter())
        .map(|d| char::from(b'0' + d))
        .collect();
    Some(format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    ))
}

/// Generates a random valid CPF, formatted
///
/// Intended for test data only; generated numbers may belong to real people.
pub fn generate_random() -> String {
    loop {
        let seed: [u8; SEED_LENGTH] = std::array::from_fn(|_| rand::random_range(0..10));
        // a repeated-digit seed completes to a repeated-digit CPF
        if seed.iter().any(|&d| d != seed[0]) {
            if let Some(cpf) = from_seed(&seed) {
                return cpf;
            }
        }
    }
}

fn check_digit(digits: &[u8]) -> u8 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(&digit, weight)| u32::from(digit) * weight)
        .sum();

    match 11 - (sum % 11) {
        d if d >= 10 => 0,
        d => d as u8,
    }
}

fn to_digits(clean: &str) -> Vec<u8> {
    clean.bytes().map(|b| b - b'0').collect()
}
