//! Common regex patterns for order-form extraction.
//!
//! OCR text is normalized to printable ASCII before matching, so digit and
//! letter classes are spelled out as ASCII ranges.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Record anchor: a line opening with a five-digit customer ID...
    pub static ref RECORD_ID_PREFIX: Regex = Regex::new(
        r"^[0-9]{5}\b"
    ).unwrap();

    // ...and carrying an email-shaped token somewhere after it
    pub static ref EMAIL_LOOSE: Regex = Regex::new(
        r"[\w.-]+@[\w.-]+\.\w+"
    ).unwrap();

    // Email pattern
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Phone pattern (North American format)
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+1[-. ]?)?(?:\([0-9]{3}\)[-. ]?|\b[0-9]{3}[-. ]?)[0-9]{3}[-. ]?[0-9]{4}\b"
    ).unwrap();

    // Numeric dates: 1/2/80, 01-02-1980
    pub static ref DATE: Regex = Regex::new(
        r"\b[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}\b"
    ).unwrap();

    // US zip code, optionally ZIP+4
    pub static ref ZIP_CODE: Regex = Regex::new(
        r"\b[0-9]{5}(?:-[0-9]{4})?\b"
    ).unwrap();

    // Dollar amounts: $45, $45.00, $1,200.50
    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(
        r"\$\s?(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]{1,2})?"
    ).unwrap();

    // State code directly followed by a zip code
    pub static ref STATE_ZIP: Regex = Regex::new(
        r"\b([A-Z]{2})\s+([0-9]{5})\b"
    ).unwrap();

    // Sex markers; FEMALE must be checked first
    pub static ref FEMALE: Regex = Regex::new(r"(?i)\bFEMALE\b").unwrap();
    pub static ref MALE: Regex = Regex::new(r"(?i)\bMALE\b").unwrap();
}

/// Build a case-insensitive whole-word matcher for a literal term.
pub fn whole_word(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
}
