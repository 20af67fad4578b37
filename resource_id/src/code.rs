//! Fixed-length code encoding
//!
//! The counter is enlarged with a multiplier coprime to the alphabet size and
//! shifted by the salt, split into base-N digits, diffused (every digit is
//! offset by a multiple of the lowest digit) and finally permuted with a step
//! coprime to the code length.

/// Alphabet without the visually ambiguous `0`, `1`, `I`, `O`, `U` and `Z`
pub const DEFAULT_CHARS: &[char] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', //
    'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', //
    'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'X', 'Y',
];

const DEFAULT_N1: u64 = 17;
const DEFAULT_N2: usize = 5;
const DEFAULT_LEN: usize = 8;
const DEFAULT_SALT: u64 = 123_567_369;

/// Encoding parameters
///
/// `n1` must be coprime with the alphabet size and `n2` with `len`, otherwise
/// distinct counters may share a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeOptions {
    chars: Vec<char>,
    n1: u64,
    n2: usize,
    len: usize,
    salt: u64,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            chars: DEFAULT_CHARS.to_vec(),
            n1: DEFAULT_N1,
            n2: DEFAULT_N2,
            len: DEFAULT_LEN,
            salt: DEFAULT_SALT,
        }
    }
}

impl CodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alphabet; an alphabet with fewer than two symbols is ignored
    pub fn with_chars(mut self, chars: &[char]) -> Self {
        if chars.len() > 1 {
            self.chars = chars.to_vec();
        }
        self
    }

    pub fn with_n1(mut self, n1: u64) -> Self {
        if n1 > 0 {
            self.n1 = n1;
        }
        self
    }

    pub fn with_n2(mut self, n2: usize) -> Self {
        if n2 > 0 {
            self.n2 = n2;
        }
        self
    }

    pub fn with_len(mut self, len: usize) -> Self {
        if len > 0 {
            self.len = len;
        }
        self
    }

    /// Zero keeps the current salt
    pub fn with_salt(mut self, salt: u64) -> Self {
        if salt > 0 {
            self.salt = salt;
        }
        self
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn code_len(&self) -> usize {
        self.len
    }

    pub fn salt(&self) -> u64 {
        self.salt
    }
}

/// Encode `counter` into a code of `options.code_len()` symbols.
///
/// Injective for every `counter < chars.len().pow(len)` under fixed options.
pub fn new_code(counter: u64, options: &CodeOptions) -> String {
    let base = options.chars.len() as u128;
    let len = options.len;

    // 128-bit so that enlarging never wraps
    let mut value = counter as u128 * options.n1 as u128 + options.salt as u128;

    let mut digits = vec![0usize; len];
    for i in 0..len {
        let digit = (value % base) as usize;
        digits[i] = if i == 0 {
            digit
        } else {
            (digit + i * digits[0]) % base as usize
        };
        value /= base;
    }

    (0..len)
        .map(|i| options.chars[digits[(i * options.n2) % len]])
        .collect()
}
