//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - Configurable policy for newly chosen passwords
//! - Configurable cost (memory, iterations, parallelism)
//! - Optional application-wide pepper
//! - Zeroization of clear-text input
//! - Constant-time verification (delegated to `argon2`)
//!
//! Verification never fails loudly: a wrong password or an unreadable hash
//! is simply `false`.

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Policy
// ============================================================================

/// Rules applied when a password is set or changed
///
/// Never applied on sign-in: existing hashes must keep verifying even
/// after the policy is tightened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in Unicode code points
    pub min_length: usize,
    /// Maximum length in Unicode code points
    pub max_length: usize,
    /// Reject keyboard walks, digit runs and well-known passwords
    pub reject_common_patterns: bool,
}

impl PasswordPolicy {
    /// NIST SP 800-63B inspired policy (min 8, max 128, no common patterns)
    pub fn nist() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            reject_common_patterns: true,
        }
    }

    /// Non-empty passwords only, for accounts migrated from the legacy system
    pub fn legacy() -> Self {
        Self {
            min_length: 1,
            max_length: 128,
            reject_common_patterns: false,
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::nist()
    }
}

/// Unrecognized password policy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown password policy '{0}' (expected 'nist' or 'legacy')")]
pub struct UnknownPasswordPolicy(pub String);

impl FromStr for PasswordPolicy {
    type Err = UnknownPasswordPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nist" => Ok(Self::nist()),
            "legacy" => Ok(Self::legacy()),
            other => Err(UnknownPasswordPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::nist() {
            f.write_str("nist")
        } else if *self == Self::legacy() {
            f.write_str("legacy")
        } else {
            write!(f, "custom(min={}, max={})", self.min_length, self.max_length)
        }
    }
}

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a newly chosen password, validated against `policy`
    ///
    /// Unicode is NFKC-normalized before any check.
    pub fn new(raw: String, policy: &PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let candidate = Self::for_verification(raw);
        let normalized = candidate.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < policy.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: policy.min_length,
                actual: char_count,
            });
        }
        if char_count > policy.max_length {
            return Err(PasswordPolicyError::TooLong {
                max: policy.max_length,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if policy.reject_common_patterns && is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(candidate)
    }

    /// Wrap a password submitted for sign-in: normalization only, no policy
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2 hash in PHC string format (algorithm, version, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashCost {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    pub const OWASP: HashCost = HashCost {
        memory_kib: 19_456,
        iterations: 2,
        parallelism: 1,
    };

    /// Cheap parameters for tests and local development only
    pub const FAST: HashCost = HashCost {
        memory_kib: 1_024,
        iterations: 1,
        parallelism: 1,
    };
}

impl Default for HashCost {
    fn default() -> Self {
        Self::OWASP
    }
}

/// Salted, memory-hard one-way password hashing
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    pepper: Option<Vec<u8>>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
        Ok(Self { params, pepper })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let bytes = password.peppered(self.pepper.as_deref());

        let hash = self
            .argon2()
            .hash_password(&bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// Parameters are read from the PHC string, so hashes produced with an
    /// older cost keep verifying.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };
        let bytes = password.peppered(self.pepper.as_deref());

        // Argon2 uses constant-time comparison internally
        self.argon2().verify_password(&bytes, &parsed).is_ok()
    }

    /// Whether a stored hash was produced with other parameters than the current ones
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(stored) => {
                stored.m_cost() != self.params.m_cost()
                    || stored.t_cost() != self.params.t_cost()
                    || stored.p_cost() != self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Check for common weak patterns
fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // All same character (e.g., "aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if lower.chars().count() >= 3 && chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &[
        "qwerty",
        "azerty",
        "asdfgh",
        "zxcvbn",
        "qazwsx",
        "1qaz2wsx",
    ];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "motdepasse",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "football",
        "trustno1",
    ];
    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// Check if the digits of a string form an ascending or descending run
fn is_sequential_numbers(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let is_ascending = digits
        .windows(2)
        .all(|w| w[1] == w[0] + 1 || (w[0] == 9 && w[1] == 0));
    let is_descending = digits
        .windows(2)
        .all(|w| w[0] == w[1] + 1 || (w[0] == 0 && w[1] == 9));

    is_ascending || is_descending
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher(pepper: Option<&[u8]>) -> PasswordHasher {
        PasswordHasher::new(HashCost::FAST, pepper.map(<[u8]>::to_vec)).unwrap()
    }

    fn nist(raw: &str) -> Result<ClearTextPassword, PasswordPolicyError> {
        ClearTextPassword::new(raw.to_string(), &PasswordPolicy::nist())
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(nist("short"), Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "ab".repeat(100);
        assert!(matches!(
            nist(&long_password),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_whitespace_only() {
        assert!(matches!(
            nist("        "),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
        assert!(matches!(
            ClearTextPassword::new(String::new(), &PasswordPolicy::legacy()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        assert!(matches!(
            nist("Harbour\u{0007}Light"),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_password_common_pattern() {
        assert!(matches!(nist("password123"), Err(PasswordPolicyError::CommonPattern)));
        assert!(matches!(nist("qwertyuiop"), Err(PasswordPolicyError::CommonPattern)));
        assert!(matches!(nist("12345678"), Err(PasswordPolicyError::CommonPattern)));
        assert!(matches!(nist("zzzzzzzzzz"), Err(PasswordPolicyError::CommonPattern)));
    }

    #[test]
    fn test_valid_passwords() {
        assert!(nist("Catway#Long2025").is_ok());
        assert!(nist("ポンツーン安全です!").is_ok());
    }

    #[test]
    fn test_legacy_policy_accepts_short_passwords() {
        assert!(ClearTextPassword::new("pw123".to_string(), &PasswordPolicy::legacy()).is_ok());
    }

    #[test]
    fn test_policy_from_name() {
        assert_eq!("nist".parse(), Ok(PasswordPolicy::nist()));
        assert_eq!(" Legacy ".parse(), Ok(PasswordPolicy::legacy()));
        assert_eq!(
            "lenient".parse::<PasswordPolicy>(),
            Err(UnknownPasswordPolicy("lenient".to_string()))
        );

        assert_eq!(PasswordPolicy::nist().to_string(), "nist");
        assert_eq!(PasswordPolicy::legacy().to_string(), "legacy");
        let custom = PasswordPolicy {
            min_length: 12,
            ..PasswordPolicy::nist()
        };
        assert_eq!(custom.to_string(), "custom(min=12, max=128)");
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher(None);
        let password = ClearTextPassword::for_verification("Catway#Long2025".to_string());
        let hashed = hasher.hash(&password).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(&password, &hashed));

        let wrong = ClearTextPassword::for_verification("Catway#Short2025".to_string());
        assert!(!hasher.verify(&wrong, &hashed));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = fast_hasher(None);
        let password = ClearTextPassword::for_verification("same input".to_string());
        let a = hasher.hash(&password).unwrap();
        let b = hasher.hash(&password).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = fast_hasher(Some(b"harbour-pepper"));
        let plain = fast_hasher(None);
        let password = ClearTextPassword::for_verification("TestPassword123!".to_string());
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&password, &hashed));
        assert!(!plain.verify(&password, &hashed));
        assert!(!fast_hasher(Some(b"wrong-pepper")).verify(&password, &hashed));
    }

    #[test]
    fn test_nfkc_normalization_on_both_paths() {
        let hasher = fast_hasher(None);
        // Fullwidth "ＡＢＣ" normalizes to "ABC"
        let chosen = ClearTextPassword::new("ＡＢＣdefgh9".to_string(), &PasswordPolicy::nist())
            .unwrap();
        let hashed = hasher.hash(&chosen).unwrap();

        let typed = ClearTextPassword::for_verification("ABCdefgh9".to_string());
        assert!(hasher.verify(&typed, &hashed));
    }

    #[test]
    fn test_phc_string_roundtrip_and_garbage() {
        let hasher = fast_hasher(None);
        let password = ClearTextPassword::for_verification("TestPassword123!".to_string());
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&password, &restored));

        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_needs_rehash_on_cost_change() {
        let fast = fast_hasher(None);
        let password = ClearTextPassword::for_verification("TestPassword123!".to_string());
        let hashed = fast.hash(&password).unwrap();

        assert!(!fast.needs_rehash(&hashed));

        let stronger = PasswordHasher::new(
            HashCost {
                memory_kib: 2_048,
                ..HashCost::FAST
            },
            None,
        )
        .unwrap();
        assert!(stronger.needs_rehash(&hashed));
        // Old hashes still verify under the new cost
        assert!(stronger.verify(&password, &hashed));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordHasher::new(
            HashCost {
                memory_kib: 1,
                iterations: 1,
                parallelism: 1,
            },
            None,
        );
        assert!(matches!(result, Err(PasswordHashError::InvalidParams(_))));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hasher = fast_hasher(Some(b"pepper-value"));
        assert!(!format!("{:?}", hasher).contains("pepper-value"));
    }
}
