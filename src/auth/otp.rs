// One-time verification codes for email confirmation
//
// Codes are 6 decimal digits, valid for 10 minutes, and stored only as a
// SHA-256 hash. Verification hashes the submitted code and compares.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Validity window for a freshly generated code
const OTP_TTL_MINUTES: i64 = 10;

/// A generated one-time code with its storable form
pub struct GeneratedOtp {
    /// The plain code, to be delivered to the user (never stored)
    pub code: String,
    /// SHA-256 hex digest of the code, stored on the user row
    pub code_hash: String,
    /// Expiry timestamp for the code
    pub expires_at: DateTime<Utc>,
}

pub struct OtpService;

impl OtpService {
    /// Generate a fresh 6-digit code and its storable hash/expiry
    pub fn generate() -> GeneratedOtp {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        let code_hash = Self::hash_code(&code);
        let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);

        GeneratedOtp {
            code,
            code_hash,
            expires_at,
        }
    }

    /// Hash a code using SHA-256 (hex-encoded)
    pub fn hash_code(code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Check a submitted code against the stored hash and expiry
    pub fn verify(
        submitted: &str,
        stored_hash: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        if now > expires_at {
            return false;
        }
        Self::hash_code(submitted) == stored_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..100 {
            let otp = OtpService::generate();
            assert_eq!(otp.code.len(), 6);
            assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_correct_code_within_window_verifies() {
        let otp = OtpService::generate();
        assert!(OtpService::verify(
            &otp.code,
            &otp.code_hash,
            otp.expires_at,
            Utc::now()
        ));
    }

    #[test]
    fn test_wrong_code_fails() {
        let otp = OtpService::generate();
        let wrong = if otp.code == "000000" { "000001" } else { "000000" };
        assert!(!OtpService::verify(wrong, &otp.code_hash, otp.expires_at, Utc::now()));
    }

    #[test]
    fn test_expired_code_fails_even_when_correct() {
        let otp = OtpService::generate();
        let after_expiry = otp.expires_at + Duration::seconds(1);
        assert!(!OtpService::verify(
            &otp.code,
            &otp.code_hash,
            otp.expires_at,
            after_expiry
        ));
    }

    #[test]
    fn test_expiry_is_ten_minutes_out() {
        let before = Utc::now();
        let otp = OtpService::generate();
        let after = Utc::now();

        assert!(otp.expires_at >= before + Duration::minutes(OTP_TTL_MINUTES));
        assert!(otp.expires_at <= after + Duration::minutes(OTP_TTL_MINUTES));
    }

    proptest! {
        // Hashing is deterministic and codes never collide with a different input
        #[test]
        fn prop_hash_matches_only_same_code(code in "[0-9]{6}", other in "[0-9]{6}") {
            let hash = OtpService::hash_code(&code);
            prop_assert_eq!(OtpService::hash_code(&code) == hash, true);
            if code != other {
                prop_assert_ne!(OtpService::hash_code(&other), hash);
            }
        }
    }
}
