use chrono::{Duration, Utc};
use metrics::counter;
use rand::Rng;

use crate::db::pincode_repo;
use crate::errors::AppError;
use crate::models::{PinCode, WrappedReport};
use crate::AppState;

use super::report;

const PINCODE_LEN: usize = 6;
const PINCODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random 6-character share code.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..PINCODE_LEN)
        .map(|_| PINCODE_ALPHABET[rng.gen_range(0..PINCODE_ALPHABET.len())] as char)
        .collect()
}

/// Codes are exactly six alphanumeric characters.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == PINCODE_LEN && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Mint a new pin code for an address.
pub async fn mint(state: &AppState, address: &str) -> Result<PinCode, AppError> {
    let code = generate_code();
    let expires_at = Utc::now() + Duration::days(state.config.pincode_ttl_days);

    let pin = pincode_repo::upsert_pincode(&state.db, &code, address, expires_at).await?;
    counter!("pincodes_created_total").increment(1);

    tracing::info!(code = %pin.code, address = %pin.address, "Pin code minted");

    Ok(pin)
}

/// Resolve a pin code to the wrapped report of the address behind it.
/// Expired codes are deleted on sight and reported as not found.
pub async fn resolve(state: &AppState, raw_code: &str) -> Result<WrappedReport, AppError> {
    let code = raw_code.to_uppercase();
    if !is_valid_code(&code) {
        return Err(AppError::BadRequest("Invalid pin code format".into()));
    }

    counter!("pincode_lookups_total").increment(1);

    let Some(pin) = pincode_repo::get_pincode(&state.db, &code).await? else {
        return Err(AppError::NotFound("Invalid or expired pin code".into()));
    };

    if pin.is_expired(Utc::now()) {
        pincode_repo::delete_pincode(&state.db, &code).await?;
        return Err(AppError::NotFound("Pin code has expired".into()));
    }

    report::build_wrapped_report(state, &pin.address).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..50 {
            let code = generate_code();
            assert!(is_valid_code(&code), "generated invalid code {code}");
            assert_eq!(code, code.to_uppercase());
        }
    }

    #[test]
    fn test_code_format() {
        assert!(is_valid_code("AB12CD"));
        assert!(!is_valid_code("AB12C"));
        assert!(!is_valid_code("AB12CDE"));
        assert!(!is_valid_code("AB 2CD"));
        assert!(!is_valid_code("AB-2CD"));
    }
}
