//! Pincode generation
//!
//! Participants and animators join an activity with a 6-digit code instead of
//! an account. Codes are unique per kind across all activities.

use rand::Rng;

use crate::domain::entities::PincodeKind;
use crate::domain::ports::ActivityRepository;
use crate::error::AppError;

/// Smallest code (6 digits, no leading zero)
pub const MIN_PINCODE: u32 = 100_000;
/// Largest code
pub const MAX_PINCODE: u32 = 999_999;
/// Draws tried before giving up
pub const MAX_ATTEMPTS: usize = 20;

/// Draw one code
pub fn random_code<R: Rng>(rng: &mut R) -> String {
    rng.gen_range(MIN_PINCODE..=MAX_PINCODE).to_string()
}

/// Draw codes until one is not used by any activity for this kind
pub async fn generate_unique_code<AR, R>(
    activities: &AR,
    kind: PincodeKind,
    rng: &mut R,
) -> Result<String, AppError>
where
    AR: ActivityRepository,
    R: Rng + Send,
{
    for _ in 0..MAX_ATTEMPTS {
        let code = random_code(rng);
        if !activities.code_exists(kind, &code).await? {
            return Ok(code);
        }
        tracing::debug!(kind = %kind, "Pincode collision, drawing again");
    }

    Err(AppError::Internal(format!(
        "Could not find a free {} code after {} attempts",
        kind, MAX_ATTEMPTS
    )))
}

/// Check the shape of a code supplied by a client
pub fn is_well_formed(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) && !code.starts_with('0')
}
