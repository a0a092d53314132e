use crate::error::RecipeError;

/// Estimated alcohol by volume in percent: (OG − FG) × 131.25.
///
/// The original gravity must exceed the final gravity; anything else is a
/// [`RecipeError::GravityInverted`], never a zero or negative estimate.
pub fn compute_abv(og: f64, fg: f64) -> Result<f64, RecipeError> {
    if og <= fg {
        return Err(RecipeError::GravityInverted { og, fg });
    }
    Ok((og - fg) * 131.25)
}

/* ===========================
Unit tests
=========================== */
