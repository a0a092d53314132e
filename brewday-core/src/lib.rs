//! All-grain brewing arithmetic: water volumes, strike temperature, ABV,
//! and schedule totals derived from a [`Recipe`].
//!
//! The crate is a pure computation layer with no UI, no filesystem, and no
//! state. A front end (the bundled CLI, a web form, an API handler) collects
//! a [`Recipe`], calls [`plan`], and displays the resulting [`BrewPlan`] or
//! the preformatted [`Summary`] from [`build_summary`]. Every call
//! recomputes all derived values from the inputs alone, so callers may
//! simply re-run the pipeline after any input change.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod gravity;
pub mod recipe;
pub mod schedule;
pub mod summary;
pub mod water;

pub use error::RecipeError;
pub use gravity::compute_abv;
pub use recipe::{
    BeerStyle, Fermentation, GrainAddition, Gravity, HopAddition, MashProfile, MiscAddition,
    Recipe, Schedule, require_non_empty,
};
pub use schedule::total_fermentation_days;
pub use summary::{Summary, SummaryItem, SummarySection, build_summary};
pub use water::{
    SpargePlan, SpargePolicy, mash_water_volume, reconcile_sparge, strike_temperature,
};

/// Every derived quantity for a validated recipe.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrewPlan {
    /// Mash water in liters, before any sparge reconciliation.
    pub mash_water_l: f64,
    /// Strike water temperature in °C; the override when one is set.
    pub strike_temp_c: f64,
    /// Sparge volume and any rescale adjustments.
    pub sparge: SpargePlan,
    /// Estimated alcohol by volume in percent.
    pub abv_percent: f64,
    /// Primary + secondary + conditioning days.
    pub fermentation_days: u32,
    /// Scheduled boil length; falls back to the boil time when the schedule
    /// sets no explicit duration.
    pub boil_duration_min: u32,
}

/// Derives the full brew plan for a recipe.
///
/// Validation runs first and nothing is derived from a recipe with problems;
/// the error carries every problem found, in form order (see
/// [`Recipe::validate`]). The computation itself is a single linear pass:
/// mash water, strike temperature (honoring the override), sparge
/// reconciliation under the chosen policy, ABV, fermentation total,
/// effective boil duration.
pub fn plan(recipe: &Recipe, sparge_policy: SpargePolicy) -> Result<BrewPlan, Vec<RecipeError>> {
    recipe.validate()?;

    let mash_water_l = mash_water_volume(recipe.grain_weight_kg, recipe.mash.ratio_l_per_kg);
    let strike_temp_c = recipe.mash.strike_override_c.unwrap_or_else(|| {
        strike_temperature(recipe.mash.target_temp_c, recipe.mash.ratio_l_per_kg)
    });
    let sparge = reconcile_sparge(
        mash_water_l,
        recipe.batch_size_l,
        recipe.grain_weight_kg,
        sparge_policy,
    );
    // validate() already guarantees og > fg
    let abv_percent = compute_abv(recipe.gravity.og, recipe.gravity.fg).map_err(|e| vec![e])?;
    let fermentation_days = total_fermentation_days(
        recipe.fermentation.primary_days,
        recipe.fermentation.secondary_days,
        recipe.fermentation.conditioning_days,
    );
    let boil_duration_min = recipe.schedule.boil_min.unwrap_or(recipe.boil_time_min);

    Ok(BrewPlan {
        mash_water_l,
        strike_temp_c,
        sparge,
        abv_percent,
        fermentation_days,
        boil_duration_min,
    })
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::sample_recipe;
    use approx::assert_relative_eq;

    #[test]
    fn plan_derives_the_documented_values() {
        let plan = plan(&sample_recipe(), SpargePolicy::Keep).unwrap();

        assert_relative_eq!(plan.mash_water_l, 12.5, epsilon = 1e-9);
        assert_relative_eq!(plan.strike_temp_c, 65.5, epsilon = 1e-9);
        assert_relative_eq!(plan.sparge.sparge_l, 7.5, epsilon = 1e-9);
        assert_relative_eq!(plan.abv_percent, 5.25, epsilon = 1e-9);
        assert_eq!(plan.fermentation_days, 7);
        assert_eq!(plan.boil_duration_min, 60);
    }

    #[test]
    fn plan_refuses_an_invalid_recipe() {
        let mut recipe = sample_recipe();
        recipe.yeast = " ".into();
        recipe.gravity.og = 1.000;

        let errors = plan(&recipe, SpargePolicy::Keep).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], RecipeError::GravityInverted { .. }));
        assert!(matches!(errors[1], RecipeError::MissingField { .. }));
    }

    #[test]
    fn strike_override_replaces_the_suggestion() {
        let mut recipe = sample_recipe();
        recipe.mash.strike_override_c = Some(70.0);

        let plan = plan(&recipe, SpargePolicy::Keep).unwrap();
        assert_relative_eq!(plan.strike_temp_c, 70.0, epsilon = 1e-9);
    }

    #[test]
    fn explicit_boil_duration_wins_over_the_boil_time() {
        let mut recipe = sample_recipe();
        recipe.schedule.boil_min = Some(90);

        let plan = plan(&recipe, SpargePolicy::Keep).unwrap();
        assert_eq!(plan.boil_duration_min, 90);
    }

    #[test]
    fn sparge_policy_flows_through_the_pipeline() {
        let mut recipe = sample_recipe();
        recipe.mash.ratio_l_per_kg = 4.5; // 22.5 L mash water against a 20 L batch

        let kept = plan(&recipe, SpargePolicy::Keep).unwrap();
        assert_relative_eq!(kept.sparge.sparge_l, 0.0, epsilon = 1e-9);
        assert_eq!(kept.sparge.adjusted_ratio, None);

        let rescaled = plan(&recipe, SpargePolicy::Rescale).unwrap();
        assert_relative_eq!(rescaled.sparge.adjusted_ratio.unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(
            rescaled.sparge.adjusted_mash_water_l.unwrap(),
            20.0,
            epsilon = 1e-9
        );
    }
}
