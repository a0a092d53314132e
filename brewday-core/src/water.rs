use serde::{Deserialize, Serialize};

/// Mash water volume in liters: grain weight × water-to-grain ratio.
pub fn mash_water_volume(grain_kg: f64, ratio_l_per_kg: f64) -> f64 {
    grain_kg * ratio_l_per_kg
}

/// Suggested strike water temperature in °C.
/// Linear rule of thumb: target + 0.4·ratio − 0.5.
/// Callers may substitute an explicit override instead of this suggestion.
pub fn strike_temperature(target_temp_c: f64, ratio_l_per_kg: f64) -> f64 {
    target_temp_c + 0.4 * ratio_l_per_kg - 0.5
}

/// What to do when the mash water alone exceeds the batch size.
///
/// This is a policy choice, not an error; both outcomes are valid and the
/// caller picks one explicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpargePolicy {
    /// Lower the water-to-grain ratio until the mash water fits the batch.
    Rescale,
    /// Keep the requested ratio; sparge water drops to zero.
    Keep,
}

/// Sparge water plan. The adjusted fields are set only after a rescale.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpargePlan {
    /// Sparge water volume in liters.
    pub sparge_l: f64,
    /// Rescaled water-to-grain ratio in L/kg.
    pub adjusted_ratio: Option<f64>,
    /// Rescaled mash water volume in liters.
    pub adjusted_mash_water_l: Option<f64>,
}

/// Reconciles the sparge water volume with the batch size.
///
/// When the mash water fits the batch, the sparge makes up the difference.
/// When it does not, the policy decides: [`SpargePolicy::Rescale`] trims the
/// ratio so the mash water equals the batch size, [`SpargePolicy::Keep`]
/// leaves the mash as requested and reports zero sparge water. The `Keep`
/// branch makes no statement about the missed batch target; front ends may
/// warn before offering the choice.
pub fn reconcile_sparge(
    mash_water_l: f64,
    batch_size_l: f64,
    grain_kg: f64,
    policy: SpargePolicy,
) -> SpargePlan {
    if mash_water_l <= batch_size_l {
        return SpargePlan {
            sparge_l: batch_size_l - mash_water_l,
            adjusted_ratio: None,
            adjusted_mash_water_l: None,
        };
    }

    match policy {
        SpargePolicy::Rescale => SpargePlan {
            sparge_l: 0.0,
            adjusted_ratio: Some(batch_size_l / grain_kg),
            adjusted_mash_water_l: Some(batch_size_l),
        },
        SpargePolicy::Keep => SpargePlan {
            sparge_l: 0.0,
            adjusted_ratio: None,
            adjusted_mash_water_l: None,
        },
    }
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mash_water_is_the_product() {
        assert_relative_eq!(mash_water_volume(5.0, 2.5), 12.5, epsilon = 1e-9);
        assert_relative_eq!(mash_water_volume(3.2, 3.0), 9.6, epsilon = 1e-9);
    }

    #[test]
    fn mash_water_is_monotonic_in_both_arguments() {
        let base = mash_water_volume(5.0, 2.5);
        assert!(mash_water_volume(6.0, 2.5) > base);
        assert!(mash_water_volume(5.0, 3.0) > base);
    }

    #[test]
    fn strike_temperature_matches_the_rule_of_thumb() {
        // 65 + 0.4·2.5 − 0.5
        assert_relative_eq!(strike_temperature(65.0, 2.5), 65.5, epsilon = 1e-9);
        assert_relative_eq!(strike_temperature(68.0, 3.0), 68.7, epsilon = 1e-9);
    }

    #[test]
    fn sparge_makes_up_the_difference_when_mash_fits() {
        let plan = reconcile_sparge(15.0, 20.0, 5.0, SpargePolicy::Keep);
        assert_relative_eq!(plan.sparge_l, 5.0, epsilon = 1e-9);
        assert_eq!(plan.adjusted_ratio, None);
        assert_eq!(plan.adjusted_mash_water_l, None);
    }

    #[test]
    fn fitting_mash_ignores_the_policy() {
        let keep = reconcile_sparge(15.0, 20.0, 5.0, SpargePolicy::Keep);
        let rescale = reconcile_sparge(15.0, 20.0, 5.0, SpargePolicy::Rescale);
        assert_eq!(keep, rescale);
    }

    #[test]
    fn rescale_trims_the_ratio_to_the_batch() {
        let plan = reconcile_sparge(25.0, 20.0, 5.0, SpargePolicy::Rescale);
        assert_relative_eq!(plan.sparge_l, 0.0, epsilon = 1e-9);
        assert_relative_eq!(plan.adjusted_ratio.unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(plan.adjusted_mash_water_l.unwrap(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn keep_declines_the_adjustment_and_reports_zero_sparge() {
        let plan = reconcile_sparge(25.0, 20.0, 5.0, SpargePolicy::Keep);
        assert_relative_eq!(plan.sparge_l, 0.0, epsilon = 1e-9);
        assert_eq!(plan.adjusted_ratio, None);
        assert_eq!(plan.adjusted_mash_water_l, None);
    }

    #[test]
    fn exact_fit_means_zero_sparge_without_adjustment() {
        let plan = reconcile_sparge(20.0, 20.0, 5.0, SpargePolicy::Rescale);
        assert_relative_eq!(plan.sparge_l, 0.0, epsilon = 1e-9);
        assert_eq!(plan.adjusted_ratio, None);
    }
}
