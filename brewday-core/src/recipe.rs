use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Beer styles offered by the recipe form.
///
/// Style is identity only; no formula consults it.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BeerStyle {
    Ale,
    Lager,
    Stout,
    Ipa,
    Porter,
    Pilsner,
    Saison,
    WheatBeer,
}

impl BeerStyle {
    /// Display name, e.g. "Wheat Beer".
    pub fn label(self) -> &'static str {
        match self {
            BeerStyle::Ale => "Ale",
            BeerStyle::Lager => "Lager",
            BeerStyle::Stout => "Stout",
            BeerStyle::Ipa => "IPA",
            BeerStyle::Porter => "Porter",
            BeerStyle::Pilsner => "Pilsner",
            BeerStyle::Saison => "Saison",
            BeerStyle::WheatBeer => "Wheat Beer",
        }
    }
}

impl std::fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry in the ordered grain bill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrainAddition {
    /// Malt or adjunct name.
    pub name: String,
    /// Weight in kilograms; zero is allowed for trace entries.
    pub weight_kg: f64,
}

/// Mash step parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MashProfile {
    /// Desired rest temperature in °C.
    pub target_temp_c: f64,
    /// Water-to-grain ratio in L/kg.
    pub ratio_l_per_kg: f64,
    /// Explicit strike temperature in °C; replaces the computed suggestion.
    #[serde(default)]
    pub strike_override_c: Option<f64>,
}

/// One hop charge in the boil.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HopAddition {
    /// Hop variety.
    pub name: String,
    /// Amount in grams.
    pub amount_g: f64,
    /// Boil minutes for this charge; must not exceed the boil time.
    pub time_min: u32,
}

/// Fermentation stages; a zero day count means the stage is skipped.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fermentation {
    /// Primary fermentation temperature in °C.
    pub temp_c: f64,
    pub primary_days: u32,
    #[serde(default)]
    pub secondary_days: u32,
    #[serde(default)]
    pub conditioning_days: u32,
}

/// Gravity readings taken before and after fermentation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    /// Original gravity, e.g. 1.050.
    pub og: f64,
    /// Final gravity, e.g. 1.010.
    pub fg: f64,
}

/// A non-grain, non-hop extra (spices, fruit, finings).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiscAddition {
    pub name: String,
    /// Free-text amount, e.g. "50 g" or "1 stick".
    pub amount: String,
}

/// Brew-day and process timing.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Planned brew day length in hours.
    pub brew_day_h: u32,
    /// Mash rest duration in minutes.
    pub mash_min: u32,
    /// Boil duration in minutes; falls back to the hop-schedule boil time.
    #[serde(default)]
    pub boil_min: Option<u32>,
}

/// A complete recipe as collected by the front end.
///
/// This is input only; derived quantities live in [`crate::BrewPlan`].
/// [`Recipe::validate`] must pass before anything is derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub style: BeerStyle,
    /// Target batch size in liters.
    pub batch_size_l: f64,
    /// Total grain weight in kilograms.
    pub grain_weight_kg: f64,
    /// Ordered grain bill.
    pub grains: Vec<GrainAddition>,
    pub mash: MashProfile,
    /// Boil time in minutes (30 to 120).
    pub boil_time_min: u32,
    /// Ordered hop schedule.
    pub hops: Vec<HopAddition>,
    pub fermentation: Fermentation,
    pub gravity: Gravity,
    /// Yeast strain.
    pub yeast: String,
    /// Ordered misc additions; may be empty.
    #[serde(default)]
    pub misc: Vec<MiscAddition>,
    pub schedule: Schedule,
}

/// Checks that a required free-text field is non-empty after trimming.
pub fn require_non_empty(field: impl Into<String>, value: &str) -> Result<(), RecipeError> {
    if value.trim().is_empty() {
        Err(RecipeError::MissingField {
            field: field.into(),
        })
    } else {
        Ok(())
    }
}

fn check_positive(field: &str, value: f64, errors: &mut Vec<RecipeError>) {
    if !value.is_finite() {
        errors.push(RecipeError::NotFinite {
            field: field.into(),
        });
    } else if value <= 0.0 {
        errors.push(RecipeError::NonPositive {
            field: field.into(),
            value,
        });
    }
}

fn check_amount(field: String, value: f64, errors: &mut Vec<RecipeError>) {
    if !value.is_finite() {
        errors.push(RecipeError::NotFinite { field });
    } else if value < 0.0 {
        errors.push(RecipeError::Negative { field, value });
    }
}

fn check_finite(field: &str, value: f64, errors: &mut Vec<RecipeError>) {
    if !value.is_finite() {
        errors.push(RecipeError::NotFinite {
            field: field.into(),
        });
    }
}

impl Recipe {
    /// Checks every field and reports all problems at once, in form order.
    ///
    /// Callers decide what to do with the list: the bundled CLI halts on any
    /// error, an interactive front end can re-prompt for single fields.
    /// Field positions in the messages are 1-based.
    pub fn validate(&self) -> Result<(), Vec<RecipeError>> {
        let mut errors = Vec::new();

        check_positive("batch size", self.batch_size_l, &mut errors);
        check_positive("total grain weight", self.grain_weight_kg, &mut errors);

        if self.grains.is_empty() {
            errors.push(RecipeError::EmptyGrainBill);
        }
        for (i, grain) in self.grains.iter().enumerate() {
            if let Err(e) = require_non_empty(format!("grain {} name", i + 1), &grain.name) {
                errors.push(e);
            }
            check_amount(format!("grain {} weight", i + 1), grain.weight_kg, &mut errors);
        }

        check_finite("mash temperature", self.mash.target_temp_c, &mut errors);
        check_positive("water-to-grain ratio", self.mash.ratio_l_per_kg, &mut errors);
        if let Some(t) = self.mash.strike_override_c {
            check_finite("strike temperature", t, &mut errors);
        }

        if !(30..=120).contains(&self.boil_time_min) {
            errors.push(RecipeError::BoilOutOfRange {
                minutes: self.boil_time_min,
            });
        }
        if self.hops.is_empty() {
            errors.push(RecipeError::EmptyHopSchedule);
        }
        for (i, hop) in self.hops.iter().enumerate() {
            if let Err(e) = require_non_empty(format!("hop {} name", i + 1), &hop.name) {
                errors.push(e);
            }
            check_amount(format!("hop {} amount", i + 1), hop.amount_g, &mut errors);
            if hop.time_min > self.boil_time_min {
                errors.push(RecipeError::HopAfterBoil {
                    name: hop.name.clone(),
                    time_min: hop.time_min,
                    boil_min: self.boil_time_min,
                });
            }
        }

        check_finite("fermentation temperature", self.fermentation.temp_c, &mut errors);

        check_finite("original gravity", self.gravity.og, &mut errors);
        check_finite("final gravity", self.gravity.fg, &mut errors);
        if self.gravity.og.is_finite()
            && self.gravity.fg.is_finite()
            && self.gravity.og <= self.gravity.fg
        {
            errors.push(RecipeError::GravityInverted {
                og: self.gravity.og,
                fg: self.gravity.fg,
            });
        }

        if let Err(e) = require_non_empty("yeast strain", &self.yeast) {
            errors.push(e);
        }
        for (i, misc) in self.misc.iter().enumerate() {
            if let Err(e) = require_non_empty(format!("misc {} name", i + 1), &misc.name) {
                errors.push(e);
            }
            if let Err(e) = require_non_empty(format!("misc {} amount", i + 1), &misc.amount) {
                errors.push(e);
            }
        }

        if let Some(boil_min) = self.schedule.boil_min {
            if !(30..=120).contains(&boil_min) {
                errors.push(RecipeError::BoilOutOfRange { minutes: boil_min });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A valid fixture shared by the test modules in this crate.
#[cfg(test)]
pub(crate) fn sample_recipe() -> Recipe {
    Recipe {
        style: BeerStyle::Ipa,
        batch_size_l: 20.0,
        grain_weight_kg: 5.0,
        grains: vec![
            GrainAddition {
                name: "Pale Malt".into(),
                weight_kg: 4.5,
            },
            GrainAddition {
                name: "Crystal 60".into(),
                weight_kg: 0.5,
            },
        ],
        mash: MashProfile {
            target_temp_c: 65.0,
            ratio_l_per_kg: 2.5,
            strike_override_c: None,
        },
        boil_time_min: 60,
        hops: vec![
            HopAddition {
                name: "Cascade".into(),
                amount_g: 20.0,
                time_min: 60,
            },
            HopAddition {
                name: "Saaz".into(),
                amount_g: 15.0,
                time_min: 10,
            },
        ],
        fermentation: Fermentation {
            temp_c: 20.0,
            primary_days: 7,
            secondary_days: 0,
            conditioning_days: 0,
        },
        gravity: Gravity {
            og: 1.050,
            fg: 1.010,
        },
        yeast: "SafAle US-05".into(),
        misc: Vec::new(),
        schedule: Schedule {
            brew_day_h: 8,
            mash_min: 60,
            boil_min: None,
        },
    }
}

/* ===========================
Unit tests
=========================== */
