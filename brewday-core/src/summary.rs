use serde::Serialize;

use crate::recipe::Recipe;
use crate::BrewPlan;

/// One labeled value ready for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

/// One titled group of items.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummarySection {
    pub title: String,
    pub items: Vec<SummaryItem>,
}

/// A read-only report of the whole recipe plus its derived quantities,
/// preformatted for direct display. Serializes cleanly so non-terminal
/// front ends can ship it as a response body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub sections: Vec<SummarySection>,
}

fn item(label: &str, value: String) -> SummaryItem {
    SummaryItem {
        label: label.to_string(),
        value,
    }
}

/// Assembles the display summary from a recipe and its derived plan.
///
/// Assembly only, no arithmetic: every number here was computed by
/// [`crate::plan`] or supplied in the recipe. Sections mirror the eight
/// steps of the recipe form; rows for skipped stages (zero secondary or
/// conditioning days, no misc additions, no rescale) are omitted.
pub fn build_summary(recipe: &Recipe, plan: &BrewPlan) -> Summary {
    let mut sections = Vec::with_capacity(8);

    sections.push(SummarySection {
        title: "Recipe".into(),
        items: vec![
            item("Beer style", recipe.style.label().to_string()),
            item("Batch size", format!("{:.2} L", recipe.batch_size_l)),
            item("Total grain", format!("{:.2} kg", recipe.grain_weight_kg)),
        ],
    });

    sections.push(SummarySection {
        title: "Grain bill".into(),
        items: recipe
            .grains
            .iter()
            .map(|g| item(&g.name, format!("{:.2} kg", g.weight_kg)))
            .collect(),
    });

    let mut water = vec![
        item("Mash temperature", format!("{:.1} °C", recipe.mash.target_temp_c)),
        item(
            "Water-to-grain ratio",
            format!("{:.1} L/kg", recipe.mash.ratio_l_per_kg),
        ),
        item("Mash water", format!("{:.2} L", plan.mash_water_l)),
        item("Strike temperature", format!("{:.1} °C", plan.strike_temp_c)),
    ];
    if let (Some(ratio), Some(volume)) = (
        plan.sparge.adjusted_ratio,
        plan.sparge.adjusted_mash_water_l,
    ) {
        water.push(item("Adjusted ratio", format!("{ratio:.2} L/kg")));
        water.push(item("Adjusted mash water", format!("{volume:.2} L")));
    }
    water.push(item("Sparge water", format!("{:.2} L", plan.sparge.sparge_l)));
    sections.push(SummarySection {
        title: "Mash & sparge water".into(),
        items: water,
    });

    let mut boil = vec![item("Boil time", format!("{} min", recipe.boil_time_min))];
    boil.extend(
        recipe
            .hops
            .iter()
            .map(|h| item(&h.name, format!("{:.1} g at {} min", h.amount_g, h.time_min))),
    );
    sections.push(SummarySection {
        title: "Boil & hops".into(),
        items: boil,
    });

    let mut fermentation = vec![
        item(
            "Fermentation temperature",
            format!("{:.1} °C", recipe.fermentation.temp_c),
        ),
        item("Primary", format!("{} days", recipe.fermentation.primary_days)),
    ];
    if recipe.fermentation.secondary_days > 0 {
        fermentation.push(item(
            "Secondary",
            format!("{} days", recipe.fermentation.secondary_days),
        ));
    }
    if recipe.fermentation.conditioning_days > 0 {
        fermentation.push(item(
            "Conditioning",
            format!("{} days", recipe.fermentation.conditioning_days),
        ));
    }
    sections.push(SummarySection {
        title: "Fermentation".into(),
        items: fermentation,
    });

    sections.push(SummarySection {
        title: "Gravity & ABV".into(),
        items: vec![
            item("Original gravity", format!("{:.3}", recipe.gravity.og)),
            item("Final gravity", format!("{:.3}", recipe.gravity.fg)),
            item("Estimated ABV", format!("{:.2}%", plan.abv_percent)),
        ],
    });

    let mut extras = vec![item("Yeast strain", recipe.yeast.clone())];
    extras.extend(recipe.misc.iter().map(|m| item(&m.name, m.amount.clone())));
    sections.push(SummarySection {
        title: "Yeast & extras".into(),
        items: extras,
    });

    sections.push(SummarySection {
        title: "Schedule".into(),
        items: vec![
            item("Brew day length", format!("{} hours", recipe.schedule.brew_day_h)),
            item("Mash duration", format!("{} min", recipe.schedule.mash_min)),
            item("Boil duration", format!("{} min", plan.boil_duration_min)),
            item(
                "Total fermentation",
                format!("{} days", plan.fermentation_days),
            ),
        ],
    });

    Summary { sections }
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::sample_recipe;
    use crate::water::SpargePolicy;

    fn summarize(recipe: &Recipe) -> Summary {
        let plan = crate::plan(recipe, SpargePolicy::Keep).unwrap();
        build_summary(recipe, &plan)
    }

    fn section<'a>(summary: &'a Summary, title: &str) -> &'a SummarySection {
        summary
            .sections
            .iter()
            .find(|s| s.title == title)
            .unwrap_or_else(|| panic!("missing section '{title}'"))
    }

    #[test]
    fn eight_sections_in_form_order() {
        let summary = summarize(&sample_recipe());
        let titles: Vec<_> = summary.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Recipe",
                "Grain bill",
                "Mash & sparge water",
                "Boil & hops",
                "Fermentation",
                "Gravity & ABV",
                "Yeast & extras",
                "Schedule",
            ]
        );
    }

    #[test]
    fn values_carry_the_display_precision() {
        let summary = summarize(&sample_recipe());

        let water = section(&summary, "Mash & sparge water");
        assert!(water.items.iter().any(|i| i.value == "12.50 L"));
        assert!(water.items.iter().any(|i| i.value == "65.5 °C"));
        assert!(water.items.iter().any(|i| i.value == "7.50 L"));

        let gravity = section(&summary, "Gravity & ABV");
        assert_eq!(gravity.items[0].value, "1.050");
        assert_eq!(gravity.items[2].value, "5.25%");
    }

    #[test]
    fn skipped_stages_are_omitted() {
        let summary = summarize(&sample_recipe());
        let fermentation = section(&summary, "Fermentation");
        assert!(!fermentation.items.iter().any(|i| i.label == "Secondary"));
        assert!(!fermentation.items.iter().any(|i| i.label == "Conditioning"));

        let mut recipe = sample_recipe();
        recipe.fermentation.secondary_days = 14;
        recipe.fermentation.conditioning_days = 10;
        let summary = summarize(&recipe);
        let fermentation = section(&summary, "Fermentation");
        assert!(fermentation.items.iter().any(|i| i.value == "14 days"));
        assert!(fermentation.items.iter().any(|i| i.value == "10 days"));
    }

    #[test]
    fn adjusted_rows_appear_only_after_a_rescale() {
        let summary = summarize(&sample_recipe());
        let water = section(&summary, "Mash & sparge water");
        assert!(!water.items.iter().any(|i| i.label == "Adjusted ratio"));

        // ratio 4.5 on 5 kg pushes the mash water past the 20 L batch
        let mut recipe = sample_recipe();
        recipe.mash.ratio_l_per_kg = 4.5;
        let plan = crate::plan(&recipe, SpargePolicy::Rescale).unwrap();
        let summary = build_summary(&recipe, &plan);
        let water = section(&summary, "Mash & sparge water");
        assert!(water.items.iter().any(|i| i.label == "Adjusted ratio" && i.value == "4.00 L/kg"));
        assert!(water
            .items
            .iter()
            .any(|i| i.label == "Adjusted mash water" && i.value == "20.00 L"));
    }

    #[test]
    fn misc_additions_list_after_the_yeast() {
        let mut recipe = sample_recipe();
        recipe.misc.push(crate::recipe::MiscAddition {
            name: "Irish Moss".into(),
            amount: "5 g".into(),
        });
        let summary = summarize(&recipe);
        let extras = section(&summary, "Yeast & extras");
        assert_eq!(extras.items[0].label, "Yeast strain");
        assert_eq!(extras.items[1].label, "Irish Moss");
        assert_eq!(extras.items[1].value, "5 g");
    }
}
