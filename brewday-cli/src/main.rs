use chrono::{Duration, Local, NaiveTime, Timelike};
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use brewday_core::{
    build_summary, plan, BeerStyle, BrewPlan, Fermentation, GrainAddition, Gravity, HopAddition,
    MashProfile, MiscAddition, Recipe, Schedule, SpargePolicy,
};
use std::{fs, path::PathBuf};

/// Style CLI enum mirrors brewday-core (derive for Clap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StyleFlag {
    Ale,
    Lager,
    Stout,
    Ipa,
    Porter,
    Pilsner,
    Saison,
    WheatBeer,
}

impl From<StyleFlag> for BeerStyle {
    fn from(s: StyleFlag) -> Self {
        match s {
            StyleFlag::Ale => BeerStyle::Ale,
            StyleFlag::Lager => BeerStyle::Lager,
            StyleFlag::Stout => BeerStyle::Stout,
            StyleFlag::Ipa => BeerStyle::Ipa,
            StyleFlag::Porter => BeerStyle::Porter,
            StyleFlag::Pilsner => BeerStyle::Pilsner,
            StyleFlag::Saison => BeerStyle::Saison,
            StyleFlag::WheatBeer => BeerStyle::WheatBeer,
        }
    }
}

fn parse_grain(s: &str) -> Result<GrainAddition, String> {
    let Some((name, weight)) = s.rsplit_once(':') else {
        return Err(format!("expected NAME:KG, got '{s}'"));
    };
    let weight_kg = weight
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a weight in kilograms", weight.trim()))?;
    Ok(GrainAddition {
        name: name.trim().to_string(),
        weight_kg,
    })
}

fn parse_hop(s: &str) -> Result<HopAddition, String> {
    let Some((name, rest)) = s.rsplit_once(':') else {
        return Err(format!("expected NAME:G@MIN, got '{s}'"));
    };
    let Some((amount, time)) = rest.split_once('@') else {
        return Err(format!("expected G@MIN after ':', got '{rest}'"));
    };
    let amount_g = amount
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not an amount in grams", amount.trim()))?;
    let time_min = time
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("'{}' is not a boil time in minutes", time.trim()))?;
    Ok(HopAddition {
        name: name.trim().to_string(),
        amount_g,
        time_min,
    })
}

fn parse_misc(s: &str) -> Result<MiscAddition, String> {
    let Some((name, amount)) = s.split_once('=') else {
        return Err(format!("expected NAME=AMOUNT, got '{s}'"));
    };
    Ok(MiscAddition {
        name: name.trim().to_string(),
        amount: amount.trim().to_string(),
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "brewday",
    about = "Plan an all-grain brew: water volumes, strike temperature, ABV & schedule.",
    version
)]
struct Args {
    /// Beer style
    #[arg(long, value_enum, default_value_t = StyleFlag::Ale)]
    style: StyleFlag,

    /// Target batch size in liters (1-100)
    #[arg(long, default_value_t = 20.0)]
    batch_size: f64,

    /// Total grain weight in kilograms (0.1-20)
    #[arg(long, default_value_t = 5.0)]
    grain_weight: f64,

    /// Grain bill entry as NAME:KG (repeatable, order preserved)
    #[arg(long = "grain", value_parser = parse_grain)]
    grains: Vec<GrainAddition>,

    /// Desired mash temperature in °C (60-75)
    #[arg(long, default_value_t = 65.0)]
    mash_temp: f64,

    /// Water-to-grain ratio in L/kg (2-4)
    #[arg(long, default_value_t = 2.5)]
    ratio: f64,

    /// Explicit strike temperature in °C (50-100); replaces the suggestion
    #[arg(long)]
    strike_temp: Option<f64>,

    /// Lower the ratio to fit the batch when the mash water exceeds it
    #[arg(long)]
    rescale_sparge: bool,

    /// Boil time in minutes
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(30..=120))]
    boil_time: u32,

    /// Hop addition as NAME:G@MIN (repeatable, order preserved)
    #[arg(long = "hop", value_parser = parse_hop)]
    hops: Vec<HopAddition>,

    /// Fermentation temperature in °C (15-25)
    #[arg(long, default_value_t = 20.0)]
    ferment_temp: f64,

    /// Primary fermentation days
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(5..=14))]
    primary_days: u32,

    /// Secondary fermentation days (0 = skip)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=30))]
    secondary_days: u32,

    /// Conditioning days (0 = skip)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=60))]
    conditioning_days: u32,

    /// Original gravity (1.000-1.200)
    #[arg(long, default_value_t = 1.050)]
    og: f64,

    /// Final gravity (0.900-1.200)
    #[arg(long, default_value_t = 1.010)]
    fg: f64,

    /// Yeast strain
    #[arg(long, default_value = "")]
    yeast: String,

    /// Misc addition as NAME=AMOUNT, e.g. "Irish Moss=5 g" (repeatable)
    #[arg(long = "misc", value_parser = parse_misc)]
    misc: Vec<MiscAddition>,

    /// Planned brew day length in hours
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(4..=12))]
    brew_day_hours: u32,

    /// Mash rest duration in minutes
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(30..=120))]
    mash_duration: u32,

    /// Boil duration in minutes; defaults to the boil time
    #[arg(long, value_parser = clap::value_parser!(u32).range(30..=120))]
    boil_duration: Option<u32>,

    /// Start time HH:MM (optional); defaults to now
    #[arg(long)]
    start: Option<String>,

    /// Load a recipe JSON before applying CLI overrides
    #[arg(long)]
    recipe: Option<PathBuf>,

    /// Save the effective recipe to a recipe JSON
    #[arg(long)]
    save_recipe: Option<PathBuf>,
}

impl Args {
    fn to_recipe(&self) -> Recipe {
        Recipe {
            style: self.style.into(),
            batch_size_l: self.batch_size,
            grain_weight_kg: self.grain_weight,
            grains: self.grains.clone(),
            mash: MashProfile {
                target_temp_c: self.mash_temp,
                ratio_l_per_kg: self.ratio,
                strike_override_c: self.strike_temp,
            },
            boil_time_min: self.boil_time,
            hops: self.hops.clone(),
            fermentation: Fermentation {
                temp_c: self.ferment_temp,
                primary_days: self.primary_days,
                secondary_days: self.secondary_days,
                conditioning_days: self.conditioning_days,
            },
            gravity: Gravity {
                og: self.og,
                fg: self.fg,
            },
            yeast: self.yeast.clone(),
            misc: self.misc.clone(),
            schedule: Schedule {
                brew_day_h: self.brew_day_hours,
                mash_min: self.mash_duration,
                boil_min: self.boil_duration,
            },
        }
    }
}

fn check_range(name: &str, value: f64, lo: f64, hi: f64) {
    if !(lo..=hi).contains(&value) {
        eprintln!("{name} must be between {lo} and {hi} (got {value})");
        std::process::exit(1);
    }
}

fn fmt_end(t: Option<NaiveTime>) -> String {
    match t {
        Some(t) => format!(" → ~end at {:02}:{:02}", t.hour(), t.minute()),
        None => "".to_string(),
    }
}

fn main() {
    let args = Args::parse();
    let mut recipe = args.to_recipe();

    // Load recipe file if present, then apply CLI overrides (CLI wins).
    if let Some(path) = &args.recipe {
        let Ok(txt) = fs::read_to_string(path) else {
            eprintln!("Failed to read recipe: {}", path.display());
            std::process::exit(1);
        };
        let file: Recipe = match serde_json::from_str(&txt) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Invalid recipe JSON {}: {e}", path.display());
                std::process::exit(1);
            }
        };

        // Defaults snapshot to detect "unset" fields
        let def = Args::parse_from(["brewday"]);

        macro_rules! take {
            ($flag:ident, $($field:tt).+) => {
                if args.$flag == def.$flag {
                    recipe.$($field).+ = file.$($field).+;
                }
            };
        }

        take!(style, style);
        take!(batch_size, batch_size_l);
        take!(grain_weight, grain_weight_kg);
        take!(mash_temp, mash.target_temp_c);
        take!(ratio, mash.ratio_l_per_kg);
        take!(boil_time, boil_time_min);
        take!(ferment_temp, fermentation.temp_c);
        take!(primary_days, fermentation.primary_days);
        take!(secondary_days, fermentation.secondary_days);
        take!(conditioning_days, fermentation.conditioning_days);
        take!(og, gravity.og);
        take!(fg, gravity.fg);
        take!(yeast, yeast);
        take!(brew_day_hours, schedule.brew_day_h);
        take!(mash_duration, schedule.mash_min);
        if args.strike_temp.is_none() {
            recipe.mash.strike_override_c = file.mash.strike_override_c;
        }
        if args.boil_duration.is_none() {
            recipe.schedule.boil_min = file.schedule.boil_min;
        }
        if args.grains.is_empty() {
            recipe.grains = file.grains;
        }
        if args.hops.is_empty() {
            recipe.hops = file.hops;
        }
        if args.misc.is_empty() {
            recipe.misc = file.misc;
        }
    }

    // Widget-range checks the core's domain rules do not cover
    check_range("batch-size", recipe.batch_size_l, 1.0, 100.0);
    check_range("grain-weight", recipe.grain_weight_kg, 0.1, 20.0);
    check_range("mash-temp", recipe.mash.target_temp_c, 60.0, 75.0);
    check_range("ratio", recipe.mash.ratio_l_per_kg, 2.0, 4.0);
    if let Some(t) = recipe.mash.strike_override_c {
        check_range("strike-temp", t, 50.0, 100.0);
    }
    check_range("ferment-temp", recipe.fermentation.temp_c, 15.0, 25.0);
    check_range("og", recipe.gravity.og, 1.000, 1.200);
    check_range("fg", recipe.gravity.fg, 0.900, 1.200);

    let policy = if args.rescale_sparge {
        SpargePolicy::Rescale
    } else {
        SpargePolicy::Keep
    };

    let brew: BrewPlan = match plan(&recipe, policy) {
        Ok(p) => p,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            std::process::exit(1);
        }
    };

    // Save recipe if requested (using the effective, validated recipe).
    if let Some(path) = &args.save_recipe {
        if let Err(e) = fs::write(path, serde_json::to_string_pretty(&recipe).unwrap()) {
            eprintln!("Failed to save recipe: {e}");
            std::process::exit(1);
        } else {
            println!("Recipe saved to {}", path.display());
        }
    }

    if brew.mash_water_l > recipe.batch_size_l {
        eprintln!(
            "The mash water volume ({:.2} L) exceeds the batch size ({:.2} L). \
             Adjust the ratio or grain weight, or pass --rescale-sparge.",
            brew.mash_water_l, recipe.batch_size_l
        );
    }

    // Grain bill table
    let mut grain_table = Table::new();
    grain_table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Grain").add_attribute(Attribute::Bold),
            Cell::new("Weight").add_attribute(Attribute::Bold),
        ]);
    for grain in &recipe.grains {
        grain_table.add_row(vec![
            Cell::new(&grain.name),
            Cell::new(format!("{:.2} kg", grain.weight_kg)),
        ]);
    }
    grain_table.add_row(vec![
        Cell::new("Total"),
        Cell::new(format!("{:.2} kg", recipe.grain_weight_kg)),
    ]);

    println!("\n=== Grain bill ({}) ===", recipe.style);
    println!("{grain_table}");

    // Water & temperatures table
    let mut water_table = Table::new();
    water_table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Step").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
        ]);
    water_table.add_row(vec![
        Cell::new("Mash water"),
        Cell::new(format!("{:.2} L", brew.mash_water_l)),
        Cell::new(format!("{:.1} L/kg", recipe.mash.ratio_l_per_kg)),
    ]);
    water_table.add_row(vec![
        Cell::new("Strike temperature"),
        Cell::new(format!("{:.1} °C", brew.strike_temp_c)),
        Cell::new(if recipe.mash.strike_override_c.is_some() {
            "explicit override".to_string()
        } else {
            format!("for a {:.1} °C mash", recipe.mash.target_temp_c)
        }),
    ]);
    if let (Some(ratio), Some(volume)) = (
        brew.sparge.adjusted_ratio,
        brew.sparge.adjusted_mash_water_l,
    ) {
        water_table.add_row(vec![
            Cell::new("Adjusted ratio"),
            Cell::new(format!("{ratio:.2} L/kg")),
            Cell::new("rescaled to fit the batch"),
        ]);
        water_table.add_row(vec![
            Cell::new("Adjusted mash water"),
            Cell::new(format!("{volume:.2} L")),
            Cell::new(""),
        ]);
    }
    water_table.add_row(vec![
        Cell::new("Sparge water"),
        Cell::new(format!("{:.2} L", brew.sparge.sparge_l)),
        Cell::new(format!("{:.2} L batch", recipe.batch_size_l)),
    ]);

    println!("\n=== Water & temperatures ===");
    println!("{water_table}");

    // Hop schedule table
    let mut hop_table = Table::new();
    hop_table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Hop").add_attribute(Attribute::Bold),
            Cell::new("Amount").add_attribute(Attribute::Bold),
            Cell::new("Boil time").add_attribute(Attribute::Bold),
        ]);
    for hop in &recipe.hops {
        hop_table.add_row(vec![
            Cell::new(&hop.name),
            Cell::new(format!("{:.1} g", hop.amount_g)),
            Cell::new(format!("{} min", hop.time_min)),
        ]);
    }

    println!("\n=== Hop schedule ({} min boil) ===", recipe.boil_time_min);
    println!("{hop_table}");

    println!("\n=== Fermentation & gravity ===");
    println!(
        "- Ferment at {:.1} °C, {} days total",
        recipe.fermentation.temp_c, brew.fermentation_days
    );
    println!(
        "- OG {:.3} → FG {:.3} → ~{:.2}% ABV",
        recipe.gravity.og, recipe.gravity.fg, brew.abv_percent
    );

    // Start time and phase ends
    let start_time = if let Some(hhmm) = args.start.as_ref() {
        NaiveTime::parse_from_str(hhmm, "%H:%M").ok()
    } else {
        Some(Local::now().naive_local().time())
    };

    let (t_mash_end, t_boil_end) = if let Some(st) = start_time {
        let start = Local::now().date_naive().and_time(st);
        let mash_end = start + Duration::minutes(recipe.schedule.mash_min as i64);
        let boil_end = mash_end + Duration::minutes(brew.boil_duration_min as i64);
        (Some(mash_end.time()), Some(boil_end.time()))
    } else {
        (None, None)
    };

    println!(
        "\n=== Brew day ({} h planned) ===",
        recipe.schedule.brew_day_h
    );
    println!(
        "- Mash: {} min{}",
        recipe.schedule.mash_min,
        fmt_end(t_mash_end)
    );
    println!(
        "- Boil: {} min{}",
        brew.boil_duration_min,
        fmt_end(t_boil_end)
    );

    // Full recipe sheet
    let summary = build_summary(&recipe, &brew);
    println!("\n=== Brewing summary ===");
    for section in &summary.sections {
        println!("\n{}", section.title);
        for item in &section.items {
            println!("- {}: {}", item.label, item.value);
        }
    }

    println!("\nNotes:");
    println!("• Strike temperature is a linear rule of thumb (target + 0.4 × ratio − 0.5); tun preheat losses are not modeled.");
    println!("• ABV uses the (OG − FG) × 131.25 estimate; fine for ordinary gravities, pessimistic above ~1.090.");
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_specs_parse() {
        let g = parse_grain("Pale Malt:4.5").unwrap();
        assert_eq!(g.name, "Pale Malt");
        assert!((g.weight_kg - 4.5).abs() < 1e-9);

        // empty names pass here; core validation reports them per field
        assert_eq!(parse_grain(":0.5").unwrap().name, "");
        assert!(parse_grain("Pale Malt").is_err());
        assert!(parse_grain("Pale Malt:heavy").is_err());
    }

    #[test]
    fn hop_specs_parse() {
        let h = parse_hop("Cascade:20@60").unwrap();
        assert_eq!(h.name, "Cascade");
        assert!((h.amount_g - 20.0).abs() < 1e-9);
        assert_eq!(h.time_min, 60);

        assert!(parse_hop("Cascade:20").is_err());
        assert!(parse_hop("Cascade:lots@60").is_err());
        assert!(parse_hop("Cascade:20@end").is_err());
    }

    #[test]
    fn misc_specs_parse() {
        let m = parse_misc("Irish Moss=5 g").unwrap();
        assert_eq!(m.name, "Irish Moss");
        assert_eq!(m.amount, "5 g");

        assert!(parse_misc("Irish Moss").is_err());
    }

    #[test]
    fn defaults_mirror_the_recipe_form() {
        let args = Args::parse_from(["brewday"]);
        let recipe = args.to_recipe();

        assert_eq!(recipe.style, BeerStyle::Ale);
        assert!((recipe.batch_size_l - 20.0).abs() < 1e-9);
        assert!((recipe.grain_weight_kg - 5.0).abs() < 1e-9);
        assert!((recipe.mash.ratio_l_per_kg - 2.5).abs() < 1e-9);
        assert_eq!(recipe.boil_time_min, 60);
        assert_eq!(recipe.fermentation.primary_days, 7);
        assert_eq!(recipe.schedule.boil_min, None);
    }

    #[test]
    fn ranged_flags_reject_out_of_window_values() {
        assert!(Args::try_parse_from(["brewday", "--boil-time", "20"]).is_err());
        assert!(Args::try_parse_from(["brewday", "--primary-days", "3"]).is_err());
        assert!(Args::try_parse_from(["brewday", "--brew-day-hours", "16"]).is_err());
    }
}
