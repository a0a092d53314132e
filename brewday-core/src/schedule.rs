/// Total fermentation length in days: primary + secondary + conditioning.
/// A zero day count means the stage is skipped.
pub fn total_fermentation_days(primary_days: u32, secondary_days: u32, conditioning_days: u32) -> u32 {
    primary_days + secondary_days + conditioning_days
}

/* ===========================
Unit tests
=========================== */
