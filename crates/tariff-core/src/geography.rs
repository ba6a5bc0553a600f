//! # Geography
//!
//! EU membership and country normalisation. Measures applying to EU member
//! states are published against the single `"EU"` area rather than each
//! member state, so any comparison country that is a member is replaced by
//! the sentinel before geographical matching.

/// Sentinel area id used in place of any EU member state.
pub const EU_SENTINEL: &str = "EU";

/// ISO 3166-1 alpha-2 codes of the EU member states.
pub const EU_MEMBER_STATES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GR", "HR", "HU", "IE",
    "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Whether `country` is an EU member state.
pub fn is_eu_member(country: &str) -> bool {
    EU_MEMBER_STATES.contains(&country)
}

/// Substitute [`EU_SENTINEL`] for EU member states; pass everything else
/// through unchanged.
pub fn normalise_country(country: &str) -> &str {
    if is_eu_member(country) {
        EU_SENTINEL
    } else {
        country
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_states_collapse_to_sentinel() {
        assert_eq!(normalise_country("FR"), "EU");
        assert_eq!(normalise_country("IE"), "EU");
    }

    #[test]
    fn non_members_pass_through() {
        assert_eq!(normalise_country("CN"), "CN");
        assert_eq!(normalise_country("GB"), "GB");
        assert_eq!(normalise_country("EU"), "EU");
    }

    #[test]
    fn member_list_has_twenty_seven_states() {
        assert_eq!(EU_MEMBER_STATES.len(), 27);
    }
}
