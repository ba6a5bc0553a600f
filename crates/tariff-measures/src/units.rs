//! # Unit and Currency Tables
//!
//! Static lookup data used when rendering threshold text. Each measurement
//! unit maps to a category (weight, volume or count) and, per locale, to
//! the verb and the singular/plural noun used in a sentence such as
//! "If your shipment **weighs** more than 2 **kilograms**".
//!
//! Qualified units are stored under the unit code followed by the
//! qualifier code (`KGM` + `G` = `KGMG`).
//!
//! Welsh phrases are only available for the commonest units; every other
//! entry carries the [`WELSH_PLACEHOLDER`] token until translations land.

use serde::{Deserialize, Serialize};
use tariff_core::Locale;

/// Token standing in for a Welsh phrase that has not been translated.
pub const WELSH_PLACEHOLDER: &str = "TBC";

/// Unit code used when a price-per-unit threshold names no unit.
pub const NO_UNIT_CODE: &str = "NONE";

/// Currency assumed when a price threshold names none.
pub const DEFAULT_MONETARY_UNIT: &str = "GBP";

/// What a measurement unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitCategory {
    /// Mass.
    Weight,
    /// Volume.
    Volume,
    /// Count, length, area, energy and everything else.
    Unit,
}

/// Locale-specific words for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPhrase {
    /// Verb linking "your shipment" to the amount.
    pub verb: &'static str,
    /// Noun for a quantity of exactly one.
    pub singular: &'static str,
    /// Noun for any other quantity.
    pub plural: &'static str,
}

/// One entry of the measurement unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureUnit {
    /// Unit code, optionally suffixed with a qualifier code.
    pub code: &'static str,
    /// What the unit measures.
    pub category: UnitCategory,
    /// English phrase.
    pub en: UnitPhrase,
    /// Welsh phrase.
    pub cy: UnitPhrase,
}

impl MeasureUnit {
    /// Look up a unit by code.
    pub fn lookup(code: &str) -> Option<&'static MeasureUnit> {
        MEASURE_UNITS.iter().find(|u| u.code == code)
    }

    /// Phrase for a locale.
    pub fn phrase(&self, locale: Locale) -> &UnitPhrase {
        match locale {
            Locale::En => &self.en,
            Locale::Cy => &self.cy,
        }
    }

    /// Noun for `quantity` units in `locale`.
    pub fn noun(&self, locale: Locale, quantity: i64) -> &'static str {
        let phrase = self.phrase(locale);
        if quantity == 1 {
            phrase.singular
        } else {
            phrase.plural
        }
    }
}

const fn en(verb: &'static str, singular: &'static str, plural: &'static str) -> UnitPhrase {
    UnitPhrase {
        verb,
        singular,
        plural,
    }
}

const CY_TBC: UnitPhrase = UnitPhrase {
    verb: WELSH_PLACEHOLDER,
    singular: WELSH_PLACEHOLDER,
    plural: WELSH_PLACEHOLDER,
};

const fn unit(code: &'static str, category: UnitCategory, en: UnitPhrase) -> MeasureUnit {
    MeasureUnit {
        code,
        category,
        en,
        cy: CY_TBC,
    }
}

const fn unit_cy(
    code: &'static str,
    category: UnitCategory,
    en: UnitPhrase,
    cy: UnitPhrase,
) -> MeasureUnit {
    MeasureUnit {
        code,
        category,
        en,
        cy,
    }
}

use UnitCategory::{Unit, Volume, Weight};

/// The measurement unit table.
pub static MEASURE_UNITS: &[MeasureUnit] = &[
    unit("ASV", Unit, en("has an alcoholic strength of", "% vol", "% vol")),
    unit("CCT", Weight, en("has a carrying capacity of", "tonne", "tonnes")),
    unit("CEN", Unit, en("contains", "hundred items", "hundred items")),
    unit("CTM", Weight, en("weighs", "carat", "carats")),
    unit("DAP", Weight, en("weighs", "decatonne (corrected for polarisation)", "decatonnes (corrected for polarisation)")),
    unit("DHS", Weight, en("contains", "kilogram of dihydrostreptomycin", "kilograms of dihydrostreptomycin")),
    unit("DTN", Weight, en("weighs", "hectokilogram", "hectokilograms")),
    unit("DTNR", Weight, en("weighs", "hectokilogram (standard quality)", "hectokilograms (standard quality)")),
    unit("GFI", Weight, en("contains", "gram of fissile isotopes", "grams of fissile isotopes")),
    unit("GRM", Weight, en("weighs", "gram", "grams")),
    unit("GRT", Unit, en("has a gross tonnage of", "tonne", "tonnes")),
    unit("HLT", Volume, en("is", "hectolitre", "hectolitres")),
    unit("HMT", Unit, en("measures", "hectometre", "hectometres")),
    unit("KAC", Weight, en("contains", "kilogram of net acid", "kilograms of net acid")),
    unit("KCC", Weight, en("contains", "kilogram of choline chloride", "kilograms of choline chloride")),
    unit("KCL", Weight, en("contains", "tonne of potassium chloride", "tonnes of potassium chloride")),
    unit_cy("KGM", Weight, en("weighs", "kilogram", "kilograms"), en("yn pwyso", "cilogram", "cilogram")),
    unit("KGME", Weight, en("weighs", "kilogram (net drained weight)", "kilograms (net drained weight)")),
    unit("KGMG", Weight, en("weighs", "kilogram (gross)", "kilograms (gross)")),
    unit("KLT", Volume, en("is", "thousand litres", "thousand litres")),
    unit("KMA", Weight, en("contains", "kilogram of methylamines", "kilograms of methylamines")),
    unit("KMT", Unit, en("measures", "kilometre", "kilometres")),
    unit("KNI", Weight, en("contains", "kilogram of nitrogen", "kilograms of nitrogen")),
    unit("KNS", Weight, en("contains", "kilogram of hydrogen peroxide", "kilograms of hydrogen peroxide")),
    unit("KPH", Weight, en("contains", "kilogram of potassium hydroxide", "kilograms of potassium hydroxide")),
    unit("KPO", Weight, en("contains", "kilogram of potassium oxide", "kilograms of potassium oxide")),
    unit("KPP", Weight, en("contains", "kilogram of diphosphorus pentaoxide", "kilograms of diphosphorus pentaoxide")),
    unit("KSD", Weight, en("weighs", "kilogram of substance 90% dry", "kilograms of substance 90% dry")),
    unit("KSH", Weight, en("contains", "kilogram of sodium hydroxide", "kilograms of sodium hydroxide")),
    unit("KUR", Weight, en("contains", "kilogram of uranium", "kilograms of uranium")),
    unit("LPA", Volume, en("contains", "litre of pure alcohol", "litres of pure alcohol")),
    unit_cy("LTR", Volume, en("is", "litre", "litres"), en("yn", "litr", "litr")),
    unit("MIL", Unit, en("contains", "thousand items", "thousand items")),
    unit("MTK", Unit, en("measures", "square metre", "square metres")),
    unit("MTQ", Volume, en("is", "cubic metre", "cubic metres")),
    unit("MTR", Unit, en("measures", "metre", "metres")),
    unit("MWH", Unit, en("is", "megawatt hour", "megawatt hours")),
    unit_cy("NAR", Unit, en("contains", "item", "items"), en("yn cynnwys", "eitem", "eitemau")),
    unit("NCL", Unit, en("contains", "cell", "cells")),
    unit("NPR", Unit, en("contains", "pair", "pairs")),
    unit("TJO", Unit, en("is", "terajoule", "terajoules")),
    unit("TNE", Weight, en("weighs", "tonne", "tonnes")),
    unit("TNEI", Weight, en("contains", "tonne of biodiesel content", "tonnes of biodiesel content")),
    unit("LTRA", Volume, en("contains", "litre of alcohol", "litres of alcohol")),
    unit_cy(NO_UNIT_CODE, Unit, en("contains", "unit", "units"), en("yn cynnwys", "uned", "unedau")),
];

/// One entry of the currency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonetaryUnitCode {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
}

/// The currency table.
pub static MONETARY_UNITS: &[MonetaryUnitCode] = &[
    MonetaryUnitCode { code: "GBP", symbol: "£" },
    MonetaryUnitCode { code: "EUR", symbol: "€" },
    MonetaryUnitCode { code: "USD", symbol: "$" },
];

impl MonetaryUnitCode {
    /// Look up a currency by code.
    pub fn lookup(code: &str) -> Option<&'static MonetaryUnitCode> {
        MONETARY_UNITS.iter().find(|m| m.code == code)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn unit_codes_are_unique() {
        let codes: HashSet<&str> = MEASURE_UNITS.iter().map(|u| u.code).collect();
        assert_eq!(codes.len(), MEASURE_UNITS.len());
        assert_eq!(MEASURE_UNITS.len(), 45);
    }

    #[test]
    fn no_unit_sentinel_resolves() {
        let none = MeasureUnit::lookup(NO_UNIT_CODE).unwrap();
        assert_eq!(none.category, UnitCategory::Unit);
    }

    #[test]
    fn litre_is_volume_with_plural() {
        let ltr = MeasureUnit::lookup("LTR").unwrap();
        assert_eq!(ltr.category, UnitCategory::Volume);
        assert_eq!(ltr.phrase(Locale::En).verb, "is");
        assert_eq!(ltr.noun(Locale::En, 1), "litre");
        assert_eq!(ltr.noun(Locale::En, 100), "litres");
        assert_eq!(ltr.noun(Locale::En, 0), "litres");
    }

    #[test]
    fn untranslated_units_carry_welsh_placeholder() {
        let tne = MeasureUnit::lookup("TNE").unwrap();
        assert_eq!(tne.phrase(Locale::Cy).verb, WELSH_PLACEHOLDER);
        assert_eq!(tne.noun(Locale::Cy, 3), WELSH_PLACEHOLDER);
    }

    #[test]
    fn unknown_unit_is_absent() {
        assert!(MeasureUnit::lookup("XYZ").is_none());
        assert!(MeasureUnit::lookup("").is_none());
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(MonetaryUnitCode::lookup("GBP").unwrap().symbol, "£");
        assert_eq!(MonetaryUnitCode::lookup("EUR").unwrap().symbol, "€");
        assert!(MonetaryUnitCode::lookup("JPY").is_none());
    }
}
