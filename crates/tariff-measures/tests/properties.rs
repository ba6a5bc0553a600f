//! # Measure Engine Properties
//!
//! Property and scenario tests over the public API: classification is total
//! and pure, additional-code narrowing is idempotent, and the documented
//! rendering examples hold end to end.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use tariff_content::{DocumentDescription, InMemoryDocumentStore};
use tariff_core::{Locale, TradeType};
use tariff_measures::{
    narrow_by_additional_code, select_restrictive_measures, AdditionalCode, ConditionKind,
    GeographicalArea, Measure, MeasureCondition, MeasureConditionCode, MeasureConditionType,
    MeasureOption, MeasureType, OptionSynthesizer,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn condition_code() -> impl Strategy<Value = MeasureConditionCode> {
    prop::sample::select(MeasureConditionCode::all().to_vec())
}

fn one_of(values: &[&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(values.to_vec()).prop_map(str::to_string)
}

fn condition_kind() -> impl Strategy<Value = ConditionKind> {
    prop_oneof![
        ("[A-Z0-9 ]{0,4}", ".{0,20}").prop_map(|(document_code, description)| {
            ConditionKind::Documentary {
                document_code,
                description,
            }
        }),
        ("[0-9]{1,4}\\.[0-9]{0,3}", one_of(&["GBP", "EUR", ""])).prop_map(|(amount, monetary_unit_code)| {
            ConditionKind::PriceBased {
                amount,
                monetary_unit_code,
            }
        }),
        ("[0-9]{1,4}", one_of(&["GBP", ""]), one_of(&["KGM", "DTN", ""])).prop_map(
            |(amount, monetary_unit_code, measurement_unit_code)| {
                ConditionKind::PricePerUnitBased {
                    amount,
                    monetary_unit_code,
                    measurement_unit_code,
                }
            }
        ),
        ("[0-9]{1,4}", one_of(&["KGM", "LTR", "NAR", "XYZ"])).prop_map(|(amount, measurement_unit_code)| {
            ConditionKind::WeightVolumeUnitBased {
                amount,
                measurement_unit_code,
            }
        }),
        Just(ConditionKind::Negative),
    ]
}

fn condition() -> impl Strategy<Value = MeasureCondition> {
    (condition_code(), condition_kind(), proptest::option::of("[a-z0-9 ]{0,10}")).prop_map(
        |(condition_code, kind, requirement)| MeasureCondition {
            id: "c".to_string(),
            condition_code,
            condition: String::new(),
            requirement,
            action: String::new(),
            kind,
        },
    )
}

fn measure_with(id: String, additional_code: Option<(String, bool)>) -> Measure {
    Measure {
        id,
        tax_measure: false,
        applicable_trade_types: [TradeType::Import].into_iter().collect(),
        measure_type: MeasureType {
            id: "750".to_string(),
            series_id: "B".to_string(),
            description: String::new(),
        },
        geographical_area: GeographicalArea {
            id: "CN".to_string(),
            description: None,
            child_area_ids: BTreeSet::new(),
        },
        additional_code: additional_code.map(|(code, residual)| AdditionalCode {
            code,
            description: String::new(),
            residual,
        }),
        duty_value: None,
        quota_number: None,
        measure_conditions: vec![],
        legal_act: None,
        excluded_countries: BTreeSet::new(),
    }
}

fn measures() -> impl Strategy<Value = Vec<Measure>> {
    prop::collection::vec(
        proptest::option::of(("4[0-9]{2}", any::<bool>())),
        0..12,
    )
    .prop_map(|codes| {
        codes
            .into_iter()
            .enumerate()
            .map(|(i, code)| measure_with(i.to_string(), code))
            .collect()
    })
}

proptest! {
    /// Every condition lands in exactly one category, the same one every
    /// time, and negative conditions never carry a key.
    #[test]
    fn classification_is_total_and_pure(c in condition()) {
        let first = c.classification();
        prop_assert_eq!(first, c.clone().classification());
        prop_assert!(matches!(
            first,
            MeasureConditionType::Certificate
                | MeasureConditionType::Exception
                | MeasureConditionType::Threshold
                | MeasureConditionType::Negative
        ));
        if first == MeasureConditionType::Negative {
            prop_assert!(c.condition_key().is_none());
        }
    }

    /// Narrowing twice with the same code equals narrowing once.
    #[test]
    fn narrowing_is_idempotent(
        measures in measures(),
        code in proptest::option::of("4[0-9]{2}"),
    ) {
        let once = narrow_by_additional_code(measures.clone(), code.as_deref());
        let twice = narrow_by_additional_code(once.clone(), code.as_deref());
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

fn documentary(id: &str, code: MeasureConditionCode, document: &str) -> MeasureCondition {
    MeasureCondition {
        id: id.to_string(),
        condition_code: code,
        condition: String::new(),
        requirement: None,
        action: String::new(),
        kind: ConditionKind::Documentary {
            document_code: document.to_string(),
            description: String::new(),
        },
    }
}

fn description(code: &str, text: &str) -> DocumentDescription {
    DocumentDescription {
        document_code: code.to_string(),
        trade_type: TradeType::Import,
        locale: Locale::En,
        description: text.to_string(),
    }
}

#[tokio::test]
async fn exception_text_is_rewritten_as_exemption() {
    let store = InMemoryDocumentStore::new(vec![description(
        "Y900",
        "Your goods are for scientific purposes.",
    )]);
    let synth = OptionSynthesizer::new(Arc::new(store));
    let groups = synth
        .synthesize(
            "m",
            &[documentary("1", MeasureConditionCode::Y, "Y900")],
            TradeType::Import,
            Locale::En,
        )
        .await
        .unwrap();
    assert_eq!(
        groups[0].options[0].description(),
        Some("If your goods are for scientific purposes, then your goods are exempt.")
    );
}

#[tokio::test]
async fn price_threshold_renders_with_sterling() {
    let synth = OptionSynthesizer::new(Arc::new(InMemoryDocumentStore::default()));
    let condition = MeasureCondition {
        id: "1".to_string(),
        condition_code: MeasureConditionCode::E,
        condition: String::new(),
        requirement: None,
        action: String::new(),
        kind: ConditionKind::PriceBased {
            amount: "100".to_string(),
            monetary_unit_code: "GBP".to_string(),
        },
    };
    let groups = synth
        .synthesize("m", &[condition], TradeType::Import, Locale::En)
        .await
        .unwrap();
    assert!(matches!(
        &groups[0].options[0],
        MeasureOption::Threshold { description, .. }
            if description == "If the value of your shipment is less than £100, then your goods are exempt."
    ));
}

#[test]
fn excluded_group_member_is_dropped_and_specific_measure_wins() {
    let mut group = measure_with("group".to_string(), None);
    group.geographical_area.id = "1011".to_string();
    group.geographical_area.child_area_ids = ["CN".to_string(), "US".to_string()].into();
    group.excluded_countries.insert("CN".to_string());
    let measures = vec![group];
    assert!(select_restrictive_measures(&measures, TradeType::Import, "CN").is_empty());

    let mut group = measure_with("group".to_string(), None);
    group.geographical_area.id = "1011".to_string();
    group.geographical_area.child_area_ids = ["CN".to_string()].into();
    let specific = measure_with("specific".to_string(), None);
    let measures = vec![group, specific];
    let selected = select_restrictive_measures(&measures, TradeType::Import, "CN");
    let ids: Vec<&str> = selected.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["specific"]);
}
