//! The whole computation pipeline, end to end: extract fields from pasted
//! text, validate the resulting record, and run the valuation twice to
//! confirm the pipeline is a pure function of its input.

use crate::domain::extract::ExtractionStatus;
use crate::domain::property::{AgeBand, PropertyRecord};
use crate::domain::validate::is_property_data_valid;
use crate::domain::valuation::calculate_valuation;
use crate::tests::utils::test_extractor;

#[test]
fn extraction_to_valuation_round_trip_is_idempotent() {
    let text = "Valeur de l'immeuble : 450 000 $\n\
                Année de construction : 1965\n\
                Superficie du terrain : 483.1 m²";

    let extraction = test_extractor().extract(text);
    assert_eq!(extraction.status, ExtractionStatus::Success);

    let record = PropertyRecord {
        address: "500 Rue Test, Montreal".to_string(),
        municipal_value: extraction.fields.municipal_value.clone().unwrap(),
        lot_size: extraction.fields.lot_size.clone().unwrap(),
        year_built: extraction.fields.year_built.clone().unwrap(),
        roof_age: Some(AgeBand::LessThan20),
        bathroom_renovated: Some(true),
        ..PropertyRecord::default()
    };

    assert!(is_property_data_valid(&record, 2026));

    let first = calculate_valuation(&record);
    let second = calculate_valuation(&record);

    assert_eq!(first, second);
    // 450000 + 15000 + round(450000 * 0.03)
    assert_eq!(first.final_value, 478_500);
}
