use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, test_extractor};

#[test]
fn home_page_loads_successfully() {
    let extractor = test_extractor();

    let resp = handle(get("/"), &extractor).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("What is your home worth?"));
    assert!(body.contains("/estimate"));
}

#[test]
fn estimate_starts_at_the_address_step() {
    let extractor = test_extractor();

    let resp = handle(get("/estimate"), &extractor).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("value=\"address\""));
    assert!(body.contains("name=\"address\""));
    assert!(body.contains("Property Address"));
}

#[test]
fn full_wizard_walk_reaches_the_results() {
    let extractor = test_extractor();

    // Step 1 -> 2: address in, assessment step out.
    let resp = handle(
        post_form(
            "/estimate",
            "step=address&action=next&address=500+Rue+Test%2C+Montreal",
        ),
        &extractor,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("value=\"assessment\""));
    assert!(body.contains("name=\"municipal_value\""));
    // The address is carried forward as hidden state.
    assert!(body.contains("500 Rue Test, Montreal"));

    // Step 2 -> 3: a valid municipal value advances to the condition step.
    let resp = handle(
        post_form(
            "/estimate",
            "step=assessment&action=next&address=500+Rue+Test%2C+Montreal&municipal_value=450000",
        ),
        &extractor,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("value=\"condition\""));
    assert!(body.contains("name=\"roof_age\""));

    // Step 3 -> 4: the market step shows the four neighbors around 500.
    let resp = handle(
        post_form(
            "/estimate",
            "step=condition&action=next&address=500+Rue+Test%2C+Montreal&municipal_value=450000",
        ),
        &extractor,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("value=\"market\""));
    for neighbor in ["350 Rue Test", "425 Rue Test", "600 Rue Test", "700 Rue Test"] {
        assert!(body.contains(neighbor), "missing comparable {neighbor}");
    }
    // 450,000 times the fixed multipliers.
    for price in ["$414,000", "$472,500", "$436,500", "$486,000"] {
        assert!(body.contains(price), "missing comparable price {price}");
    }

    // Step 4 -> 5: the results step shows the estimate and its band.
    let resp = handle(
        post_form(
            "/estimate",
            "step=market&action=next&address=500+Rue+Test%2C+Montreal&municipal_value=450000",
        ),
        &extractor,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("value=\"results\""));
    assert!(body.contains("$450,000"));
    assert!(body.contains("$414,000")); // lower bound of the ±8% band
    assert!(body.contains("$486,000")); // upper bound
    assert!(body.contains("Download Report"));
}

#[test]
fn condition_answers_shift_the_estimate() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/estimate",
            "step=market&action=next&address=500+Rue+Test&municipal_value=450000\
             &roof_age=less20&windows_age=more20&flooring_type=hardwood\
             &bathroom_renovated=yes&kitchen_renovated=no",
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    // 450000 + 15000 - 15000 + 20000 + round(450000 * 0.03) = 483,500
    assert!(body.contains("$483,500"));
    assert!(body.contains("$444,820"));
    assert!(body.contains("$522,180"));
}

#[test]
fn out_of_range_municipal_value_stays_on_the_assessment() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/estimate",
            "step=assessment&action=next&address=500+Rue+Test&municipal_value=50000",
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains("value=\"assessment\""));
    assert!(body.contains("Property value must be at least $100,000"));
}

#[test]
fn empty_municipal_value_blocks_the_assessment() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/estimate",
            "step=assessment&action=next&address=500+Rue+Test&municipal_value=",
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains("value=\"assessment\""));
    assert!(body.contains("Property value is required"));
}

#[test]
fn back_returns_to_the_previous_step() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/estimate",
            "step=market&action=back&address=500+Rue+Test&municipal_value=450000",
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains("value=\"condition\""));
}

#[test]
fn extract_action_fills_the_assessment_fields() {
    let extractor = test_extractor();

    // "Valeur de l'immeuble : 1 022 400 $" plus the year, form-encoded.
    let pasted = "pasted_text=Valeur+de+l%27immeuble+%3A+1+022+400+%24%0A\
                  Ann%C3%A9e+de+construction+%3A+1965";
    let resp = handle(
        post_form(
            "/estimate",
            &format!("step=assessment&action=extract&address=500+Rue+Test&{pasted}"),
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    // Stays on the assessment step with the fields filled in.
    assert!(body.contains("value=\"assessment\""));
    assert!(body.contains("value=\"1022400\""));
    assert!(body.contains("value=\"1965\""));
    assert!(body.contains("Values extracted successfully!"));
}

#[test]
fn extract_with_unrecognized_text_reports_no_values() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/estimate",
            "step=assessment&action=extract&pasted_text=nothing+recognizable+here",
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains("No values found"));
}

#[test]
fn address_without_a_street_number_still_renders_the_market_step() {
    let extractor = test_extractor();

    let resp = handle(
        post_form(
            "/estimate",
            "step=condition&action=next&address=Rue+Test&municipal_value=450000",
        ),
        &extractor,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains("value=\"market\""));
    assert!(body.contains("We couldn't generate comparables"));
    assert!(body.contains("Not enough market data"));
}
