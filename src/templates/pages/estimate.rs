// templates/pages/estimate.rs

use crate::domain::comparables::{ComparableProperty, ListingStatus};
use crate::domain::extract::{ExtractionResult, ExtractionStatus};
use crate::domain::metrics::MarketMetrics;
use crate::domain::property::{AgeBand, Flooring, PropertyRecord};
use crate::domain::validate::PropertyValidation;
use crate::domain::valuation::Valuation;
use crate::templates::{card, desktop_layout, field_error, format_dollars, step_progress};
use crate::wizard::Step;
use maud::{html, Markup};

/// Everything one render of the wizard needs. The record is echoed back as
/// hidden fields so the flow stays stateless between requests.
pub struct EstimateVm<'a> {
    pub record: &'a PropertyRecord,
    pub step: Step,
    pub validation: Option<&'a PropertyValidation>,
    pub extraction: Option<&'a ExtractionResult>,
    pub pasted_text: &'a str,
    pub valuation: Option<Valuation>,
    pub comparables: Vec<ComparableProperty>,
    pub metrics: Option<MarketMetrics>,
}

pub fn estimate_page(vm: &EstimateVm) -> Markup {
    desktop_layout(
        vm.step.title(),
        html! {
            main class="container" {
                (step_progress(vm.step))

                form method="post" action="/estimate" {
                    input type="hidden" name="step" value=(vm.step.as_param());
                    (hidden_state(vm.record, vm.step))

                    @match vm.step {
                        Step::Address => { (address_step(vm)) },
                        Step::Assessment => { (assessment_step(vm)) },
                        Step::Condition => { (condition_step(vm)) },
                        Step::Market => { (market_step(vm)) },
                        Step::Results => { (results_step(vm)) },
                    }

                    div class="wizard-nav" {
                        @if vm.step != Step::Address {
                            button type="submit" name="action" value="back" class="btn" {
                                "Back"
                            }
                        }
                        @if vm.step != Step::Results {
                            button type="submit" name="action" value="next" class="btn btn-primary" {
                                "Next Step"
                            }
                        } @else {
                            a href="/estimate" class="btn" { "Start Over" }
                        }
                    }
                }

                @if vm.step == Step::Results {
                    (export_form(vm.record))
                }
            }
        },
    )
}

/// Hidden inputs for every record field that is not edited on this step.
fn hidden_state(record: &PropertyRecord, step: Step) -> Markup {
    let condition_param = |band: Option<AgeBand>| band.map(AgeBand::as_param).unwrap_or("");
    let yes_no_param = |answer: Option<bool>| match answer {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    };

    html! {
        @if step != Step::Address {
            input type="hidden" name="address" value=(record.address);
        }
        @if step != Step::Assessment {
            input type="hidden" name="municipal_value" value=(record.municipal_value);
            input type="hidden" name="land_value" value=(record.land_value);
            input type="hidden" name="lot_size" value=(record.lot_size);
            input type="hidden" name="year_built" value=(record.year_built);
        }
        @if step != Step::Condition {
            input type="hidden" name="roof_age" value=(condition_param(record.roof_age));
            input type="hidden" name="windows_age" value=(condition_param(record.windows_age));
            input type="hidden" name="flooring_type"
                value=(record.flooring_type.map(Flooring::as_param).unwrap_or(""));
            input type="hidden" name="bathroom_renovated"
                value=(yes_no_param(record.bathroom_renovated));
            input type="hidden" name="kitchen_renovated"
                value=(yes_no_param(record.kitchen_renovated));
        }
    }
}

fn address_step(vm: &EstimateVm) -> Markup {
    html! {
        (card("Where is the property?", html! {
            label for="address" { "Street address" }
            input type="text" id="address" name="address"
                value=(vm.record.address)
                placeholder="500 Rue Test, Montreal";
            p class="hint" {
                "Start with the street number; comparables are generated "
                "around it."
            }
        }))
    }
}

fn assessment_step(vm: &EstimateVm) -> Markup {
    let error = |field: fn(&PropertyValidation) -> &Option<String>| {
        vm.validation.and_then(|v| field(v).as_deref())
    };

    html! {
        (card("Paste your assessment", html! {
            p {
                "Copy the text from \"Section 4: Valeurs au rôle "
                "d'évaluation\" on Montreal.ca (or from the downloaded PDF) "
                "and we'll extract the values automatically."
            }
            textarea name="pasted_text" rows="8"
                placeholder="Valeur de l'immeuble : 1 022 400 $ ..." {
                (vm.pasted_text)
            }
            button type="submit" name="action" value="extract" class="btn" {
                "Extract Values"
            }
            @if let Some(extraction) = vm.extraction {
                (extraction_banner(extraction))
            }
        }))

        (card("Or enter the values yourself", html! {
            label for="municipal_value" { "Municipal property value ($)" }
            input type="text" id="municipal_value" name="municipal_value"
                value=(vm.record.municipal_value);
            (field_error(error(|v| &v.municipal_value)))

            label for="land_value" { "Land value ($, optional)" }
            input type="text" id="land_value" name="land_value"
                value=(vm.record.land_value);

            label for="lot_size" { "Lot size (sq ft, optional)" }
            input type="text" id="lot_size" name="lot_size"
                value=(vm.record.lot_size);
            (field_error(error(|v| &v.lot_size)))

            label for="year_built" { "Year built (optional)" }
            input type="text" id="year_built" name="year_built"
                value=(vm.record.year_built);
            (field_error(error(|v| &v.year_built)))
        }))
    }
}

fn extraction_banner(extraction: &ExtractionResult) -> Markup {
    html! {
        @match extraction.status {
            ExtractionStatus::Success => {
                div class="banner banner-success" {
                    strong { "Values extracted successfully!" }
                    p { "Found the municipal value; check the fields below." }
                }
            },
            ExtractionStatus::Partial => {
                div class="banner banner-warning" {
                    strong { "Partial extraction" }
                    p { "Some values found, but the municipal value is missing. Please check the data." }
                }
            },
            ExtractionStatus::Error => {
                div class="banner banner-error" {
                    strong { "No values found" }
                    p { "Please make sure to copy the property values section from Montreal.ca." }
                }
            },
        }
    }
}

fn condition_step(vm: &EstimateVm) -> Markup {
    let age_select = |name: &str, label: &str, value: Option<AgeBand>| {
        html! {
            label for=(name) { (label) }
            select id=(name) name=(name) {
                option value="" selected[value.is_none()] { "Not sure" }
                option value="less20" selected[value == Some(AgeBand::LessThan20)] {
                    "Less than 20 years old"
                }
                option value="more20" selected[value == Some(AgeBand::MoreThan20)] {
                    "More than 20 years old"
                }
            }
        }
    };
    let yes_no_select = |name: &str, label: &str, value: Option<bool>| {
        html! {
            label for=(name) { (label) }
            select id=(name) name=(name) {
                option value="" selected[value.is_none()] { "Not sure" }
                option value="yes" selected[value == Some(true)] { "Yes" }
                option value="no" selected[value == Some(false)] { "No" }
            }
        }
    };

    html! {
        (card("Tell us about the property's condition", html! {
            (age_select("roof_age", "How old is the roof?", vm.record.roof_age))
            (age_select("windows_age", "How old are the windows?", vm.record.windows_age))

            label for="flooring_type" { "Main flooring" }
            select id="flooring_type" name="flooring_type" {
                option value="" selected[vm.record.flooring_type.is_none()] { "Not sure" }
                option value="hardwood"
                    selected[vm.record.flooring_type == Some(Flooring::Hardwood)] {
                    "Hardwood"
                }
                option value="other"
                    selected[vm.record.flooring_type == Some(Flooring::Other)] {
                    "Other"
                }
            }

            (yes_no_select(
                "bathroom_renovated",
                "Bathroom renovated in the last 10 years?",
                vm.record.bathroom_renovated,
            ))
            (yes_no_select(
                "kitchen_renovated",
                "Kitchen renovated in the last 10 years?",
                vm.record.kitchen_renovated,
            ))
        }))

        @if let Some(valuation) = vm.valuation {
            (valuation_breakdown(&valuation))
        }
    }
}

fn valuation_breakdown(valuation: &Valuation) -> Markup {
    let adjustment_row = |label: &str, amount: i64| {
        html! {
            @if amount != 0 {
                tr {
                    td { (label) }
                    td class=(if amount > 0 { "amount-up" } else { "amount-down" }) {
                        @if amount > 0 { "+" }
                        (format_dollars(amount))
                    }
                }
            }
        }
    };

    card(
        "Adjustments",
        html! {
            table class="breakdown" {
                tr {
                    td { "Municipal assessment" }
                    td { (format_dollars(valuation.base_value)) }
                }
                (adjustment_row("Roof", valuation.roof_adjustment))
                (adjustment_row("Windows", valuation.windows_adjustment))
                (adjustment_row("Hardwood flooring", valuation.flooring_adjustment))
                (adjustment_row("Bathroom renovation", valuation.bathroom_adjustment))
                (adjustment_row("Kitchen renovation", valuation.kitchen_adjustment))
                tr class="total" {
                    td { "Estimated value" }
                    td { (format_dollars(valuation.final_value)) }
                }
            }
        },
    )
}

fn market_step(vm: &EstimateVm) -> Markup {
    html! {
        (comparables_card(&vm.comparables))
        (metrics_card(vm.metrics.as_ref()))
    }
}

fn results_step(vm: &EstimateVm) -> Markup {
    html! {
        @if let Some(valuation) = vm.valuation {
            div class="estimate-headline" {
                h1 { (format_dollars(valuation.final_value)) }
                p {
                    "Estimated range: "
                    strong { (format_dollars(valuation.lower_range)) }
                    " – "
                    strong { (format_dollars(valuation.upper_range)) }
                }
            }
            (valuation_breakdown(&valuation))
        }
        (comparables_card(&vm.comparables))
        (metrics_card(vm.metrics.as_ref()))
    }
}

fn comparables_card(comparables: &[ComparableProperty]) -> Markup {
    card(
        "Nearby market activity",
        html! {
            @if comparables.is_empty() {
                p {
                    "We couldn't generate comparables for that address. "
                    "Make sure it starts with a street number."
                }
            } @else {
                table class="comparables" {
                    tr {
                        th { "Address" }
                        th { "Price" }
                        th { "Status" }
                        th { "Beds" }
                        th { "Baths" }
                        th { "Sq Ft" }
                    }
                    @for comp in comparables {
                        tr {
                            td { (comp.address) }
                            td { (format_dollars(comp.price)) }
                            td {
                                @match &comp.status {
                                    ListingStatus::Listed { days_on_market } => {
                                        "Listed · " (days_on_market) " days on market"
                                    }
                                    ListingStatus::Sold { sold_date } => {
                                        "Sold · " (sold_date)
                                    }
                                }
                            }
                            td { (comp.bedrooms) }
                            td { (comp.bathrooms) }
                            td { (comp.square_feet) }
                        }
                    }
                }
                p class="hint" {
                    "Comparables are illustrative, not real listings."
                }
            }
        },
    )
}

fn metrics_card(metrics: Option<&MarketMetrics>) -> Markup {
    card(
        "Market summary",
        html! {
            @match metrics {
                Some(metrics) => {
                    div class="metric-grid" {
                        div class="metric" {
                            span class="metric-label" { "Average price" }
                            span class="metric-value" { (format_dollars(metrics.avg_price)) }
                        }
                        div class="metric" {
                            span class="metric-label" { "Average $/sq ft" }
                            span class="metric-value" { (format_dollars(metrics.avg_price_per_sqft)) }
                        }
                        div class="metric" {
                            span class="metric-label" { "Market trend" }
                            span class="metric-value" { (metrics.market_trend.label()) }
                        }
                        div class="metric" {
                            span class="metric-label" { "Confidence" }
                            span class="metric-value" { (metrics.confidence.label()) }
                        }
                    }
                },
                None => {
                    p { "Not enough market data to summarize." }
                },
            }
        },
    )
}

/// A second form so the Results step can download the XLSX report with the
/// same record.
fn export_form(record: &PropertyRecord) -> Markup {
    html! {
        form method="post" action="/export" {
            // Reuse the full hidden state; /export reads the same fields.
            (hidden_state(record, Step::Market))
            button type="submit" class="btn" { "Download Report (XLSX)" }
        }
    }
}
