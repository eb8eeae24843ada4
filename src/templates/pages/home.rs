// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "What is your home worth?" }
                p {
                    "Estimate your property's market value from its municipal "
                    "assessment in five quick steps."
                }

                a href="/estimate" class="btn" { "Get an Estimate" }

                (card("How it works", html! {
                    ol {
                        li { "Enter your property address." }
                        li { "Paste your municipal assessment, or type the values in." }
                        li { "Answer a few questions about the property's condition." }
                        li { "Review nearby market activity." }
                        li { "Get your estimated value range." }
                    }
                }))

                (card("Keep in mind", html! {
                    p {
                        "This tool is aimed at homeowners, not professionals. "
                        "The estimate is a rule-of-thumb adjustment of your "
                        "municipal assessment, and the market context shown is "
                        "illustrative. It is not an appraisal."
                    }
                }))
            }
        },
    )
}
