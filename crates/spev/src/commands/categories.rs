//! Categories command implementation.
//!
//! Lists the category labels accepted by `spev list --category`.

use owo_colors::OwoColorize;
use serde::Serialize;
use sp_events_core::filter::{ALL_CATEGORIES, CATEGORIES};

use super::{CommandContext, Result};

#[derive(Serialize)]
struct CategoriesOutput {
    categories: &'static [&'static str],
    all: &'static str,
}

fn format_categories_table(use_colors: bool) -> String {
    let mut output = String::new();
    for label in CATEGORIES {
        if *label == ALL_CATEGORIES {
            let note = "(no restriction)";
            if use_colors {
                output.push_str(&format!("{} {}\n", label, note.dimmed()));
            } else {
                output.push_str(&format!("{} {}\n", label, note));
            }
        } else {
            output.push_str(label);
            output.push('\n');
        }
    }
    output
}

/// Executes the categories command. Needs no backend.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        let output = CategoriesOutput {
            categories: CATEGORIES,
            all: ALL_CATEGORIES,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_categories_table(ctx.use_colors));
    }
    Ok(())
}
