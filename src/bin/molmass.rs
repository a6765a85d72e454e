use std::collections::HashMap;

use log::debug;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use molecules::{Composition, Massive, PeptideError, parse_with_peptides};
use rust_decimal::Decimal;
use rustyline::DefaultEditor;

fn main() -> rustyline::Result<()> {
    env_logger::init();

    // NOTE: No modifications are loaded yet, but peptides like `:RPPGFSPFR:` still work
    let modifications: HashMap<String, Composition> = HashMap::new();
    let mut rl = DefaultEditor::new()?;
    while let Ok(formula) = rl.readline("Formula: ") {
        rl.add_history_entry(&formula)?;
        match molecule_info(&formula, &modifications) {
            Ok(info) => println!("{info}"),
            Err(diagnostic) => render_error(diagnostic),
        }
    }
    Ok(())
}

fn molecule_info(formula: &str, modifications: &HashMap<String, Composition>) -> Result<String, PeptideError> {
    let molecule = parse_with_peptides(formula, modifications)?;
    debug!("{formula:?} has the composition {molecule}");

    let mono_mass = decimal_round_workaround(molecule.monoisotopic_mass(), 6);
    let avg_mass = decimal_round_workaround(molecule.average_mass(), 4);
    Ok(format!(
        "Composition: {molecule}\nMonoisotopic Mass: {mono_mass}\nAverage Mass: {avg_mass}\n"
    ))
}

fn render_error(diagnostic: impl Diagnostic) {
    let mut buf = String::new();
    match GraphicalReportHandler::new_themed(GraphicalTheme::unicode()).render_report(&mut buf, &diagnostic) {
        Ok(()) => println!("{buf}"),
        Err(_) => println!("{diagnostic}"),
    }
}

// FIXME: Really this should be fixed in `rust_decimal`...
fn decimal_round_workaround(value: impl Into<Decimal>, decimal_points: u32) -> String {
    let value = value.into().round_dp(decimal_points);
    format!("{value}")
}
