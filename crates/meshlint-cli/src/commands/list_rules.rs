//! List-rules command implementation.

use meshlint_rules::all_rules;

/// Prints every built-in rule with its description.
pub fn run() {
    let rules = all_rules();
    let width = rules
        .iter()
        .map(|rule| rule.rule_id().len())
        .max()
        .unwrap_or(0);

    for rule in &rules {
        println!("{:width$}  {}", rule.rule_id(), rule.description());
    }
    println!("\n{} rule(s) available", rules.len());
}
