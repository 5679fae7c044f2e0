use anyhow::Result;
use colored::Colorize;
use octofhir_core::ConceptMap;
use octofhir_translate::TranslationResult;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_value(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_translation_table(result: &TranslationResult) {
    if result.result {
        print_success(&result.message);
    } else {
        println!("{} {}", "-".yellow(), result.message);
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Equivalence", "System", "Code", "Display", "Source"]);
    for m in &result.matches {
        builder.push_record([
            m.equivalence.map(|e| e.as_code()).unwrap_or("-"),
            m.concept.system.as_deref().unwrap_or("-"),
            m.concept.code.as_deref().unwrap_or("-"),
            m.concept.display.as_deref().unwrap_or("-"),
            m.source.as_str(),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}

pub fn print_maps_table(maps: &[ConceptMap]) {
    if maps.is_empty() {
        println!("No concept maps loaded.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["URL", "Source", "Target", "Groups", "Elements", "Targets"]);
    for cm in maps {
        builder.push_record([
            cm.url.clone().unwrap_or_default(),
            cm.source.clone().unwrap_or_else(|| "-".into()),
            cm.target.clone().unwrap_or_else(|| "-".into()),
            cm.groups.len().to_string(),
            cm.element_count().to_string(),
            cm.target_count().to_string(),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
    println!("Total: {}", maps.len());
}
