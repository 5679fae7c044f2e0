use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use octofhir_translate::{TranslateParams, Translator};
use serde_json::Value;

use crate::cli::{OutputFormat, TranslateArgs};
use crate::output::{print_translation_table, print_value};

fn read_params(path: &str) -> Result<Value> {
    let content = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
    };
    serde_json::from_str(&content).context("Invalid JSON")
}

/// Builds operation parameters from the command-line flags.
pub fn params_from_args(args: &TranslateArgs) -> TranslateParams {
    TranslateParams {
        code: args.code.clone(),
        system: args.system.clone(),
        version: args.version.clone(),
        source: args.source.clone(),
        target: args.target.clone(),
        target_system: args.target_system.clone(),
        concept_map_url: args.url.clone(),
        reverse: args.reverse.then_some(true),
        ..Default::default()
    }
}

pub async fn translate(
    translator: &Translator,
    args: &TranslateArgs,
    format: OutputFormat,
) -> Result<()> {
    let params = match &args.params {
        Some(path) => TranslateParams::from_json(&read_params(path)?)?,
        None => params_from_args(args),
    };
    let request = params.into_request()?;
    let result = translator.translate(&request).await?;

    match format {
        OutputFormat::Json => print_value(&result.to_parameters())?,
        OutputFormat::Table => print_translation_table(&result),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_from_args() {
        let args = TranslateArgs {
            code: Some("12345".into()),
            system: Some("http://example.com/my_code_system".into()),
            target_system: Some("http://example.com/my_code_system2".into()),
            ..Default::default()
        };
        let params = params_from_args(&args);
        assert_eq!(params.code.as_deref(), Some("12345"));
        assert_eq!(params.reverse, None);

        let request = params.into_request().unwrap();
        assert_eq!(request.codeable_concept.len(), 1);
        assert_eq!(
            request.target_system.as_deref(),
            Some("http://example.com/my_code_system2")
        );
        assert!(!request.is_reverse());
    }

    #[test]
    fn test_reverse_flag() {
        let args = TranslateArgs {
            code: Some("34567".into()),
            reverse: true,
            ..Default::default()
        };
        assert!(params_from_args(&args).into_request().unwrap().is_reverse());
    }

    #[test]
    fn test_missing_code_fails() {
        assert!(params_from_args(&TranslateArgs::default()).into_request().is_err());
    }
}
