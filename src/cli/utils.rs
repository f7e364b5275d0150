use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::config;
use crate::state::AppState;

/// Opens the store named by the current configuration.
pub async fn open_state() -> anyhow::Result<AppState> {
    Ok(AppState::from_config(&config().database).await?)
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data) = data {
                response["data"] = data;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if let Some(Value::Object(fields)) = data {
                for (key, value) in fields {
                    match value {
                        Value::String(s) => println!("  {}: {}", key, s),
                        Value::Null => {}
                        other => println!("  {}: {}", key, other),
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_accepts_any_payload() {
        assert!(output_success(OutputFormat::Json, "ok", Some(json!({"token": "abc"}))).is_ok());
        assert!(output_success(OutputFormat::Text, "ok", Some(json!({"count": 3, "skip": null}))).is_ok());
    }
}
