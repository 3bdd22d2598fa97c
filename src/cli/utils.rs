use serde_json::{json, Value};

use crate::api::{AdvocatesResponse, ValidationIssue};
use crate::cli::OutputFormat;
use crate::database::models::Advocate;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output request validation problems in the appropriate format
pub fn output_validation_issues(output_format: &OutputFormat, issues: &[ValidationIssue]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "error": "Invalid query parameters",
                    "details": issues,
                }))?
            );
        }
        OutputFormat::Text => {
            for issue in issues {
                eprintln!("Error: {}: {}", issue.path.join("."), issue.message);
            }
        }
    }
    Ok(())
}

/// Output a page of advocates: the response envelope as JSON, or a table
pub fn output_advocates(output_format: &OutputFormat, response: &AdvocatesResponse<Advocate>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Text => {
            print!("{}", render_table(response));
        }
    }
    Ok(())
}

fn render_table(response: &AdvocatesResponse<Advocate>) -> String {
    let p = &response.pagination;
    if response.data.is_empty() {
        return format!("No advocates found ({} total)\n", p.total);
    }

    let mut out = format!(
        "{:<22} {:<16} {:<6} {:>5}  {:<18} {}\n",
        "NAME", "CITY", "DEGREE", "YEARS", "PHONE", "SPECIALTIES"
    );
    for a in &response.data {
        out.push_str(&format!(
            "{:<22} {:<16} {:<6} {:>5}  {:<18} {}\n",
            format!("{} {}", a.first_name, a.last_name),
            a.city,
            a.degree,
            a.years_of_experience,
            format_phone_number(a.phone_number),
            a.specialties.join(", ")
        ));
    }
    out.push_str(&format!(
        "Page {} of {} ({} total)\n",
        p.page,
        p.total_pages.max(1),
        p.total
    ));
    out
}

/// Display form of a stored phone number.
///
/// Ten digits render as `(XXX) XXX-XXXX`, eleven digits with a leading `1`
/// as `1 (XXX) XXX-XXXX`; anything else is the plain number.
pub fn format_phone_number(phone_number: i64) -> String {
    let digits = phone_number.to_string();
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => digits,
    }
}
