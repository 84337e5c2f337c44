use crate::models::{AnalysisResult, FileMetadata, RiskTier};

const METER_CELLS: usize = 20;

/// Human-readable file size with 1024-based units.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    if exp == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", bytes as f64 / 1024_f64.powi(exp as i32), UNITS[exp])
    }
}

/// Textual risk meter: fill proportional to the risk percentage.
fn meter_bar(risk: u32) -> String {
    let filled = (risk as usize * METER_CELLS) / 100;
    format!(
        "[{}{}]",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(METER_CELLS - filled)
    )
}

/// Format an analysis as a fixed-width text report.
pub fn format_report(metadata: &FileMetadata, result: &AnalysisResult) -> String {
    let tier = RiskTier::from_risk(result.conflict_risk);
    let separator = "\u{2500}".repeat(58);
    let mut output = String::new();

    output.push_str(&format!("Analyzed: {}\n", result.timestamp));
    output.push_str(&format!(
        "File:     {} ({})\n",
        metadata.name,
        format_file_size(metadata.byte_size)
    ));
    output.push_str(&separator);
    output.push('\n');

    for (label, value) in result.emotions.entries() {
        output.push_str(&format!("{:<10} {:>3}%\n", capitalize(label), value));
    }

    output.push_str(&separator);
    output.push('\n');

    output.push_str(&format!(
        "Dominant emotion: {}\n",
        result.emotions.dominant()
    ));
    output.push_str(&format!(
        "Conflict risk:    {:>3}% ({})\n",
        result.conflict_risk,
        tier.label()
    ));
    output.push_str(&format!("{}\n", meter_bar(result.conflict_risk)));
    output.push_str(&format!("{}\n", tier.summary()));
    output.push_str(tier.advice());

    output
}

/// Format an analysis as pretty-printed JSON.
pub fn format_json(metadata: &FileMetadata, result: &AnalysisResult) -> String {
    let tier = RiskTier::from_risk(result.conflict_risk);
    serde_json::to_string_pretty(&serde_json::json!({
        "file": metadata,
        "analysis": result,
        "risk_tier": tier.label(),
    }))
    .unwrap_or_else(|_| "{}".to_string())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
