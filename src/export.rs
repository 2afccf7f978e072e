//! Build export formats

use crate::error::Result;
use crate::models::Build;
use crate::power::estimate_system_wattage;

pub const SUMMARY_TITLE: &str = "My Ultimate PC Build";

/// Plain-text summary: title, one line per selected part, cost and wattage
pub fn text_summary(build: &Build) -> String {
    let rule = "-".repeat(20);
    let mut lines = vec![SUMMARY_TITLE.to_string(), rule.clone()];
    lines.extend(build.selected().map(|(category, info)| {
        format!(
            "{}: {} (${:.2})",
            category.label().to_uppercase(),
            info.name,
            info.price
        )
    }));
    lines.push(rule);
    lines.push(format!("Total Cost: ${:.2}", build.total_cost()));
    lines.push(format!("Est. Wattage: {}W", estimate_system_wattage(build)));

    let mut summary = lines.join("\n");
    summary.push('\n');
    summary
}

/// Pretty JSON of the build, empty slots as `null`
pub fn to_json(build: &Build) -> Result<String> {
    Ok(serde_json::to_string_pretty(build)?)
}
