//! Markdown report rendering for profiles and drift results.

use indexmap::IndexMap;

use crate::analysis::DriftResult;
use crate::profile::DatasetProfile;

/// Renders profiling output for human review.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Render a dataset profile as a Markdown report.
    pub fn profile_markdown(profile: &DatasetProfile) -> String {
        let mut md = String::new();

        md.push_str(&format!("# Data Profile: {}\n\n", profile.dataset_name));
        md.push_str(&format!(
            "**Profiled:** {}\n\n",
            profile.profile_timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Total Records | {} |\n", profile.total_records));
        md.push_str(&format!("| Total Columns | {} |\n", profile.total_columns));
        let total_anomalies: usize = profile
            .column_profiles
            .values()
            .map(|c| c.anomalies.len())
            .sum();
        md.push_str(&format!("| Anomalies | {} |\n\n", total_anomalies));

        md.push_str("## Columns\n\n");
        for column in profile.column_profiles.values() {
            md.push_str(&format!("### {}\n\n", column.column_name));
            md.push_str(&format!("- **Type:** {:?}\n", column.data_type));
            md.push_str(&format!(
                "- **Nulls:** {} ({:.1}%)\n",
                column.null_count, column.null_percentage
            ));
            md.push_str(&format!(
                "- **Distinct:** {} ({:.1}%)\n",
                column.distinct_count, column.distinct_percentage
            ));

            if let (Some(min), Some(max), Some(mean), Some(median), Some(std_dev)) =
                (column.min, column.max, column.mean, column.median, column.std_dev)
            {
                md.push_str(&format!(
                    "- **Range:** {} to {} (mean {:.2}, median {:.2}, std dev {:.2})\n",
                    min, max, mean, median, std_dev
                ));
            }
            if let (Some(min_length), Some(max_length), Some(mean_length)) =
                (column.min_length, column.max_length, column.mean_length)
            {
                md.push_str(&format!(
                    "- **Length:** {} to {} chars (mean {:.1})\n",
                    min_length, max_length, mean_length
                ));
            }

            if !column.top_values.is_empty() {
                let rendered: Vec<String> = column
                    .top_values
                    .iter()
                    .map(|(v, c)| format!("`{}` ({})", v, c))
                    .collect();
                md.push_str(&format!("- **Top values:** {}\n", rendered.join(", ")));
            }

            for anomaly in &column.anomalies {
                md.push_str(&format!("- ⚠️ {}\n", anomaly));
            }
            md.push('\n');
        }

        md
    }

    /// Render drift comparison results as a Markdown report.
    pub fn drift_markdown(report: &IndexMap<String, DriftResult>) -> String {
        let mut md = String::new();

        let drifted = report.values().filter(|r| r.has_drift).count();
        md.push_str("# Drift Report\n\n");
        md.push_str(&format!(
            "**{} of {} columns drifted**\n\n",
            drifted,
            report.len()
        ));

        md.push_str("| Column | Drift | Score |\n");
        md.push_str("|--------|-------|-------|\n");
        for result in report.values() {
            md.push_str(&format!(
                "| {} | {} | {:.3} |\n",
                result.column_name,
                if result.has_drift { "yes" } else { "no" },
                result.drift_score
            ));
        }
        md.push('\n');

        for result in report.values() {
            if result.drift_details.is_empty() {
                continue;
            }
            md.push_str(&format!("## {}\n\n", result.column_name));
            for detail in &result.drift_details {
                md.push_str(&format!("- {}\n", detail));
            }
            md.push('\n');
        }

        md
    }
}
