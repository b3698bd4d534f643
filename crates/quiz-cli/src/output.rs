use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quiz_core::responses::IngestReport;

    #[test]
    fn raw_is_single_line() {
        let report = IngestReport {
            categories_created: 2,
            ..IngestReport::default()
        };
        let raw = render(&report, OutputFormat::Raw).unwrap();
        assert!(!raw.contains('\n'));
        assert!(raw.contains("\"categories_created\":2"));

        let pretty = render(&report, OutputFormat::Json).unwrap();
        let reparsed: IngestReport = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, report);
    }
}
