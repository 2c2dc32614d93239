//! End of run summary

use console::Style;

use crate::update::RunReport;

/// Summary lines for a finished run
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let bold = Style::new().bold();
    let green = Style::new().green();
    let yellow = Style::new().yellow();
    let red = Style::new().red();

    let mut lines = vec![format!(
        "{} {} repo(s) checked, {} updated",
        bold.apply_to("Summary:"),
        report.checked,
        report.updated.len()
    )];

    if !report.unknown.is_empty() {
        lines.push(format!(
            "  {} {}",
            yellow.apply_to("Skipped (size unavailable):"),
            report.unknown.join(", ")
        ));
    }

    let Some(install) = report.install else {
        lines.push(format!("  {}", green.apply_to("Installed cache is up to date")));
        return lines;
    };

    lines.push(format!(
        "  Downloaded {} of {} updated cache file(s)",
        report.staged,
        report.updated.len()
    ));

    let merge = if install.tool_succeeded {
        green.apply_to("merged")
    } else {
        red.apply_to("merge failed")
    };
    let installed = if install.installed {
        green.apply_to("installed")
    } else {
        red.apply_to("not installed")
    };
    lines.push(format!("  Cache {merge}, {installed}"));
    if install.backed_up {
        lines.push("  Previous cache kept as .old".to_string());
    }

    if !report.records_saved {
        lines.push(format!("  {}", red.apply_to("Size records were not saved")));
    }

    lines
}

/// Print the summary to stdout
pub fn display_summary(report: &RunReport) {
    println!();
    for line in summary_lines(report) {
        println!("{line}");
    }
}
