use crate::results::PageSummary;
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Section headers in the order they appear in a report
pub const SECTIONS: [&str; 9] = [
    "## 🟦 H1 :",
    "## 🔷 H2 :",
    "## 📄 Paragraphs :",
    "## 🔗 Links :",
    "## 🖼️ Images :",
    "## 🎨 CSS Colors :",
    "## 📜 Scripts :",
    "## 📂 Stylesheets :",
    "## 🧩 Metas :",
];

/// Placeholder shown for images without alt text
pub const NO_ALT: &str = "[no alt]";

const BULLET: &str = "- ";

/// Renders a summary as the plain-text report
pub fn serialize(summary: &PageSummary) -> String {
    let mut out = format!(
        "# Title : {}\n🌐 Domain : {} — IP : {}\n\n",
        summary.title, summary.domain, summary.ip
    );

    let sections: [Vec<String>; 9] = [
        summary.headings1.clone(),
        summary.headings2.clone(),
        summary.paragraphs.clone(),
        summary
            .links
            .iter()
            .map(|l| format!("{} → {}", l.text, l.href))
            .collect(),
        summary
            .images
            .iter()
            .map(|i| {
                let alt = if i.alt.is_empty() { NO_ALT } else { i.alt.as_str() };
                format!("{} → {}", alt, i.src)
            })
            .collect(),
        summary.colors.iter().cloned().collect(),
        summary.scripts.clone(),
        summary.stylesheets.clone(),
        summary
            .metas
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect(),
    ];

    for (header, items) in SECTIONS.iter().zip(sections.iter()) {
        write_section(&mut out, header, items);
    }

    out
}

fn write_section(out: &mut String, header: &str, items: &[String]) {
    let body = items
        .iter()
        .map(|item| format!("{}{}", BULLET, single_line(item)))
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&format!("{}\n{}\n\n", header, body));
}

/// Keeps a rendered item on its bullet line; hrefs, metas and CSS values are
/// stored verbatim and may carry line breaks
fn single_line(item: &str) -> String {
    item.replace(['\r', '\n'], " ")
}

/// Counts the bullet lines under each section header of a rendered report
pub fn count_bullets(report: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for line in report.lines() {
        if SECTIONS.contains(&line) {
            counts.push((line.to_string(), 0));
        } else if line.starts_with(BULLET) {
            if let Some((_, count)) = counts.last_mut() {
                *count += 1;
            }
        }
    }

    counts
}

/// File name a report is saved under, e.g. `scrape_2024-05-01_13-45-00.txt`
pub fn report_filename(at: DateTime<Local>) -> String {
    format!("scrape_{}.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Writes a report into `dir`, creating the directory first if needed
pub fn save_report(dir: impl AsRef<Path>, filename: &str, report: &str) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(filename);
    fs::write(&path, report)?;
    ::log::info!("Report written to {}", path.display());

    Ok(path)
}
