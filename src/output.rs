//! Output formatting for extraction, LCS and search results

use crate::corpus::{Extracted, Fragment, SymbolKind};
use crate::pipeline::StopReason;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// When to color terminal output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
            ColorMode::Auto | ColorMode::Never => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
        }
    }

    pub fn stdout(self) -> StandardStream {
        StandardStream::stdout(self.choice())
    }
}

/// Extraction result for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: SymbolKind,
    pub count: usize,
    pub stop: StopReason,
    pub substrings: Vec<String>,
}

impl FileReport {
    pub fn new(path: &Path, kind: SymbolKind, extracted: &Extracted<'_>) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            count: extracted.substrings.len(),
            stop: extracted.stop,
            substrings: extracted.substrings.iter().map(|f| f.to_text().into_owned()).collect(),
        }
    }
}

/// Longest common substring of a set of files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsReport {
    pub files: Vec<PathBuf>,
    pub kind: SymbolKind,
    pub length: usize,
    pub substring: String,
}

impl LcsReport {
    pub fn new(files: Vec<PathBuf>, lcs: Fragment<'_>) -> Self {
        Self {
            files,
            kind: lcs.kind(),
            length: lcs.len(),
            substring: lcs.to_text().into_owned(),
        }
    }
}

/// Print extracted substrings, one per line, then their count.
///
/// Control characters are escaped so every substring stays on one line.
pub fn print_report<W: WriteColor>(out: &mut W, report: &FileReport, heading: bool) -> io::Result<()> {
    if heading {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "{}", report.path.display())?;
        out.reset()?;
    }

    for (index, substring) in report.substrings.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", index + 1)?;
        out.reset()?;
        write!(out, ":")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", substring.escape_debug())?;
        out.reset()?;
        writeln!(out)?;
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(out, "{} substrings", report.count)?;
    out.reset()?;
    Ok(())
}

pub fn print_lcs<W: WriteColor>(out: &mut W, report: &LcsReport) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "{}", report.substring.escape_debug())?;
    out.reset()?;
    writeln!(out)?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(out, "length {} across {} files", report.length, report.files.len())?;
    out.reset()?;
    Ok(())
}

/// Print `(input, offset)` pairs as `path:offset`
pub fn print_offsets<W: WriteColor>(out: &mut W, paths: &[PathBuf], offsets: &[(usize, usize)]) -> io::Result<()> {
    for &(input, offset) in offsets {
        if let Some(path) = paths.get(input) {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            write!(out, "{}", path.display())?;
            out.reset()?;
            write!(out, ":")?;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "{offset}")?;
        out.reset()?;
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, value)?;
    writeln!(lock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    fn report() -> FileReport {
        FileReport {
            path: PathBuf::from("service.log"),
            kind: SymbolKind::Bytes,
            count: 2,
            stop: StopReason::Exhausted,
            substrings: vec!["GET /index.html 200\n".to_string(), "ab".to_string()],
        }
    }

    #[test]
    fn test_print_report() {
        let mut buf = Buffer::no_color();
        print_report(&mut buf, &report(), true).unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(text, "service.log\n1:GET /index.html 200\\n\n2:ab\n2 substrings\n");
    }

    #[test]
    fn test_print_report_without_heading() {
        let mut buf = Buffer::no_color();
        print_report(&mut buf, &report(), false).unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();
        assert!(text.starts_with("1:"));
    }

    #[test]
    fn test_print_lcs() {
        let report = LcsReport::new(vec![PathBuf::from("a"), PathBuf::from("b")], Fragment::Bytes(b"abc"));
        let mut buf = Buffer::no_color();
        print_lcs(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(text, "abc\nlength 3 across 2 files\n");
    }

    #[test]
    fn test_print_offsets() {
        let paths = [PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let mut buf = Buffer::no_color();
        print_offsets(&mut buf, &paths, &[(0, 4), (1, 0)]).unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(text, "a.txt:4\nb.txt:0\n");
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["kind"], "bytes");
        assert_eq!(json["stop"], "exhausted");
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn test_color_mode_choice() {
        assert_eq!(ColorMode::Always.choice(), ColorChoice::Always);
        assert_eq!(ColorMode::Never.choice(), ColorChoice::Never);
    }
}
