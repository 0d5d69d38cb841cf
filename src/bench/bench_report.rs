//! Throughput and fidelity reports
//!
//! Reports are plain data plus a `Display` impl that renders markdown-style
//! tables, so callers can either print them or post-process the rows.

use super::bench_fidelity::{FidelityReport, FidelityResult};
use super::bench_throughput::{TimingResult, TimingStatus};
use super::Operation;
use chrono::{DateTime, Utc};
use std::fmt;

/// Format operations per second with a k/M/B suffix
pub fn format_rate(ips: f64) -> String {
    const SCALES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "k")];
    for (scale, suffix) in SCALES {
        if ips.abs() >= scale {
            return format!("{:.3}{}", ips / scale, suffix);
        }
    }
    format!("{:.3}", ips)
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// One codec's position in a per-operation ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// Codec display name
    pub codec: String,
    /// Mean operations per second
    pub ips: f64,
    /// Error margin in operations per second
    pub margin: f64,
    /// How many times slower than the fastest codec (1.0 for the fastest)
    pub slowdown: f64,
    /// The gap to the fastest codec is inside the combined error margins
    pub within_error: bool,
}

/// Codecs ranked by throughput for one operation
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Compared operation
    pub operation: Operation,
    /// Measured codecs, fastest first
    pub entries: Vec<RankedEntry>,
    /// Codecs that could not be measured, in registry order
    pub unsupported: Vec<String>,
}

impl Comparison {
    fn new(operation: Operation, results: &[TimingResult]) -> Self {
        let mut measured: Vec<(&str, f64, f64)> = Vec::new();
        let mut unsupported = Vec::new();
        for result in results.iter().filter(|r| r.operation == operation) {
            match result.throughput() {
                Some(t) => measured.push((result.codec.as_str(), t.ips(), t.margin())),
                None => unsupported.push(result.codec.clone()),
            }
        }
        measured.sort_by(|a, b| b.1.total_cmp(&a.1));

        let entries = match measured.first().copied() {
            None => Vec::new(),
            Some((_, fastest_ips, fastest_margin)) => measured
                .iter()
                .map(|&(codec, ips, margin)| RankedEntry {
                    codec: codec.to_string(),
                    ips,
                    margin,
                    slowdown: if ips > 0.0 { fastest_ips / ips } else { f64::INFINITY },
                    within_error: (fastest_ips - ips).abs() <= fastest_margin + margin,
                })
                .collect(),
        };

        Self {
            operation,
            entries,
            unsupported,
        }
    }

    /// 1-based rank of a codec, if it was measured
    pub fn rank(&self, codec: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.codec == codec)
            .map(|i| i + 1)
    }

    /// The fastest codec, if any was measured
    pub fn fastest(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparison ({}):", self.operation)?;
        let width = self
            .entries
            .iter()
            .map(|e| e.codec.len())
            .chain(self.unsupported.iter().map(String::len))
            .max()
            .unwrap_or(0);
        for (i, entry) in self.entries.iter().enumerate() {
            write!(
                f,
                "  {:>width$}: {:>12} i/s",
                entry.codec,
                format_rate(entry.ips),
                width = width
            )?;
            if i == 0 {
                writeln!(f)?;
            } else if entry.within_error {
                writeln!(f, " - same-ish: difference falls within error")?;
            } else {
                writeln!(f, " - {:.2}x slower", entry.slowdown)?;
            }
        }
        for codec in &self.unsupported {
            writeln!(f, "  {:>width$}: unsupported", codec, width = width)?;
        }
        Ok(())
    }
}

/// One codec's throughput across both operations
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputRow {
    /// Codec display name
    pub codec: String,
    /// Serialize outcome, if it was measured
    pub serialize: Option<TimingStatus>,
    /// Deserialize outcome, if it was measured
    pub deserialize: Option<TimingStatus>,
    /// Rank among codecs with a measured serialize
    pub serialize_rank: Option<usize>,
    /// Rank among codecs with a measured deserialize
    pub deserialize_rank: Option<usize>,
}

fn status_cell(status: &Option<TimingStatus>) -> String {
    match status {
        Some(TimingStatus::Measured(t)) => t.to_string(),
        Some(TimingStatus::Unsupported { .. }) => "unsupported".to_string(),
        None => "-".to_string(),
    }
}

fn rank_cell(rank: Option<usize>) -> String {
    rank.map_or_else(|| "-".to_string(), |r| r.to_string())
}

/// Throughput table and per-operation rankings
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputReport {
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
    /// One row per codec, in registry order
    pub rows: Vec<ThroughputRow>,
    /// Rankings, serialize first
    pub comparisons: Vec<Comparison>,
}

impl ThroughputReport {
    /// Build a report from timing results
    pub fn new(results: &[TimingResult]) -> Self {
        let comparisons: Vec<Comparison> = Operation::ALL
            .iter()
            .map(|&op| Comparison::new(op, results))
            .collect();

        let mut rows: Vec<ThroughputRow> = Vec::new();
        for result in results {
            let index = match rows.iter().position(|r| r.codec == result.codec) {
                Some(index) => index,
                None => {
                    rows.push(ThroughputRow {
                        codec: result.codec.clone(),
                        serialize: None,
                        deserialize: None,
                        serialize_rank: None,
                        deserialize_rank: None,
                    });
                    rows.len() - 1
                }
            };
            let row = &mut rows[index];
            match result.operation {
                Operation::Serialize => row.serialize = Some(result.status.clone()),
                Operation::Deserialize => row.deserialize = Some(result.status.clone()),
            }
        }
        for row in &mut rows {
            row.serialize_rank = comparisons[0].rank(&row.codec);
            row.deserialize_rank = comparisons[1].rank(&row.codec);
        }

        Self {
            generated_at: Utc::now(),
            rows,
            comparisons,
        }
    }

    /// Row for a codec
    pub fn row(&self, codec: &str) -> Option<&ThroughputRow> {
        self.rows.iter().find(|r| r.codec == codec)
    }

    /// Ranking for an operation
    pub fn comparison(&self, operation: Operation) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| c.operation == operation)
    }
}

impl fmt::Display for ThroughputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### Throughput ({}) ###",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f)?;
        writeln!(f, "| Codec | Serialize | Deserialize | Rank (ser/de) |")?;
        writeln!(f, "|-------|-----------|-------------|---------------|")?;
        for row in &self.rows {
            writeln!(
                f,
                "| {} | {} | {} | {} / {} |",
                escape_cell(&row.codec),
                status_cell(&row.serialize),
                status_cell(&row.deserialize),
                rank_cell(row.serialize_rank),
                rank_cell(row.deserialize_rank),
            )?;
        }
        for comparison in &self.comparisons {
            writeln!(f)?;
            write!(f, "{}", comparison)?;
        }
        Ok(())
    }
}

/// One codec's line in the fidelity table
#[derive(Debug, Clone, PartialEq)]
pub struct FidelityRow {
    /// Codec display name
    pub codec: String,
    /// Serialized sample with non-printable bytes escaped
    pub printable: String,
    /// Serialized sample as an exact literal
    pub literal: String,
    /// Serialized sample length in bytes
    pub byte_len: usize,
    /// Round-tripped sample rendered as text
    pub round_tripped: String,
    /// Comma-joined unsupported field names
    pub unsupported: String,
}

impl From<&FidelityResult> for FidelityRow {
    fn from(result: &FidelityResult) -> Self {
        let example = &result.example;
        let (printable, literal, byte_len) = match &example.payload {
            Some(payload) => (payload.printable(), payload.literal(), payload.len()),
            None => ("-".to_string(), "-".to_string(), 0),
        };
        let round_tripped = match (&example.round_tripped, &example.error) {
            (Some(value), _) => value.to_string(),
            (None, Some(error)) => format!("error: {}", error),
            (None, None) => "-".to_string(),
        };
        Self {
            codec: result.codec.clone(),
            printable,
            literal,
            byte_len,
            round_tripped,
            unsupported: result.unsupported().join(", "),
        }
    }
}

impl FidelityReport {
    /// Table rows, in registry order
    pub fn rows(&self) -> Vec<FidelityRow> {
        self.results.iter().map(FidelityRow::from).collect()
    }
}

impl fmt::Display for FidelityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Fidelity ###")?;
        writeln!(f)?;
        writeln!(f, "| Codec | Serialized | Literal | Bytes | Deserialized | Unsupported |")?;
        writeln!(f, "|-------|------------|---------|-------|--------------|-------------|")?;
        for row in self.rows() {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} |",
                escape_cell(&row.codec),
                escape_cell(&row.printable),
                escape_cell(&row.literal),
                row.byte_len,
                escape_cell(&row.round_tripped),
                escape_cell(&row.unsupported),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::bench_fidelity::{FieldOutcome, RoundTripExample};
    use crate::bench::bench_stats::Summary;
    use crate::bench::bench_throughput::Throughput;
    use crate::codec::Payload;
    use crate::value::Value;
    use std::time::Duration;

    fn measured(codec: &str, operation: Operation, ips: f64, margin: f64) -> TimingResult {
        TimingResult {
            codec: codec.to_string(),
            operation,
            status: TimingStatus::Measured(Throughput {
                iterations: 100,
                elapsed: Duration::from_millis(100),
                summary: Summary {
                    count: 10,
                    mean: ips,
                    std_dev: 0.0,
                    std_error: 0.0,
                    margin,
                },
            }),
        }
    }

    fn unsupported(codec: &str, operation: Operation) -> TimingResult {
        TimingResult {
            codec: codec.to_string(),
            operation,
            status: TimingStatus::Unsupported {
                reason: "boom".to_string(),
            },
        }
    }

    fn sample_results() -> Vec<TimingResult> {
        vec![
            measured("slow", Operation::Serialize, 1_000.0, 10.0),
            measured("fast", Operation::Serialize, 4_000.0, 10.0),
            unsupported("broken", Operation::Serialize),
            measured("slow", Operation::Deserialize, 2_000.0, 500.0),
            measured("fast", Operation::Deserialize, 2_400.0, 500.0),
            unsupported("broken", Operation::Deserialize),
        ]
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1_234_567.0), "1.235M");
        assert_eq!(format_rate(12_345.0), "12.345k");
        assert_eq!(format_rate(999.0), "999.000");
        assert_eq!(format_rate(2.5e9), "2.500B");
    }

    #[test]
    fn test_rows_keep_registry_order_and_ranks() {
        let report = ThroughputReport::new(&sample_results());
        let codecs: Vec<&str> = report.rows.iter().map(|r| r.codec.as_str()).collect();
        assert_eq!(codecs, vec!["slow", "fast", "broken"]);

        let slow = report.row("slow").unwrap();
        assert_eq!(slow.serialize_rank, Some(2));
        assert_eq!(slow.deserialize_rank, Some(2));
        let broken = report.row("broken").unwrap();
        assert_eq!(broken.serialize_rank, None);
        assert!(matches!(broken.serialize, Some(TimingStatus::Unsupported { .. })));
    }

    #[test]
    fn test_comparison_ratios() {
        let report = ThroughputReport::new(&sample_results());

        let serialize = report.comparison(Operation::Serialize).unwrap();
        assert_eq!(serialize.fastest().unwrap().codec, "fast");
        let slow = &serialize.entries[1];
        assert!((slow.slowdown - 4.0).abs() < 1e-9);
        assert!(!slow.within_error);
        assert_eq!(serialize.unsupported, vec!["broken".to_string()]);

        let deserialize = report.comparison(Operation::Deserialize).unwrap();
        assert!(deserialize.entries[1].within_error);
    }

    #[test]
    fn test_throughput_display() {
        let text = ThroughputReport::new(&sample_results()).to_string();
        assert!(text.contains("| Codec | Serialize | Deserialize | Rank (ser/de) |"));
        assert!(text.contains("| broken | unsupported | unsupported | - / - |"));
        assert!(text.contains("Comparison (serialize):"));
        assert!(text.contains("4.00x slower"));
        assert!(text.contains("same-ish"));
    }

    #[test]
    fn test_empty_results() {
        let report = ThroughputReport::new(&[]);
        assert!(report.rows.is_empty());
        assert!(report.comparison(Operation::Serialize).unwrap().fastest().is_none());
    }

    #[test]
    fn test_fidelity_rows() {
        let report = FidelityReport {
            results: vec![FidelityResult {
                codec: "json|ish".to_string(),
                fields: vec![
                    ("fixnum".to_string(), FieldOutcome::Supported),
                    (
                        "symbol".to_string(),
                        FieldOutcome::Mismatch {
                            round_tripped: Value::text("symbol"),
                        },
                    ),
                    (
                        "hash".to_string(),
                        FieldOutcome::Failed {
                            reason: "nope".to_string(),
                        },
                    ),
                ],
                example: RoundTripExample {
                    payload: Some(Payload::from(vec![0x82, b'a'])),
                    round_tripped: Some(Value::text("a")),
                    error: None,
                },
            }],
        };

        let rows = report.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].printable, "\\x82a");
        assert_eq!(rows[0].literal, "b\"\\x82a\"");
        assert_eq!(rows[0].byte_len, 2);
        assert_eq!(rows[0].round_tripped, "\"a\"");
        assert_eq!(rows[0].unsupported, "symbol, hash");

        let text = report.to_string();
        assert!(text.contains("| json\\|ish |"));
    }
}
