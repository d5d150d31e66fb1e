use crate::summary::StationSummary;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

const COLUMNS: [&str; 12] = [
    "station",
    "n",
    "n_censored",
    "naive_mean",
    "naive_sd",
    "adjusted_mean",
    "adjusted_sd",
    "change_from_naive",
    "log_likelihood",
    "converged",
    "method",
    "termination",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyReport {
    entries: Vec<StationSummary>,
}

impl SurveyReport {
    pub fn push(&mut self, summary: StationSummary) {
        self.entries.push(summary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StationSummary] {
        &self.entries
    }

    pub fn get(&self, station: &str) -> Option<&StationSummary> {
        self.entries.iter().find(|s| s.station == station)
    }

    pub fn fallback_count(&self) -> usize {
        self.entries.iter().filter(|s| !s.converged).count()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: ReportFormat) -> Result<(), Error> {
        let mut w = File::create(path)?;
        self.write_to(&mut w, fmt)
    }

    pub fn write_to<W: Write>(&self, w: &mut W, fmt: ReportFormat) -> Result<(), Error> {
        match fmt {
            ReportFormat::Csv => self.write_delimited(w, ','),
            ReportFormat::Tsv => self.write_delimited(w, '\t'),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, &self.entries)?;
                writeln!(w)
            }
        }
    }

    fn write_delimited<W: Write>(&self, w: &mut W, delimiter: char) -> Result<(), Error> {
        writeln!(w, "{}", COLUMNS.join(&delimiter.to_string()))?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{}{d}{}{d}{:.6}{d}{:.6}{d}{:.6}{d}{:.6}{d}{:.6}{d}{:.6}{d}{}{d}{}{d}{}",
                quote_if_needed(&s.station, delimiter),
                s.n,
                s.n_censored,
                s.naive_mean,
                s.naive_sd,
                s.adjusted_mean,
                s.adjusted_sd,
                s.change_from_naive,
                s.log_likelihood,
                s.converged,
                s.method,
                s.termination,
                d = delimiter
            )?;
        }
        Ok(())
    }
}

fn quote_if_needed(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::estimators::{EstimationResult, Termination};
    use std::fs;
    use tempfile::NamedTempFile;

    fn report() -> SurveyReport {
        let ok = EstimationResult {
            mu: 3.75,
            sigma: 0.5,
            converged: true,
            log_likelihood: -4.25,
            iterations: 60,
            termination: Termination::Converged,
        };
        let failed = EstimationResult {
            mu: 3.0,
            sigma: 2.0,
            converged: false,
            log_likelihood: f64::NEG_INFINITY,
            iterations: 0,
            termination: Termination::AllCensored,
        };
        let mut r = SurveyReport::default();
        r.push(StationSummary::new("A", 5, 2, 3.5, 0.25, &ok));
        r.push(StationSummary::new("B, north", 3, 3, 4.0, 0.0, &failed));
        r
    }

    #[test]
    fn lookup_and_counts() {
        let r = report();
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
        assert_eq!(r.fallback_count(), 1);
        assert_eq!(r.get("A").unwrap().adjusted_mean, 3.75);
        assert!(r.get("nope").is_none());
    }

    #[test]
    fn export_csv() {
        let tf = NamedTempFile::new().unwrap();
        report().export(tf.path(), ReportFormat::Csv).unwrap();
        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
station,n,n_censored,naive_mean,naive_sd,adjusted_mean,adjusted_sd,change_from_naive,log_likelihood,converged,method,termination
A,5,2,3.500000,0.250000,3.750000,0.500000,0.250000,-4.250000,true,maximum-likelihood,converged
\"B, north\",3,3,4.000000,0.000000,4.000000,0.000000,0.000000,-inf,false,naive-fallback,all-censored
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv_does_not_quote_commas() {
        let mut buf = Vec::new();
        report().write_to(&mut buf, ReportFormat::Tsv).unwrap();
        let got = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = got.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("station\tn\tn_censored\t"));
        assert!(lines[2].starts_with("B, north\t3\t3\t"));
    }

    #[test]
    fn export_json_nulls_infinite_likelihood() {
        let mut buf = Vec::new();
        report().write_to(&mut buf, ReportFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = v.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["station"], "A");
        assert_eq!(rows[0]["method"], "maximum-likelihood");
        assert_eq!(rows[0]["adjusted_mean"], 3.75);
        assert!(rows[1]["log_likelihood"].is_null());
        assert_eq!(rows[1]["termination"], "all-censored");
    }

    #[test]
    fn export_empty() {
        let mut buf = Vec::new();
        SurveyReport::default()
            .write_to(&mut buf, ReportFormat::Json)
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }
}
