use crate::ingest::error::IngestError;
use crate::ingest::record::{SecchiReading, SecchiRecord};
use crate::utils::file_parsing::split_record;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub const COLUMNS: [&str; 4] = ["station", "date", "secchi", "depth"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads the flat `station,date,secchi,depth` table.
///
/// Columns are located by header name (case-insensitive) and may appear
/// in any order; extra columns are ignored. Blank lines and lines
/// starting with `#` are skipped.
pub struct TableReader;

struct ColumnIndex {
    station: usize,
    date: usize,
    secchi: usize,
    depth: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self, IngestError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or(IngestError::MissingColumn(name))
        };
        Ok(Self {
            station: find(COLUMNS[0])?,
            date: find(COLUMNS[1])?,
            secchi: find(COLUMNS[2])?,
            depth: find(COLUMNS[3])?,
        })
    }

    fn width(&self) -> usize {
        1 + self.station.max(self.date).max(self.secchi).max(self.depth)
    }
}

impl TableReader {
    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<SecchiRecord>, IngestError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Vec<SecchiRecord>, IngestError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let (_, header) = lines.next().ok_or(IngestError::MissingHeader)?;
        let columns = ColumnIndex::from_header(&split_record(header))?;

        let mut records = Vec::new();
        for (line, raw) in lines {
            let fields = split_record(raw);
            if fields.len() < columns.width() {
                return Err(IngestError::Malformed {
                    line,
                    reason: format!(
                        "expected at least {} fields, found {}",
                        columns.width(),
                        fields.len()
                    ),
                });
            }
            records.push(parse_row(&fields, &columns).map_err(|reason| {
                IngestError::Malformed { line, reason }
            })?);
        }
        Ok(records)
    }
}

fn parse_row(fields: &[String], columns: &ColumnIndex) -> Result<SecchiRecord, String> {
    let station = fields[columns.station].clone();
    if station.is_empty() {
        return Err("empty station identifier".into());
    }

    let date_text = &fields[columns.date];
    let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
        .map_err(|e| format!("invalid date {date_text:?}: {e}"))?;

    let secchi: SecchiReading = fields[columns.secchi].parse()?;

    let depth_text = fields[columns.depth].as_str();
    let depth = match depth_text.parse::<SecchiReading>()? {
        SecchiReading::Missing => None,
        SecchiReading::Depth(d) => Some(d),
        SecchiReading::BottomVisible => {
            return Err(format!("invalid depth {depth_text:?}"));
        }
    };

    Ok(SecchiRecord {
        station,
        date,
        secchi,
        depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TABLE: &str = "\
# exported from the monitoring workbook
station,date,secchi,depth
CB5.2,2019-06-03,2.5,8.1
CB5.2,2019-07-08,BSV,3.0

\"LE2.2\",2020-05-11,,6.4
LE2.2,2020-06-15,1.8,
";

    #[test]
    fn parses_rows_and_codes() {
        let recs = TableReader::parse(TABLE).unwrap();
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].station, "CB5.2");
        assert_eq!(recs[0].secchi, SecchiReading::Depth(2.5));
        assert_eq!(recs[0].depth, Some(8.1));
        assert_eq!(recs[1].secchi, SecchiReading::BottomVisible);
        assert_eq!(recs[2].station, "LE2.2");
        assert_eq!(recs[2].secchi, SecchiReading::Missing);
        assert_eq!(recs[3].depth, None);
        assert_eq!(recs[3].date, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap());
    }

    #[test]
    fn columns_may_be_reordered_with_extras() {
        let text = "Depth,Secchi,Notes,Date,Station\n5.0,1.25,calm,2021-08-01,X1\n";
        let recs = TableReader::parse(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].station, "X1");
        assert_eq!(recs[0].secchi, SecchiReading::Depth(1.25));
        assert_eq!(recs[0].depth, Some(5.0));
    }

    #[test]
    fn station_names_may_contain_apostrophes() {
        let text = "station,date,secchi,depth\n\
                    O'Neil Point,2021-06-01,2.0,5.0\n\
                    \"Bob's Cove, outer\",2021-06-02,BSV,3.5\n";
        let recs = TableReader::parse(text).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].station, "O'Neil Point");
        assert_eq!(recs[0].secchi, SecchiReading::Depth(2.0));
        assert_eq!(recs[0].depth, Some(5.0));
        assert_eq!(recs[1].station, "Bob's Cove, outer");
        assert_eq!(recs[1].secchi, SecchiReading::BottomVisible);
    }

    #[test]
    fn missing_header_and_column() {
        assert!(matches!(
            TableReader::parse("\n# nothing\n"),
            Err(IngestError::MissingHeader)
        ));
        assert!(matches!(
            TableReader::parse("station,date,secchi\nA,2020-01-01,1\n"),
            Err(IngestError::MissingColumn("depth"))
        ));
    }

    #[test]
    fn malformed_rows_report_line_numbers() {
        let short = "station,date,secchi,depth\nA,2020-01-01,1\n";
        match TableReader::parse(short) {
            Err(IngestError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }

        let bad_date = "station,date,secchi,depth\nA,2020-01-01,1,2\nA,01/02/2020,1,2\n";
        match TableReader::parse(bad_date) {
            Err(IngestError::Malformed { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("invalid date"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let bad_reading = "station,date,secchi,depth\nA,2020-01-01,murky,2\n";
        assert!(matches!(
            TableReader::parse(bad_reading),
            Err(IngestError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut tf = NamedTempFile::new().unwrap();
        write!(tf, "{TABLE}").unwrap();
        let recs = TableReader::read_path(tf.path()).unwrap();
        assert_eq!(recs.len(), 4);

        let missing = TableReader::read_path(tf.path().with_extension("does-not-exist"));
        assert!(matches!(missing, Err(IngestError::Io(_))));
    }
}
