//! Standings loaders: whitespace text format and CSV.

use crate::models::{EliminationError, LoadOptions, Standings, TeamRow};
use std::io::Read;
use std::path::Path;

/// Parse the text format: team count, then per team
/// `name wins losses remaining g0 .. g(n-1)`. Line breaks are not significant.
pub fn parse_standings(input: &str, options: LoadOptions) -> Result<Standings, EliminationError> {
    let mut tokens = input
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));

    let (line, first) = tokens.next().ok_or(EliminationError::EmptyDivision)?;
    let declared: usize = first.parse().map_err(|_| EliminationError::Parse {
        line: Some(line),
        message: format!("expected team count, found '{}'", first),
    })?;
    if declared == 0 {
        return Err(EliminationError::EmptyDivision);
    }

    // `declared` is untrusted; rows grow only as they are actually read.
    let mut rows = Vec::new();
    while rows.len() < declared {
        let Some((_, name)) = tokens.next() else {
            return Err(EliminationError::TeamCountMismatch {
                declared,
                found: rows.len(),
            });
        };
        let mut field = |what: &str| -> Result<i64, EliminationError> {
            let (line, tok) = tokens.next().ok_or_else(|| EliminationError::Parse {
                line: None,
                message: format!("unexpected end of input reading {} of {}", what, name),
            })?;
            parse_count(tok, what, name, Some(line))
        };
        let wins = field("wins")?;
        let losses = field("losses")?;
        let remaining = field("remaining")?;
        let against = (0..declared)
            .map(|_| field("games against"))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(TeamRow::new(name, wins, losses, remaining, against));
    }

    if let Some((line, tok)) = tokens.next() {
        return Err(EliminationError::Parse {
            line: Some(line),
            message: format!("unexpected '{}' after {} teams", tok, declared),
        });
    }

    Standings::from_rows(rows, options)
}

/// Read headerless CSV rows `name,wins,losses,remaining,g0,..,g(n-1)`.
pub fn read_standings_csv<R: Read>(reader: R, options: LoadOptions) -> Result<Standings, EliminationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| EliminationError::Parse {
            line: e.position().map(|p| p.line() as usize),
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line() as usize);
        if record.len() < 4 {
            return Err(EliminationError::Parse {
                line,
                message: format!("expected at least 4 columns, found {}", record.len()),
            });
        }
        let name = &record[0];
        let against = record
            .iter()
            .skip(4)
            .map(|tok| parse_count(tok, "games against", name, line))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(TeamRow::new(
            name,
            parse_count(&record[1], "wins", name, line)?,
            parse_count(&record[2], "losses", name, line)?,
            parse_count(&record[3], "remaining", name, line)?,
            against,
        ));
    }

    Standings::from_rows(rows, options)
}

/// Load a standings file: CSV for a `.csv` extension, the text format otherwise.
pub fn load_standings(path: impl AsRef<Path>, options: LoadOptions) -> Result<Standings, EliminationError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| EliminationError::Io(format!("{}: {}", path.display(), e)))?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    log::info!(
        "Loading {} standings from {}",
        if is_csv { "CSV" } else { "text" },
        path.display()
    );
    if is_csv {
        read_standings_csv(text.as_bytes(), options)
    } else {
        parse_standings(&text, options)
    }
}

fn parse_count(tok: &str, what: &str, team: &str, line: Option<usize>) -> Result<i64, EliminationError> {
    tok.parse().map_err(|_| EliminationError::Parse {
        line,
        message: format!("expected integer {} for {}, found '{}'", what, team, tok),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_are_not_significant() {
        let s = parse_standings("2 A 1 0 1 0 1\nB\n0 1 1 1 0", LoadOptions::default()).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.against(0, 1), 1);
    }

    #[test]
    fn truncated_row_reports_end_of_input() {
        let err = parse_standings("2\nA 1 0 1 0 1\nB 0 1", LoadOptions::default()).unwrap_err();
        assert!(matches!(err, EliminationError::Parse { line: None, .. }));
    }

    #[test]
    fn missing_rows_are_a_count_mismatch() {
        let err = parse_standings("3\nA 1 0 0 0 0 0", LoadOptions::default()).unwrap_err();
        assert_eq!(
            err,
            EliminationError::TeamCountMismatch {
                declared: 3,
                found: 1
            }
        );
    }

    #[test]
    fn huge_team_count_fails_without_allocating() {
        for input in ["18446744073709551615\nA 1 0 0 0", "100000000000\nA 1 0 0 0"] {
            let err = parse_standings(input, LoadOptions::default()).unwrap_err();
            assert!(matches!(err, EliminationError::Parse { line: None, .. }), "{input}");
        }
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse_standings("1\nA 1 0 0 0\nB", LoadOptions::default()).unwrap_err();
        assert!(matches!(err, EliminationError::Parse { line: Some(3), .. }));
    }

    #[test]
    fn non_integer_field_names_the_line() {
        let err = parse_standings("1\nA one 0 0 0", LoadOptions::default()).unwrap_err();
        assert!(matches!(err, EliminationError::Parse { line: Some(2), .. }));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn csv_rows_are_trimmed() {
        let csv = "# team,w,l,r,games\nA, 3, 1, 2, 0, 2\nB, 2, 2, 2, 2, 0\n";
        let s = read_standings_csv(csv.as_bytes(), LoadOptions::default()).unwrap();
        assert_eq!(s.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(s.record(0).wins, 3);
    }

    #[test]
    fn csv_short_row_is_rejected() {
        let err = read_standings_csv("A,1,2\n".as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, EliminationError::Parse { line: Some(1), .. }));
    }
}
