use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, FieldSpec, PathHint, UIChoice, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn menu_text<K: Copy + Into<&'static str> + EnumMessage>(kind: K) -> String {
    let label = kind.get_message().unwrap_or_else(|| kind.into());
    match kind.get_detailed_message() {
        Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
        _ => label.to_string(),
    }
}

/// Walks the user through one choice: a menu for its kind, one prompt per
/// primitive field, then any nested menus.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let kinds: Vec<C::Kind> = C::Kind::iter().collect();
    let labels: Vec<String> = kinds.iter().map(|k| menu_text(*k)).collect();

    let picked = driver.ask_select(C::prompt_label(), C::prompt_help(), &labels)?;
    let kind = *kinds
        .get(picked)
        .with_context(|| format!("menu index {picked} out of range"))?;

    let key: &'static str = kind.into();
    let specs = specs_for_kind(&C::schema(), key)?;
    let defaults = C::default_params(kind);

    let mut params = Map::new();
    for spec in &specs {
        let init = spec
            .default
            .clone()
            .or_else(|| defaults.get(&spec.name).cloned())
            .filter(|v| !v.is_null());
        if let Some(val) = prompt_field(driver, spec, init)? {
            params.insert(spec.name.clone(), val);
        }
    }

    if let Some(extra) = C::subprompts(driver, kind)? {
        params.extend(extra);
    }
    C::from_parts(kind, Value::Object(params))
}

/// `None` means an optional field was left blank.
fn prompt_field<D: PromptDriver>(
    driver: &D,
    spec: &FieldSpec,
    init: Option<Value>,
) -> Result<Option<Value>> {
    let help = spec.description.as_deref().unwrap_or("");

    if let Some(hint) = &spec.path {
        let def = init
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default();
        let path = prompt_path_until_ok(driver, &spec.title, help, def, hint, spec.required)?;
        return Ok(path.map(|p| Value::String(p.to_string_lossy().into_owned())));
    }

    if !spec.required && spec.kind != FieldKind::Boolean && init.is_none() {
        return prompt_optional(driver, spec, help);
    }

    let val = match spec.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&spec.title, help, def)?)
        }
        FieldKind::String => {
            let def = init
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Value::String(driver.ask_string(&spec.title, help, &def)?)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(
                &spec.title,
                help,
                def,
                spec.min.map(|x| x as u64),
                spec.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(driver.ask_f64(&spec.title, help, def, spec.min, spec.max)?)
        }
    };
    Ok(Some(val))
}

fn prompt_optional<D: PromptDriver>(driver: &D, spec: &FieldSpec, help: &str) -> Result<Option<Value>> {
    let answer = driver.ask_string(&spec.title, &format!("{help}\n(leave blank for none)"), "")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let val = match spec.kind {
        FieldKind::Integer => Value::from(
            answer
                .parse::<i64>()
                .with_context(|| format!("invalid integer for {}", spec.title))?,
        ),
        FieldKind::Number => Value::from(
            answer
                .parse::<f64>()
                .with_context(|| format!("invalid number for {}", spec.title))?,
        ),
        _ => Value::String(answer.to_string()),
    };
    Ok(Some(val))
}

fn validate_path_str(input: &str, hint: &PathHint) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if hint.must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if p.is_dir() {
        return Err("Expected a file path, not a directory".into());
    }
    if !hint.extensions.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if hint.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", hint.extensions.join(" / ."))),
        }
    }
    Ok(())
}

/// Re-asks until the answer satisfies `hint`. Optional paths accept a blank answer.
fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    hint: &PathHint,
    required: bool,
) -> Result<Option<PathBuf>> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        let answer = answer.trim();
        if answer.is_empty() && !required {
            return Ok(None);
        }
        match validate_path_str(answer, hint) {
            Ok(()) => return Ok(Some(PathBuf::from(answer))),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Answer, ScriptedDriver};
    use crate::ui::types::choices::{
        FixedStartParams, ReportFormatChoice, SourceChoice, StartGuessChoice, SurveyChoice,
        WindowChoice,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn fixed_start_reads_numbers() {
        let driver = ScriptedDriver::new(vec![
            Answer::Select(1),
            Answer::Number(2.5),
            Answer::Default,
        ]);
        let choice: StartGuessChoice = prompt_choice(&driver).unwrap();
        assert_eq!(
            choice,
            StartGuessChoice::Fixed(FixedStartParams { mu: 2.5, sigma: 2.0 })
        );
        assert_eq!(driver.remaining(), 0);
    }

    #[test]
    fn optional_year_left_blank_is_none() {
        let driver = ScriptedDriver::new(vec![Answer::Default, Answer::Default, Answer::Default]);
        let choice: WindowChoice = prompt_choice(&driver).unwrap();
        assert_eq!(choice, WindowChoice::default());
    }

    #[test]
    fn optional_year_parses_when_given() {
        let driver = ScriptedDriver::new(vec![
            Answer::Default,
            Answer::Number(3.0),
            Answer::Text("2021".into()),
        ]);
        match prompt_choice::<WindowChoice, _>(&driver).unwrap() {
            WindowChoice::RecentFullYears(p) => {
                assert_eq!(p.years, 3);
                assert_eq!(p.last_full_year, Some(2021));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn path_prompt_retries_until_valid() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "station,date,secchi,depth").unwrap();
        let good = file.path().to_string_lossy().into_owned();

        let driver = ScriptedDriver::new(vec![
            Answer::Select(0),
            Answer::Text("/definitely/not/here.csv".into()),
            Answer::Text(String::new()),
            Answer::Text(good.clone()),
        ]);
        let choice: SourceChoice = prompt_choice(&driver).unwrap();
        match choice {
            SourceChoice::CsvTable(p) => assert_eq!(p.path, PathBuf::from(good)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(driver.asked().len(), 4);
    }

    #[test]
    fn validate_rejects_wrong_extension() {
        let hint = PathHint {
            must_exist: false,
            extensions: vec!["csv".into()],
        };
        assert!(validate_path_str("out.txt", &hint).is_err());
        assert!(validate_path_str("out.CSV", &hint).is_ok());
        assert!(validate_path_str("  ", &hint).is_err());
    }

    #[test]
    fn full_survey_walkthrough() {
        let driver = ScriptedDriver::new(vec![
            // task
            Answer::Select(0),
            // min_years, output, log_level, log_file
            Answer::Number(2.0),
            Answer::Text(String::new()),
            Answer::Default,
            Answer::Text(String::new()),
            // source: synthetic with defaults
            Answer::Select(1),
            Answer::Default,
            Answer::Default,
            Answer::Default,
            Answer::Default,
            Answer::Default,
            Answer::Default,
            // window: all
            Answer::Select(2),
            // start guess: uncensored moments
            Answer::Select(0),
            // format: json
            Answer::Select(2),
            // optimizer tuning
            Answer::Bool(false),
        ]);
        let SurveyChoice::EstimateStations(p) = prompt_choice::<SurveyChoice, _>(&driver).unwrap();
        assert_eq!(p.min_years, 2);
        assert_eq!(p.output, None);
        assert_eq!(p.log_level, "info");
        assert_eq!(p.log_file, None);
        assert!(matches!(p.source, SourceChoice::Synthetic(ref s) if s.stations == 5 && s.seed == 42));
        assert!(matches!(p.window, WindowChoice::All(_)));
        assert_eq!(p.start_guess, StartGuessChoice::default());
        assert!(matches!(p.format, ReportFormatChoice::Json(_)));
        assert_eq!(driver.remaining(), 0);
    }
}
