use anyhow::{Context, Result, anyhow, bail};
use secchi::logging::{self, Component};
use secchi::ui::cli::drivers::InquireDriver;
use secchi::ui::cli::wizard::prompt_choice;
use secchi::ui::types::build::{LogSettings, build_survey};
use secchi::ui::types::choices::{SurveyChoice, UIChoice};
use std::path::PathBuf;
use std::sync::mpsc;
use std::{env, fs, io, thread};

const USAGE: &str = "\
usage: secchi [--config <survey.json> | --schema | --help]

  --config <file>  run the survey described by a JSON config
  --schema         print the JSON schema of the config
  --help           show this message

Without arguments an interactive wizard builds the config.";

#[derive(Debug, PartialEq)]
enum Command {
    Wizard,
    Config(PathBuf),
    Schema,
    Help,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command> {
    let mut args = args.into_iter();
    let command = match args.next().as_deref() {
        None => Command::Wizard,
        Some("--config" | "-c") => {
            let path = args.next().context("--config needs a file path")?;
            Command::Config(PathBuf::from(path))
        }
        Some("--schema") => Command::Schema,
        Some("--help" | "-h") => Command::Help,
        Some(other) => bail!("unknown argument `{other}`\n\n{USAGE}"),
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument `{extra}`\n\n{USAGE}");
    }
    Ok(command)
}

fn main() -> Result<()> {
    match parse_args(env::args().skip(1))? {
        Command::Help => println!("{USAGE}"),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&SurveyChoice::schema())?)
        }
        Command::Config(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let choice: SurveyChoice = serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            run(choice)?;
        }
        Command::Wizard => {
            let choice = prompt_choice::<SurveyChoice, _>(&InquireDriver)?;
            eprintln!(
                "Equivalent config:\n{}",
                serde_json::to_string_pretty(&choice)?
            );
            run(choice)?;
        }
    }
    Ok(())
}

fn run(choice: SurveyChoice) -> Result<()> {
    let log = LogSettings::try_from(&choice)?;
    logging::init_logger(log.level, log.file.as_deref(), false);

    let plan = build_survey(choice)?;
    if plan.stations.is_empty() {
        logging::warn(
            Component::Cli,
            None,
            "No stations left after windowing and filtering",
        );
    }

    let (tx, rx) = mpsc::channel();
    let printer = thread::spawn(move || {
        for progress in rx {
            eprintln!("{progress}");
        }
    });

    let survey = plan.survey.with_progress(tx);
    let report = survey.run(&plan.stations)?;
    drop(survey);
    printer
        .join()
        .map_err(|_| anyhow!("progress printer panicked"))?;

    match plan.output {
        Some(path) => {
            report.export(&path, plan.format)?;
            logging::info(
                Component::Cli,
                None,
                &format!("Wrote {} row(s) to {}", report.len(), path.display()),
            );
        }
        None => report.write_to(&mut io::stdout().lock(), plan.format)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_starts_wizard() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Wizard);
    }

    #[test]
    fn config_takes_a_path() {
        assert_eq!(
            parse_args(args(&["--config", "survey.json"])).unwrap(),
            Command::Config(PathBuf::from("survey.json"))
        );
        assert!(parse_args(args(&["--config"])).is_err());
    }

    #[test]
    fn stray_arguments_are_rejected() {
        assert!(parse_args(args(&["--schema", "extra"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
    }
}
