use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use std::fmt::Display;
use std::str::FromStr;

pub struct InquireDriver;

fn bounds_message<T: Display>(min: Option<T>, max: Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("Must be between {lo} and {hi}"),
        (Some(lo), None) => format!("Must be ≥ {lo}"),
        (None, Some(hi)) => format!("Must be ≤ {hi}"),
        (None, None) => String::new(),
    }
}

fn ask_bounded<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: Copy + Clone + Display + FromStr + PartialOrd + 'static,
{
    let msg = bounds_message(min, max);
    let q = CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help)
        .with_error_message("Please type a number")
        .with_validator(move |x: &T| {
            let low_ok = min.map_or(true, |lo| *x >= lo);
            let high_ok = max.map_or(true, |hi| *x <= hi);
            if low_ok && high_ok {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(msg.clone().into()))
            }
        });
    Ok(q.prompt()?)
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_bounded(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_bounded(title, help, default, min, max)
    }

    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize> {
        Ok(Select::new(title, options.to_vec())
            .with_help_message(help)
            .raw_prompt()?
            .index)
    }
}
