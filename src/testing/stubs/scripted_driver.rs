use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Scripted answer for one prompt; `Default` accepts the offered default.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Default,
    Bool(bool),
    Text(String),
    Number(f64),
    Select(usize),
}

/// Replays a fixed queue of answers and records every prompt title.
#[derive(Default)]
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(title.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for prompt {title:?}"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title)? {
            Answer::Default => Ok(default),
            Answer::Bool(b) => Ok(b),
            other => Err(anyhow!("expected bool for {title:?}, got {other:?}")),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        match self.next(title)? {
            Answer::Default => Ok(default.to_string()),
            Answer::Text(s) => Ok(s),
            other => Err(anyhow!("expected text for {title:?}, got {other:?}")),
        }
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        _min: Option<u64>,
        _max: Option<u64>,
    ) -> Result<u64> {
        match self.next(title)? {
            Answer::Default => Ok(default),
            Answer::Number(x) => Ok(x as u64),
            other => Err(anyhow!("expected integer for {title:?}, got {other:?}")),
        }
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        _min: Option<f64>,
        _max: Option<f64>,
    ) -> Result<f64> {
        match self.next(title)? {
            Answer::Default => Ok(default),
            Answer::Number(x) => Ok(x),
            other => Err(anyhow!("expected number for {title:?}, got {other:?}")),
        }
    }

    fn ask_select(&self, title: &str, _help: &str, options: &[String]) -> Result<usize> {
        match self.next(title)? {
            Answer::Default => Ok(0),
            Answer::Select(i) if i < options.len() => Ok(i),
            other => Err(anyhow!("invalid selection for {title:?}: {other:?}")),
        }
    }
}
