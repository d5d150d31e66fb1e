use std::fmt::{Display, Formatter, Result};

/// Progress tick emitted after each station is estimated.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyProgress {
    pub station: String,
    pub done: usize,
    pub total: usize,
    pub converged: bool,
}

impl Display for SurveyProgress {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "[{}/{}] {} {}",
            self.done,
            self.total,
            self.station,
            if self.converged { "ok" } else { "fallback" }
        )
    }
}
