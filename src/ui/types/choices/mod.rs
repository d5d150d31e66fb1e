mod no_params;
mod report_format_choice;
mod schema;
mod source_choice;
mod start_guess_choice;
mod survey_choice;
mod ui_choice;
mod window_choice;

pub use no_params::NoParams;
pub use report_format_choice::*;
pub use schema::*;
pub use source_choice::*;
pub use start_guess_choice::*;
pub use survey_choice::*;
pub use ui_choice::UIChoice;
pub use window_choice::*;
