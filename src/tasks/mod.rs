mod station_survey;

pub use station_survey::StationSurvey;
