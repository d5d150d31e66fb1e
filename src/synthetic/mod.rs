mod censored_station_generator;

pub use censored_station_generator::CensoredStationGenerator;
