pub mod espn_api;

pub use espn_api::EspnApiClient;
