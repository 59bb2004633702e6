pub mod campaign;
pub mod concise;
pub mod results;

pub use campaign::{Campaign, CampaignError};
pub use concise::{concise_indices, concise_set, SelectError};
pub use results::{ResultsError, TestResults};
