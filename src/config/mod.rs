//! Process configuration from environment variables (a `.env` file is loaded first when present).

mod settings;

pub use settings::*;
