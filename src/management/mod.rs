mod settings;

pub use settings::SECTION_LETTERBOXD;
pub use settings::SECTION_PLEX;
pub use settings::SECTION_TRAKT;
pub use settings::Settings;
