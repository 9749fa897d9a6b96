pub mod card;
pub mod favorites;
pub mod genres;
pub mod list;
pub mod quiz;
pub mod settings;
pub mod stats;
pub mod transfer;
pub mod weak;
