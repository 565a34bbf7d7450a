pub mod card;
pub mod charts;
