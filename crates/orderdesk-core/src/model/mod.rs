pub mod date;
pub mod record;
