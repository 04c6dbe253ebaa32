pub mod form;
pub mod meetings;
pub mod updates;
