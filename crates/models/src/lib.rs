pub mod seminar_data;
pub mod validation;
