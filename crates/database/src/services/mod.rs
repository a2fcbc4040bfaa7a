pub mod category;
pub mod seminar;
