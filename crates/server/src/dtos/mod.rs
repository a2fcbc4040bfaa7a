pub mod seminar;
