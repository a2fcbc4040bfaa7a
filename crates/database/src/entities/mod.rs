pub mod category;
pub mod seminar;
pub mod seminar_participant;
pub mod user;

pub use category as categories;
pub use seminar as seminars;
pub use seminar_participant as seminar_participants;
pub use user as users;
