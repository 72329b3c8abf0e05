pub mod application_repo;

pub use application_repo::ApplicationRepo;
