pub mod principal;

pub use principal::InMemoryPrincipalRepository;
