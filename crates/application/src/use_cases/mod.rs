pub mod dns;
pub mod root_hints;

pub use dns::HandleDnsQueryUseCase;
pub use root_hints::LoadRootHintsUseCase;
