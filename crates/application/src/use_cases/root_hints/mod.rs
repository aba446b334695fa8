mod load_root_hints;

pub use load_root_hints::LoadRootHintsUseCase;
