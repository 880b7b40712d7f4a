use armpipe_core::sim::{Program, ProgramId, ProgramPatch, ProgramStore, StoreError};
use mockall::mock;

mock! {
    pub Store {}
    impl ProgramStore for Store {
        fn save(&mut self, title: &str, assembly_text: &str) -> Result<ProgramId, StoreError>;
        fn list(&self) -> Result<Vec<Program>, StoreError>;
        fn get(&self, id: ProgramId) -> Result<Program, StoreError>;
        fn update(&mut self, id: ProgramId, patch: ProgramPatch) -> Result<(), StoreError>;
        fn delete(&mut self, id: ProgramId) -> Result<(), StoreError>;
    }
}

/// A saved program record for `get` expectations.
pub fn program(id: u64, text: &str) -> Program {
    Program {
        id: ProgramId(id),
        title: format!("program {id}"),
        assembly_text: text.to_string(),
        created_at: 0,
        updated_at: 0,
    }
}
