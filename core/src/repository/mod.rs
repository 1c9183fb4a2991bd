pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileScenarioRepository;
pub use memory::InMemoryScenarioRepository;
pub use traits::ScenarioRepository;
