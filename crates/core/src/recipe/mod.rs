//! Declarative patch recipes: discovery, loading and execution.

pub mod discovery;
pub mod render;
pub mod repository;
pub mod runner;
pub mod types;

// Re-export primary API
pub use render::{placeholders, render_string};
pub use repository::{RecipeRepository, load_recipe};
pub use runner::RecipeRunner;
pub use types::{
    BoundaryMode, BoundarySpec, IndentMode, LoadedRecipe, MarkerSpec, NestedSpec,
    RecipeDiscoveryError, RecipeError, RecipeInfo, RecipeRepoError, RecipeReport, RecipeSpec,
    RecipeTarget, StepOp, StepReport, StepSpec,
};
