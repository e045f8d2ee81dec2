use std::fs;
use std::path::{Path, PathBuf};

use super::discovery::discover_recipes;
use super::types::{LoadedRecipe, RecipeDiscoveryError, RecipeInfo, RecipeRepoError, RecipeSpec};

/// Repository for discovering and loading recipes
pub struct RecipeRepository {
    pub root: PathBuf,
    pub recipes: Vec<RecipeInfo>,
}

impl RecipeRepository {
    /// Create a new repository by scanning the recipes directory
    pub fn new(root: &Path) -> Result<Self, RecipeDiscoveryError> {
        let recipes = discover_recipes(root)?;
        Ok(Self { root: root.to_path_buf(), recipes })
    }

    /// List all discovered recipes
    pub fn list_all(&self) -> &[RecipeInfo] {
        &self.recipes
    }

    /// Load a recipe by its logical name
    pub fn get_by_name(&self, name: &str) -> Result<LoadedRecipe, RecipeRepoError> {
        let info = self
            .recipes
            .iter()
            .find(|r| r.logical_name == name)
            .ok_or_else(|| RecipeRepoError::NotFound(name.to_string()))?;

        let spec = load_recipe(&info.path)?;

        Ok(LoadedRecipe { logical_name: info.logical_name.clone(), path: info.path.clone(), spec })
    }
}

/// Read and parse one recipe file.
pub fn load_recipe(path: &Path) -> Result<RecipeSpec, RecipeRepoError> {
    let s = fs::read_to_string(path)
        .map_err(|source| RecipeRepoError::Io { path: path.to_path_buf(), source })?;
    serde_yaml::from_str(&s)
        .map_err(|source| RecipeRepoError::Parse { path: path.to_path_buf(), source })
}
