// Optional YAML configuration for the initial board and presets

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::board::Board;
use crate::clock::{DEFAULT_DATE_FORMAT, DateStamp};
use crate::column::Column;
use crate::controller::BoardController;
use crate::ids::ColumnId;
use crate::suggestions::DEFAULT_COLUMNS;
use crate::task::TaskDraft;

const CONFIG_DIR: &str = "kanban";
const CONFIG_FILE: &str = "config.yml";

/// Board settings read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// chrono format string for task creation dates
    pub date_format: String,
    /// Initial columns; the first one receives suggested tasks
    pub columns: Vec<ColumnConfig>,
    /// Replaces the built-in suggested tasks when present
    pub suggestions: Option<Vec<TaskDraft>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Fixed id; generated when omitted
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(id, title)| ColumnConfig {
                    id: Some(id.to_string()),
                    title: title.to_string(),
                })
                .collect(),
            suggestions: None,
        }
    }
}

impl Config {
    /// Default config location: `<config dir>/kanban/config.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and built-in defaults are used if nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_or_default(path, Self::default_path())
    }

    fn load_or_default(path: Option<&Path>, default_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_path {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        info!(path = ?path, columns = config.columns.len(), "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        DateStamp::new(self.date_format.as_str())?;

        if self.columns.is_empty() {
            return Err(eyre!("at least one column is required"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.title.trim().is_empty() {
                return Err(eyre!("column titles must not be empty"));
            }
            if let Some(id) = &column.id {
                if id.trim().is_empty() {
                    return Err(eyre!("column '{}' has an empty id", column.title));
                }
                if !seen.insert(id.as_str()) {
                    return Err(eyre!("duplicate column id: {}", id));
                }
            }
        }

        if let Some(suggestions) = &self.suggestions {
            for draft in suggestions {
                if draft.title.trim().is_empty() || draft.description.trim().is_empty() {
                    return Err(eyre!("suggested tasks need a title and a description"));
                }
            }
        }

        Ok(())
    }

    /// Build the initial board described by this config
    pub fn board(&self) -> Result<Board> {
        self.validate()?;

        let columns = self
            .columns
            .iter()
            .map(|c| {
                let id = c.id.as_deref().map(ColumnId::from).unwrap_or_else(ColumnId::generate);
                Column::with_id(id, &c.title).map_err(|e| eyre!("column '{}': {}", c.title, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let default_column = columns
            .first()
            .map(|c| c.id().clone())
            .ok_or_else(|| eyre!("at least one column is required"))?;

        Ok(Board::from_columns(default_column, columns)?)
    }

    /// Controller over the initial board, with this config's presets and date format
    pub fn controller(&self) -> Result<BoardController> {
        let stamp = DateStamp::new(self.date_format.as_str())?;
        let mut controller = BoardController::new(self.board()?).with_date_stamp(stamp);
        if let Some(suggestions) = &self.suggestions {
            controller = controller.with_suggestions(suggestions.clone());
        }
        Ok(controller)
    }
}
