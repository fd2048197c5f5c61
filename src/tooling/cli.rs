//! CLI Tooling
//!
//! `folio browse` resolves the session and loads one folder through the content
//! loader; `folio whoami` only resolves the session.

use crate::auth::SessionAuth;
use crate::config::{ConfigLoader, FolioConfig};
use crate::error::ApiError;
use crate::loader::{ContentLoader, LoadOutcome};
use crate::navigation::{FilterSpec, FolderRef, NavigationKey, SortBy, SortOrder};
use crate::repository::HttpContentClient;
use crate::tooling::format::{format_user_text, format_view_json, format_view_text};
use crate::types::{FileType, FolderId};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

/// Folio CLI - browse folders and files of a content API
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Browse folders and files served by the content API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one folder, or the root listing when no folder is given
    Browse {
        /// Folder ID to open
        #[arg(long)]
        folder: Option<String>,

        /// Free-text search over file names and descriptions
        #[arg(long, default_value = "")]
        search: String,

        /// Only show files of this type (pdf, word, excel, pptx, image, video_link, ...)
        #[arg(long = "type")]
        file_type: Option<FileType>,

        /// Only show files carrying this tag ID (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Sort field (createdAt, filename)
        #[arg(long, default_value = "createdAt")]
        sort_by: SortBy,

        /// Sort order (asc, desc)
        #[arg(long, default_value = "desc")]
        order: SortOrder,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show the user the configured token belongs to
    Whoami {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// CLI context for executing commands
pub struct CliContext {
    config: FolioConfig,
    client: Arc<HttpContentClient>,
    runtime: Runtime,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load()?,
        };
        config.api.validate()?;

        let client = Arc::new(HttpContentClient::new(&config.api)?);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            config,
            client,
            runtime,
        })
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Browse {
                folder,
                search,
                file_type,
                tags,
                sort_by,
                order,
                format,
            } => {
                let filters = FilterSpec::default()
                    .with_search(search.as_str())
                    .with_file_type(*file_type)
                    .with_tags(tags.iter().map(String::as_str))
                    .sorted(*sort_by, *order);
                let folder = FolderRef::from(folder.as_deref().map(FolderId::new));
                self.browse(NavigationKey::new(folder, filters), *format)
            }
            Commands::Whoami { format } => self.whoami(*format),
        }
    }

    fn browse(&self, key: NavigationKey, format: OutputFormat) -> Result<String, ApiError> {
        info!(folder = %key.folder, "Browsing");
        let auth = Arc::new(SessionAuth::pending());
        let loader = ContentLoader::new(self.client.clone(), self.client.clone(), auth.clone());

        let outcome = self.runtime.block_on(async {
            // Deferred: the key is remembered and loaded once the session resolves
            let _ = loader.navigate(key).await;
            let (_, outcome) = tokio::join!(auth.verify_token(&self.client), loader.start());
            outcome
        });

        if outcome == LoadOutcome::NotAuthenticated {
            return Err(ApiError::NotAuthenticated);
        }

        let view = loader.observe();
        if let Some(message) = &view.blocking_error {
            return Err(ApiError::LoadFailed(message.clone()));
        }

        match format {
            OutputFormat::Text => Ok(format_view_text(&view)),
            OutputFormat::Json => format_view_json(&view),
        }
    }

    fn whoami(&self, format: OutputFormat) -> Result<String, ApiError> {
        let auth = SessionAuth::pending();
        let user = self
            .runtime
            .block_on(auth.verify_token(&self.client))
            .ok_or(ApiError::NotAuthenticated)?;

        match format {
            OutputFormat::Text => Ok(format_user_text(&user)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&user)?),
        }
    }
}
