//! Shared context for running CLI commands.

use std::{
    error::Error,
    path::{Path, PathBuf},
    process::ExitCode,
};

use tome_book::{BookPath, DocumentTree, ManifestOptions, PathResolver, load_book};
use tome_config::{Config, ConfigWarning, resolve_manifest};
use tome_highlight::{Palette, Stream};
use tracing::debug;

use super::exit_codes;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Repository root as given on the command line.
    pub root: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Styling for stdout.
    pub out: Palette,
    /// Styling for stderr.
    pub err: Palette,
}

/// A book loaded from disk.
pub struct LoadedBook {
    /// Resolver rooted at the canonical repository root.
    pub resolver: PathResolver,
    /// Manifest location inside the root.
    pub manifest: BookPath,
    /// The built tree.
    pub tree: DocumentTree,
}

impl CommandContext {
    /// Loads the configuration for `root`.
    pub fn load(root: &Path) -> Result<Self, ExitCode> {
        let mut ctx = Self::load_root_only(root);
        ctx.config = Config::load(root).map_err(|e| {
            eprintln!("{} failed to load configuration: {e}", ctx.err.error("error:"));
            exit_codes::fatal()
        })?;
        Ok(ctx)
    }

    /// Builds a context without reading configuration.
    ///
    /// Used by `init`, which must work even when an existing config is invalid.
    pub fn load_root_only(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            config: Config::default(),
            out: Palette::detect(Stream::Stdout),
            err: Palette::detect(Stream::Stderr),
        }
    }

    /// Reports configuration warnings on stderr.
    pub fn print_config_warnings(&self, warnings: &[ConfigWarning]) {
        for warning in warnings {
            eprintln!("{} {warning}", self.err.warning("warning:"));
        }
    }

    /// Resolves the manifest and builds the document tree.
    ///
    /// `manifest` overrides the configured manifest path.
    pub fn load_book(&self, manifest: Option<&Path>) -> Result<LoadedBook, ExitCode> {
        let manifest = manifest.unwrap_or(&self.config.book.manifest);
        let resolved = resolve_manifest(&self.root, manifest).map_err(|e| self.fatal(&e))?;
        debug!(
            root = %resolved.root.display(),
            manifest = %resolved.relative.display(),
            "resolved book"
        );

        let resolver = PathResolver::new(&resolved.root);
        let manifest_path = BookPath::from_relative(&resolved.relative).map_err(|e| self.fatal(&e))?;
        let options = ManifestOptions {
            indent_width: self.config.manifest.indent_width,
            extensions: self.config.manifest.extensions.clone(),
        };

        let tree = load_book(&resolver, &manifest_path, options).map_err(|e| {
            eprintln!("{} {}: {e}", self.err.error("error:"), resolved.relative.display());
            exit_codes::fatal()
        })?;

        Ok(LoadedBook {
            resolver,
            manifest: manifest_path,
            tree,
        })
    }

    /// Prints an error and returns the fatal exit code.
    pub fn fatal(&self, error: &dyn Error) -> ExitCode {
        eprintln!("{} {error}", self.err.error("error:"));
        exit_codes::fatal()
    }
}
