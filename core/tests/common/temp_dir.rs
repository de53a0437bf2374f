// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tokio::fs;

/// Temporary directories used for testing.
///
/// Automatically cleans up all created directories when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// Vdir root for calendar collections.
    pub calendar_path: PathBuf,
    /// State directory for the short id map.
    pub state_dir: PathBuf,
}

impl TempDirs {
    /// Creates new temporary directories for testing, with a single
    /// "personal" collection under the vdir root.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();

        let calendar_path = base.join("calendar");
        let state_dir = base.join("state");

        fs::create_dir_all(calendar_path.join("personal")).await?;
        fs::create_dir_all(&state_dir).await?;

        Ok(Self {
            calendar_path,
            state_dir,
        })
    }

    /// Gets the base temporary directory.
    #[must_use]
    pub fn base(&self) -> PathBuf {
        // calendar_path and state_dir share the same parent (base)
        self.calendar_path
            .parent()
            .expect("temp directories should have a parent")
            .to_path_buf()
    }

    /// Creates a test .ics file in the given collection.
    #[allow(dead_code)]
    pub async fn create_ics_file(
        &self,
        collection: &str,
        uid: &str,
        content: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = self.calendar_path.join(collection).join(format!("{uid}.ics"));
        fs::write(&path, content).await?;
        Ok(path)
    }
}

/// Sets up temporary directories for integration tests.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        let base = self.base();
        if let Err(e) = std::fs::remove_dir_all(&base) {
            eprintln!("failed to clean up temp directory {}: {e}", base.display());
        }
    }
}
