/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::MakepalErrors;

/// An output file written under a temporary sibling name.
///
/// The temporary file is renamed over the target by [`commit`](Self::commit),
/// if the value is dropped before that the temporary file is removed, so
/// the target path never holds a half written image.
pub struct PendingFile {
    target:    PathBuf,
    temporary: PathBuf,
    committed: bool
}

impl PendingFile {
    /// Create `<target>.part` and return a buffered handle to it
    pub fn create(target: &Path) -> Result<(PendingFile, BufWriter<File>), MakepalErrors> {
        let temporary = temporary_path(target)?;

        let file = File::create(&temporary).map_err(|e| MakepalErrors::Io(temporary.clone(), e))?;
        debug!("Writing to temporary file {:?}", temporary);

        let pending = PendingFile {
            target: target.to_path_buf(),
            temporary,
            committed: false
        };
        Ok((pending, BufWriter::new(file)))
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the finished file into place.
    ///
    /// Every handle to the temporary file should be closed before this is called.
    pub fn commit(mut self) -> Result<(), MakepalErrors> {
        std::fs::rename(&self.temporary, &self.target)
            .map_err(|e| MakepalErrors::Io(self.target.clone(), e))?;
        self.committed = true;
        debug!("Renamed {:?} to {:?}", self.temporary, self.target);
        Ok(())
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.temporary) {
                warn!("Could not remove {:?}: {e}", self.temporary);
            }
        }
    }
}

fn temporary_path(target: &Path) -> Result<PathBuf, MakepalErrors> {
    let Some(name) = target.file_name() else {
        return Err(MakepalErrors::InvalidOutput(target.to_path_buf()));
    };
    let mut name: OsString = name.to_os_string();
    name.push(".part");

    Ok(target.with_file_name(name))
}
