//! Access to the save data the host system keeps per user profile.

use std::{
    io,
    path::{Path, PathBuf},
};

use crate::game::GameType;

pub trait SaveHost {
    /// Makes the save of `game` for `profile_id` available and returns the
    /// directory holding it.
    fn mount_save(&mut self, profile_id: &str, game: GameType) -> Option<PathBuf>;

    fn has_save_data(&self, profile_id: &str, game: GameType) -> bool;

    fn backup_save_dir(&self, src: &Path, dst: &Path) -> io::Result<()>;

    fn commit_save(&mut self) -> io::Result<()>;
}

/// Host backed by plain directories laid out as `<root>/<profile>/<game>/`.
pub struct DirectoryHost {
    root: PathBuf,
    mounted: Option<PathBuf>,
}

impl DirectoryHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryHost {
            root: root.into(),
            mounted: None,
        }
    }

    fn save_dir(&self, profile_id: &str, game: GameType) -> PathBuf {
        let mut path = self.root.clone();
        path.push(profile_id);
        path.push(game.dir_name());
        path
    }

    pub fn mounted(&self) -> Option<&Path> {
        self.mounted.as_deref()
    }
}

impl SaveHost for DirectoryHost {
    fn mount_save(&mut self, profile_id: &str, game: GameType) -> Option<PathBuf> {
        let dir = self.save_dir(profile_id, game);
        if dir.is_dir() {
            log::debug!("Mounted save {}", dir.display());
            self.mounted = Some(dir.clone());
            Some(dir)
        } else {
            log::warn!("No save data for profile {profile_id} in {game}");
            None
        }
    }

    fn has_save_data(&self, profile_id: &str, game: GameType) -> bool {
        self.save_dir(profile_id, game).is_dir()
    }

    fn backup_save_dir(&self, src: &Path, dst: &Path) -> io::Result<()> {
        copy_dir_all(src, dst)?;
        log::info!("Backed up {} to {}", src.display(), dst.display());
        Ok(())
    }

    fn commit_save(&mut self) -> io::Result<()> {
        match &self.mounted {
            Some(dir) => {
                log::debug!("Committed {}", dir.display());
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no save mounted")),
        }
    }
}

fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_and_backup() {
        let root = tempfile::tempdir().unwrap();
        let mut host = DirectoryHost::new(root.path());
        assert!(!host.has_save_data("player", GameType::ScarletViolet));
        assert!(host.mount_save("player", GameType::ScarletViolet).is_none());
        assert!(host.commit_save().is_err());

        let save_dir = root.path().join("player").join("sv");
        std::fs::create_dir_all(save_dir.join("nested")).unwrap();
        std::fs::write(save_dir.join("main"), b"save").unwrap();
        std::fs::write(save_dir.join("nested").join("extra"), b"x").unwrap();

        let mounted = host.mount_save("player", GameType::ScarletViolet).unwrap();
        assert_eq!(mounted, save_dir);
        host.commit_save().unwrap();

        let backup = root.path().join("backup");
        host.backup_save_dir(&mounted, &backup).unwrap();
        assert_eq!(std::fs::read(backup.join("main")).unwrap(), b"save");
        assert_eq!(std::fs::read(backup.join("nested").join("extra")).unwrap(), b"x");
    }
}
