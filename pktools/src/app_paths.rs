use std::path::PathBuf;
use std::str::FromStr;

pub const CONFIG_DIR_ENV: &str = "PKHOUSE_CONFIG_DIR";

pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn from_dir(dir: PathBuf) -> Self {
        AppPaths { config_dir: dir }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn get_bank_root(&self) -> PathBuf {
        let mut bank_path = self.config_dir.clone();
        bank_path.push("banks");
        let _ = std::fs::create_dir_all(&bank_path);
        bank_path
    }

    pub fn get_log_path(&self) -> PathBuf {
        let mut log_path = self.config_dir.clone();
        log_path.push("logs");
        let _ = std::fs::create_dir_all(&log_path);
        log_path
    }

    /// Directory for file logging: an explicit directory, else `<root>/logs`
    /// when file logging was asked for, else none (log to stderr).
    pub fn resolve_log_dir(
        &self,
        explicit: Option<PathBuf>,
        log_to_file: bool,
    ) -> Option<PathBuf> {
        explicit.or_else(|| log_to_file.then(|| self.get_log_path()))
    }
}

pub fn get_app_paths(config_dir: Option<PathBuf>) -> anyhow::Result<AppPaths> {
    let config_dir = get_config_dir(config_dir)?;
    std::fs::create_dir_all(&config_dir)?;
    Ok(AppPaths::from_dir(config_dir))
}

fn get_config_dir(config_dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(config_dir) = config_dir {
        Ok(config_dir)
    } else if let Ok(Ok(env_config_dir)) =
        std::env::var(CONFIG_DIR_ENV).map(|path_str| PathBuf::from_str(&path_str))
    {
        Ok(env_config_dir)
    } else if let Some(base_dirs) = directories::BaseDirs::new() {
        let mut config_dir = base_dirs.data_local_dir().to_path_buf();
        config_dir.push("pkhouse");
        Ok(config_dir)
    } else {
        Err(anyhow::anyhow!("No suitable configuration directory found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        let paths = get_app_paths(Some(dir.path().join("cfg"))).unwrap();
        assert_eq!(paths.config_dir(), &dir.path().join("cfg"));
        assert_eq!(paths.get_bank_root(), dir.path().join("cfg").join("banks"));
        assert!(dir.path().join("cfg").join("banks").is_dir());
    }

    #[test]
    fn log_dir_defaults_under_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::from_dir(dir.path().to_path_buf());
        assert_eq!(paths.resolve_log_dir(None, false), None);
        assert_eq!(paths.resolve_log_dir(None, true), Some(dir.path().join("logs")));
        assert!(dir.path().join("logs").is_dir());

        let explicit = dir.path().join("elsewhere");
        assert_eq!(paths.resolve_log_dir(Some(explicit.clone()), true), Some(explicit));
    }
}
