use directories::ProjectDirs;
use std::path::PathBuf;

pub fn data_root() -> PathBuf {
    if let Some(dir) = std::env::var_os("ATENA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(pd) = ProjectDirs::from("com", "atena", "Atena") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}
