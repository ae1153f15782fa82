use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn demos_root() -> PathBuf {
    workspace_root().join("demos")
}

pub fn demo_path(name: &str) -> PathBuf {
    demos_root().join(name)
}

/// Top-level `.easy` demos, sorted by name. Subdirectories hold demos that
/// need outside tooling and are not run by the smoke tests.
pub fn demo_scripts() -> Vec<PathBuf> {
    let mut scripts = WalkDir::new(demos_root())
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "easy"))
        .collect::<Vec<_>>();
    scripts.sort();
    scripts
}

pub fn demo_output_path(script: &Path) -> PathBuf {
    script.with_extension("out")
}

pub fn demo_input_path(script: &Path) -> PathBuf {
    script.with_extension("in")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_root_points_to_workspace() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn demos_root_points_to_demos_directory() {
        assert!(demos_root().is_dir());
    }

    #[test]
    fn demo_scripts_have_expected_output() {
        let scripts = demo_scripts();
        assert!(!scripts.is_empty());
        for script in scripts {
            assert!(demo_output_path(&script).is_file(), "{}", script.display());
        }
    }

    #[test]
    fn demo_path_joins_name() {
        assert!(demo_path("01-arithmetic.easy").is_file());
        assert!(demo_input_path(&demo_path("05-prompt.easy")).ends_with("05-prompt.in"));
    }
}
