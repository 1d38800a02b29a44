use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use termcloud::TermCloudError;
use termcloud_cli::{Args, run};

/// Demo inputs live at the workspace root, not in the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        log_level: "off".to_string(),
        organism: "hsapiens".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_json_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        for terms in [false, true] {
            let output_filename = format!(
                "{}_{}.svg",
                demo_path.file_stem().unwrap().to_string_lossy(),
                if terms { "terms" } else { "words" }
            );
            let output_path = temp_dir.path().join(output_filename);

            let args = Args {
                terms,
                ..args_for(demo_path, &output_path)
            };

            match run(&args) {
                Ok(()) => {
                    let svg = fs::read_to_string(&output_path).unwrap();
                    assert!(svg.contains("<svg"), "{} is not SVG", output_path.display());
                }
                Err(e) => failed_demos.push((demo_path.clone(), e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_dir().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} wrote output despite failing",
            demo_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_query_genes_link_logo() {
    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("query.svg");

    let args = Args {
        genes: vec!["swi4".to_string(), "swi6".to_string()],
        organism: "scerevisiae".to_string(),
        ..args_for(&demos_dir().join("yeast_cell_cycle.json"), &output_path)
    };
    run(&args).unwrap();

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("organism=scerevisiae"));
    assert!(svg.contains("query=swi4%20swi6"));
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[cloud]\ncontainer = \"#nope\"\nshow_logo = false\n").unwrap();
    let output_path = temp_dir.path().join("out.svg");

    let args = Args {
        config: Some(config_path.to_string_lossy().to_string()),
        ..args_for(&demos_dir().join("yeast_cell_cycle.json"), &output_path)
    };

    // The output surface takes the container's name, so any id resolves.
    run(&args).unwrap();
    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(!svg.contains("<a"));
}

#[test]
fn e2e_invalid_config_is_reported() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[cloud]\nwidth = -10.0\n").unwrap();

    let args = Args {
        config: Some(config_path.to_string_lossy().to_string()),
        ..args_for(
            &demos_dir().join("yeast_cell_cycle.json"),
            &temp_dir.path().join("out.svg"),
        )
    };

    let err = run(&args).unwrap_err();
    assert!(matches!(err, TermCloudError::Config(_)));
}
