use std::path::PathBuf;

use markpane::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markpanerc");
    let content = r"
# comment
--no-mouse

--wrap-width 64

--log-file=markpane.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_mouse);
    assert_eq!(flags.wrap_width, Some(64));
    assert_eq!(flags.log_file, Some(PathBuf::from("markpane.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markpanerc");
    let content = "--no-animation\n--wrap-width 64\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "markpane".to_string(),
        "--wrap-width".to_string(),
        "90".to_string(),
        "--scratch".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_animation, "file flags should remain enabled");
    assert!(effective.scratch, "cli flags should be applied");
    assert_eq!(effective.wrap_width, Some(90), "cli should override wrap width");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_layers_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".markpanerc");
    std::fs::write(&global, "--wrap-width 50\n--no-mouse\n").unwrap();
    std::fs::write(&local, "--wrap-width 70\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert!(merged.no_mouse);
    assert_eq!(merged.wrap_width, Some(70));
}

#[test]
fn test_missing_config_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
