use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use minnow::config::Config;

// from_args consults the LISTEN env var, so tests touching the environment
// must not overlap with the rest of this file.
fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_config_defaults() {
    let _guard = env_lock();
    let cfg = Config::from_args(args(&[])).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:4221");
    assert_eq!(cfg.root_dir, PathBuf::from("."));
    assert_eq!(cfg.max_connections, 1024);
}

#[test]
fn test_config_directory_flag() {
    let _guard = env_lock();
    let cfg = Config::from_args(args(&["--directory", "/tmp/data"])).unwrap();

    assert_eq!(cfg.root_dir, PathBuf::from("/tmp/data"));
}

#[test]
fn test_config_listen_flag() {
    let _guard = env_lock();
    let cfg = Config::from_args(args(&["--listen", "0.0.0.0:9999"])).unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:9999");
}

#[test]
fn test_config_max_connections_flag() {
    let _guard = env_lock();
    let cfg = Config::from_args(args(&["--max-connections", "8"])).unwrap();

    assert_eq!(cfg.max_connections, 8);
}

#[test]
fn test_config_invalid_max_connections() {
    let _guard = env_lock();
    let result = Config::from_args(args(&["--max-connections", "many"]));

    assert!(result.is_err());
}

#[test]
fn test_config_unknown_flag() {
    let _guard = env_lock();
    let result = Config::from_args(args(&["--bogus"]));

    assert!(result.is_err());
}

#[test]
fn test_config_flag_missing_value() {
    let _guard = env_lock();
    let result = Config::from_args(args(&["--directory"]));

    assert!(result.is_err());
}

#[test]
fn test_config_listen_env_var() {
    let _guard = env_lock();
    unsafe {
        std::env::set_var("LISTEN", "127.0.0.1:7777");
    }

    let cfg = Config::from_args(args(&[])).unwrap();

    unsafe {
        std::env::remove_var("LISTEN");
    }

    assert_eq!(cfg.listen_addr, "127.0.0.1:7777");
}

#[test]
fn test_config_flag_overrides_env() {
    let _guard = env_lock();
    unsafe {
        std::env::set_var("LISTEN", "127.0.0.1:7777");
    }

    let cfg = Config::from_args(args(&["--listen", "127.0.0.1:8888"])).unwrap();

    unsafe {
        std::env::remove_var("LISTEN");
    }

    assert_eq!(cfg.listen_addr, "127.0.0.1:8888");
}

#[test]
fn test_config_from_yaml_file() {
    let _guard = env_lock();
    let path = std::env::temp_dir().join(format!("minnow-config-{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        "listen_addr: \"127.0.0.1:5555\"\nroot_dir: \"/srv/files\"\nmax_connections: 32\n",
    )
    .unwrap();

    let cfg = Config::from_args(args(&["--config", path.to_str().unwrap()])).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:5555");
    assert_eq!(cfg.root_dir, PathBuf::from("/srv/files"));
    assert_eq!(cfg.max_connections, 32);
}

#[test]
fn test_config_flag_overrides_file() {
    let _guard = env_lock();
    let path = std::env::temp_dir().join(format!("minnow-config-ovr-{}.yaml", std::process::id()));
    std::fs::write(&path, "root_dir: \"/srv/files\"\n").unwrap();

    let cfg = Config::from_args(args(&[
        "--config",
        path.to_str().unwrap(),
        "--directory",
        "/srv/other",
    ]))
    .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.root_dir, PathBuf::from("/srv/other"));
    // Unset fields keep their defaults
    assert_eq!(cfg.listen_addr, "127.0.0.1:4221");
}

#[test]
fn test_config_missing_file_is_an_error() {
    let _guard = env_lock();
    let result = Config::from_args(args(&["--config", "/no/such/file.yaml"]));

    assert!(result.is_err());
}
