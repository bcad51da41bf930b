use std::path::PathBuf;

use crate::navigation::DefaultRooms;

pub const DEFAULT_PORT: u16 = 39100;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:trellis.db?mode=rwc";
pub const DEFAULT_PREFERENCES_PATH: &str = "./trellis-preferences.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub test_mode: bool,
    pub preferences_path: PathBuf,
    pub default_rooms: DefaultRooms,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            test_mode: false,
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
            default_rooms: DefaultRooms::placeholder(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_rooms = match std::env::var("TRELLIS_DEFAULT_ROOMS") {
            Ok(raw) if !raw.trim().is_empty() => DefaultRooms::parse(&raw),
            _ => defaults.default_rooms,
        };

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            test_mode: std::env::var("TRELLIS_TEST_MODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            preferences_path: std::env::var("TRELLIS_PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_path),
            default_rooms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("TRELLIS_TEST_MODE");
        std::env::remove_var("TRELLIS_PREFERENCES_PATH");
        std::env::remove_var("TRELLIS_DEFAULT_ROOMS");
    }

    #[test]
    #[serial]
    fn test_default_config() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.port, 39100);
        assert_eq!(config.database_url, "sqlite:trellis.db?mode=rwc");
        assert!(!config.test_mode);
        assert_eq!(
            config.preferences_path,
            PathBuf::from("./trellis-preferences.json")
        );
        assert_eq!(config.default_rooms, DefaultRooms::placeholder());
    }

    #[test]
    #[serial]
    fn test_port_from_env() {
        clear_env();
        std::env::set_var("PORT", "8080");
        let config = Config::from_env();
        assert_eq!(config.port, 8080);
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back_to_default() {
        clear_env();
        std::env::set_var("PORT", "not_a_number");
        let config = Config::from_env();
        assert_eq!(config.port, 39100);
    }

    #[test]
    #[serial]
    fn test_test_mode_flag() {
        clear_env();
        std::env::set_var("TRELLIS_TEST_MODE", "TRUE");
        assert!(Config::from_env().test_mode);
        std::env::set_var("TRELLIS_TEST_MODE", "0");
        assert!(!Config::from_env().test_mode);
    }

    #[test]
    #[serial]
    fn test_preferences_path_from_env() {
        clear_env();
        std::env::set_var("TRELLIS_PREFERENCES_PATH", "/tmp/prefs.json");
        let config = Config::from_env();
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    #[serial]
    fn test_default_rooms_replace_placeholder() {
        clear_env();
        std::env::set_var("TRELLIS_DEFAULT_ROOMS", "!lobby:x=!general:x");
        let config = Config::from_env();
        assert_eq!(config.default_rooms.get("!lobby:x"), Some("!general:x"));
        assert_eq!(config.default_rooms.get("1"), None);
    }

    #[test]
    #[serial]
    fn test_blank_default_rooms_keeps_placeholder() {
        clear_env();
        std::env::set_var("TRELLIS_DEFAULT_ROOMS", "  ");
        let config = Config::from_env();
        assert_eq!(config.default_rooms.get("2"), Some("3"));
    }
}
