/// Best-effort shell detection from $SHELL, for PATH setup hints.
pub fn detect_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .and_then(|shell| {
            std::path::Path::new(&shell)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "bash".to_string())
}

/// The config file a user of the given shell would edit.
pub fn config_file_hint(shell: &str) -> &'static str {
    match shell {
        "zsh" => "~/.zshrc",
        "bash" => "~/.bashrc or ~/.bash_profile",
        "fish" => "~/.config/fish/config.fish",
        _ => "your shell configuration file",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_hint() {
        assert_eq!(config_file_hint("zsh"), "~/.zshrc");
        assert_eq!(config_file_hint("fish"), "~/.config/fish/config.fish");
        assert_eq!(config_file_hint("tcsh"), "your shell configuration file");
    }
}
