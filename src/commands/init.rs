use crate::core::config::Config;
use crate::error::Result;
use crate::utils::shell;

pub fn init_shell() -> Result<()> {
    println!("🔧 Initializing glsm");
    println!();

    let config = Config::load()?;
    let bin_dir = config.get_bin_dir();
    let bin_dir_str = bin_dir.to_string_lossy();

    println!("📁 glsm directories:");
    println!("  - Manager directory: {}", config.glsm_dir.display());
    println!("  - Binary directory: {}", bin_dir.display());
    println!("  - Versions directory: {}", config.get_versions_dir().display());
    println!();

    // Check if PATH already contains our bin directory
    if let Ok(path) = std::env::var("PATH") {
        if path.contains(&*bin_dir_str) {
            println!("✅ PATH is already configured correctly!");
            println!();
            println!("glsm is ready to use.");
            println!("Run 'glsm doctor' to verify your setup.");
            return Ok(());
        }
    }

    println!("🛣️  Adding glsm to PATH");
    println!();
    println!("Add the following line to your shell configuration file:");
    println!();

    let shell_name = shell::detect_shell();
    let config_file = shell::config_file_hint(&shell_name);

    println!("  export PATH=\"{bin_dir_str}:$PATH\"");
    println!();
    println!("Configuration file: {config_file}");
    println!();

    println!("📝 Manual setup steps:");
    println!("  1. Add the export line above to your shell config file");
    println!("  2. Restart your terminal or run: source {config_file}");
    println!("  3. Run 'glsm doctor' to verify setup");
    println!("  4. Install a gls version: glsm install latest");

    Ok(())
}
