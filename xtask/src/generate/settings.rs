use obscura_settings::Settings;
use obscura_utils::error::exts::*;
use obscura_utils::Result;
use std::path::Path;

const EXAMPLE_SETTINGS_FILE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../config/obscura.example.toml");

pub fn run() -> Result<()> {
    let path = Path::new(EXAMPLE_SETTINGS_FILE);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_typed_error()
            .attach_printable_lazy(|| format!("could not create {}", parent.display()))
            .anonymize_error()?;
    }

    log::debug!("generating settings documentation");
    let contents = Settings::generate_docs();
    std::fs::write(path, contents)
        .into_typed_error()
        .attach_printable_lazy(|| format!("could not write file for {EXAMPLE_SETTINGS_FILE}"))
        .anonymize_error()?;

    println!(
        "{} settings file at: {EXAMPLE_SETTINGS_FILE}",
        crate::done_style().paint("Generated")
    );
    Ok(())
}
