use obscura_settings::Settings;

pub mod draft;
pub mod logging;

/// Installs error hooks from across all crates of Obscura.
pub fn install_hooks() {
    obscura_utils::Error::init();
    obscura_recruitment::errors::tags::install_hook();
}

pub fn print_launch(settings: &Settings) {
    use nu_ansi_term::{Color, Style};

    let ascii_art = r"
 .d88b.  d8888b. .d8888.  .o88b. db    db d8888b.  .d8b.
.8P  Y8. 88  `8D 88'  YP d8P  Y8 88    88 88  `8D d8' `8b
88    88 88oooY' `8bo.   8P      88    88 88oobY' 88ooo88
88    88 88~~~b.   `Y8b. 8b      88    88 88`8b   88~~~88
`8b  d8' 88   8D db   8D Y8b  d8 88b  d88 88 `88. 88   88
 `Y88P'  Y8888P' `8888Y'  `Y88P' ~Y8888P' 88   YD YP   YP
";

    let header = Style::new().bold();
    let ascii_art = Style::new().fg(Color::Purple).paint(ascii_art);

    eprintln!("{ascii_art}");
    eprintln!("{}:\t{}", header.paint("Version"), env!("CARGO_PKG_VERSION"));

    if let Some(path) = settings.path() {
        eprintln!("{}:\t{}", header.paint("Settings file"), path.display());
    } else {
        eprintln!("{}:\t<none>", header.paint("Settings file"));
    }
    eprintln!("{}:\t{}", header.paint("Backend"), settings.backend().url);
    let access_token = if settings.backend().access_token.is_some() {
        Style::new().fg(Color::Green).paint("set")
    } else {
        Style::new().fg(Color::Red).paint("not set")
    };
    eprintln!("{}:\t{access_token}", header.paint("Access token"));
    eprintln!();
}
