// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod loader;
pub mod model;
pub mod render;
pub mod snapshot;
pub mod system;

#[cfg(feature = "tui")]
pub mod tui;

rust_i18n::i18n!("locales", fallback = "en");

/// Activates `requested` when a translation exists for it, otherwise the
/// language part of the system locale, otherwise English.
pub fn init_locale(requested: Option<&str>) {
    let available = rust_i18n::available_locales!();
    let candidates = requested
        .map(str::to_string)
        .into_iter()
        .chain(sys_locale::get_locale());

    for candidate in candidates {
        let lang = candidate
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if available.iter().any(|l| *l == lang) {
            rust_i18n::set_locale(&lang);
            return;
        }
    }
    rust_i18n::set_locale("en");
}
