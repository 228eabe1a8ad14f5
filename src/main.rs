use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod merge;

use config::Palette;
use merge::{ColorUpdate, Overrides};

/// Positional invocation. Optional values left empty keep what is stored.
#[derive(Parser, Debug)]
#[command(author, version, about = "Save theme colors without losing stored preferences", long_about = None)]
struct Cli {
    /// Background color
    #[arg(allow_hyphen_values = true)]
    background: String,

    /// Primary color
    #[arg(allow_hyphen_values = true)]
    primary: String,

    /// Secondary color
    #[arg(allow_hyphen_values = true)]
    secondary: String,

    /// Text color
    #[arg(allow_hyphen_values = true)]
    text: String,

    /// Accent color
    #[arg(allow_hyphen_values = true)]
    accent: String,

    /// Settings file to update
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    target: PathBuf,

    /// Path of the wallpaper last applied
    #[arg(allow_hyphen_values = true)]
    last_wallpaper: Option<String>,

    /// Name of the selected color preset
    #[arg(allow_hyphen_values = true)]
    color_preset: Option<String>,

    /// Sidebar position (e.g. left, right)
    #[arg(allow_hyphen_values = true)]
    sidebar_position: Option<String>,

    /// "true" to enable notifications, anything else disables them
    #[arg(allow_hyphen_values = true)]
    notifications_enabled: Option<String>,

    /// "true" to enable notification sounds, anything else disables them
    #[arg(allow_hyphen_values = true)]
    notification_sounds_enabled: Option<String>,

    /// "true" to show the sidebar, anything else hides it
    #[arg(allow_hyphen_values = true)]
    sidebar_visible: Option<String>,

    /// Corner rounding style
    #[arg(allow_hyphen_values = true)]
    rounding: Option<String>,

    /// "true" to show hidden files, anything else hides them
    #[arg(allow_hyphen_values = true)]
    show_hidden_files: Option<String>,

    /// Extra trailing values are accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    _rest: Vec<String>,
}

fn supplied(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.is_empty())
}

/// Only the literal "true" turns a flag on.
fn flag(raw: Option<String>) -> Option<bool> {
    supplied(raw).map(|v| v == "true")
}

impl Cli {
    fn into_update(self) -> (PathBuf, ColorUpdate) {
        let update = ColorUpdate {
            palette: Palette {
                background: self.background,
                primary: self.primary,
                secondary: self.secondary,
                text: self.text,
                accent: self.accent,
            },
            overrides: Overrides {
                last_wallpaper: supplied(self.last_wallpaper),
                color_preset: supplied(self.color_preset),
                sidebar_position: supplied(self.sidebar_position),
                notifications_enabled: flag(self.notifications_enabled),
                notification_sounds_enabled: flag(self.notification_sounds_enabled),
                sidebar_visible: flag(self.sidebar_visible),
                rounding: supplied(self.rounding),
                show_hidden_files: flag(self.show_hidden_files),
            },
        };
        (self.target, update)
    }
}

fn main() -> Result<()> {
    // Quiet by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (target, update) = Cli::parse().into_update();

    merge::apply(&target, &update)
        .with_context(|| format!("failed to save settings to {}", target.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [&str; 6] = [
        "save-colors",
        "#000000",
        "#111111",
        "#222222",
        "#ffffff",
        "#ff0000",
    ];

    fn parse(extra: &[&str]) -> (PathBuf, ColorUpdate) {
        let args = COLORS.iter().chain(extra.iter());
        Cli::try_parse_from(args).expect("valid invocation").into_update()
    }

    #[test]
    fn required_arguments_only() {
        let (target, update) = parse(&["/tmp/c.json"]);
        assert_eq!(target, PathBuf::from("/tmp/c.json"));
        assert_eq!(update.palette.background, "#000000");
        assert_eq!(update.palette.accent, "#ff0000");
        assert_eq!(update.overrides, Overrides::default());
    }

    #[test]
    fn missing_target_is_rejected() {
        assert!(Cli::try_parse_from(COLORS).is_err());
    }

    #[test]
    fn missing_color_is_rejected() {
        let args = ["save-colors", "#000000", "#111111", "#222222", "#ffffff"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn optional_values_map_to_named_fields() {
        let (_, update) = parse(&[
            "/tmp/c.json",
            "/walls/a.png",
            "dark",
            "right",
            "true",
            "false",
            "true",
            "8px",
            "yes",
        ]);
        let overrides = update.overrides;
        assert_eq!(overrides.last_wallpaper.as_deref(), Some("/walls/a.png"));
        assert_eq!(overrides.color_preset.as_deref(), Some("dark"));
        assert_eq!(overrides.sidebar_position.as_deref(), Some("right"));
        assert_eq!(overrides.notifications_enabled, Some(true));
        assert_eq!(overrides.notification_sounds_enabled, Some(false));
        assert_eq!(overrides.sidebar_visible, Some(true));
        assert_eq!(overrides.rounding.as_deref(), Some("8px"));
        // Only the exact literal counts.
        assert_eq!(overrides.show_hidden_files, Some(false));
    }

    #[test]
    fn flag_coercion_is_case_sensitive() {
        let (_, update) = parse(&["/tmp/c.json", "", "", "", "True", "TRUE", "1"]);
        assert_eq!(update.overrides.notifications_enabled, Some(false));
        assert_eq!(update.overrides.notification_sounds_enabled, Some(false));
        assert_eq!(update.overrides.sidebar_visible, Some(false));
    }

    #[test]
    fn empty_arguments_count_as_not_supplied() {
        let (_, update) = parse(&["/tmp/c.json", "", "", "", "", "", "", "", ""]);
        assert_eq!(update.overrides, Overrides::default());
    }

    #[test]
    fn dash_prefixed_values_are_plain_strings() {
        let args = [
            "save-colors",
            "-bg",
            "#111111",
            "#222222",
            "#ffffff",
            "#ff0000",
            "/tmp/c.json",
            "-dark.png",
            "",
            "",
            "",
            "",
            "",
            "-4px",
        ];
        let (_, update) = Cli::try_parse_from(args)
            .expect("dash-prefixed values parse")
            .into_update();

        assert_eq!(update.palette.background, "-bg");
        assert_eq!(update.overrides.last_wallpaper.as_deref(), Some("-dark.png"));
        assert_eq!(update.overrides.rounding.as_deref(), Some("-4px"));
    }

    #[test]
    fn negative_number_rounding_is_accepted() {
        let (_, update) = parse(&["/tmp/c.json", "", "", "", "", "", "", "-1"]);
        assert_eq!(update.overrides.rounding.as_deref(), Some("-1"));
    }

    #[test]
    fn values_past_the_last_position_are_ignored() {
        let (_, update) = parse(&[
            "/tmp/c.json",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "true",
            "extra",
            "--more",
        ]);
        assert_eq!(update.overrides.show_hidden_files, Some(true));
        assert_eq!(update.overrides.last_wallpaper, None);
    }
}
