//! `docview open` command implementation.
//!
//! Boots the navigation controller on a bundle directory, the way a browser
//! would load the viewer at a URL, and prints the resulting page.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docview_config::RoutingSetting;
use docview_navigation::{
    LanguageSet, Location, MemoryLocation, NavigationController, NavigationEvent, codec_for,
};
use docview_storage::FilePreferences;

use super::{load_config, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the open command.
#[derive(Args)]
pub(crate) struct OpenArgs {
    /// Location to open: a fragment (`#/setup/install`) or a path
    /// (`/docs-platform/ko/setup/install`).
    #[arg(default_value = "/")]
    location: String,

    /// Path to configuration file (default: auto-discover docview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bundle directory (overrides config).
    #[arg(short, long, env = "DOCVIEW_BUNDLE_DIR")]
    bundle_dir: Option<PathBuf>,

    /// Routing mode: auto, hash or path (overrides config).
    #[arg(short, long)]
    mode: Option<RoutingSetting>,

    /// Hostname the viewer pretends to run on; picks the mode in `auto`.
    #[arg(long, default_value = "localhost")]
    hostname: String,

    /// Switch to this language after opening.
    #[arg(short, long)]
    lang: Option<String>,

    /// Print the raw content HTML instead of a summary.
    #[arg(long)]
    html: bool,
}

impl OpenArgs {
    /// Execute the open command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = load_config(self.config.as_deref(), self.bundle_dir, self.mode)?;
        let mode = config.routing.resolve(&self.hostname);
        let site = load_site(&config, mode)?;

        let mut viewer = NavigationController::new(
            site,
            codec_for(mode, config.site.normalized_prefix()),
            MemoryLocation::new(&self.hostname, &self.location),
            Arc::new(FilePreferences::new(
                config.paths_resolved.preferences_file.clone(),
            )),
            LanguageSet::from(&config.languages),
        );

        let pending = viewer.boot();
        viewer.run(pending);

        if let Some(lang) = self.lang {
            tracing::info!(language = %lang, "Switching language");
            let pending = viewer.dispatch(NavigationEvent::LanguageChanged(lang));
            viewer.run(pending);
        }

        print_page(&viewer, output, self.html);
        Ok(())
    }
}

fn print_page(viewer: &NavigationController<MemoryLocation>, output: &Output, html: bool) {
    let state = viewer.state();
    let shell = viewer.shell();

    output.highlight(&format!("{} ({} routing)", state.route(), viewer.routing_mode()));
    output.detail(&format!("Location: {}", viewer.location().snapshot().href()));
    output.detail(&format!("Layout: {}", shell.layout()));

    if let Some(toast) = shell.toast() {
        output.warning(toast.message(&state.language));
    }

    if let Some(sidebar) = shell.visible_sidebar() {
        output.separator();
        for category in sidebar.categories() {
            let marker = if category.expanded { "▾" } else { "▸" };
            output.info(&format!("{marker} {}", category.title));
            if !category.expanded {
                continue;
            }
            for item in &category.items {
                let line = format!("    {}  {}", item.title, item.href);
                if item.active {
                    output.success(&format!("{line}  *"));
                } else {
                    output.info(&line);
                }
            }
        }
    }

    output.separator();
    if html {
        output.data(shell.content());
    } else {
        output.data(&strip_tags(shell.content()));
    }
}

/// Plain-text rendering of the document pane.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    // `&amp;` goes last so escaped entities such as `&amp;lt;` stay literal.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<h1>Install &amp; run</h1>\n<p>Use <code>x</code></p>"),
            "Install & run\nUse x"
        );
    }

    #[test]
    fn test_strip_tags_keeps_escaped_entities_literal() {
        assert_eq!(strip_tags("<p>Write &amp;lt;br&amp;gt;</p>"), "Write &lt;br&gt;");
    }
}
