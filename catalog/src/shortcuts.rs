//! Built-in and configured shortcuts.

use std::path::PathBuf;

use azimuth_launchable::Launchable;

use crate::config::{CommandShortcut, ShortcutConfig};
use crate::notifier::{ChangeNotifier, ChangeSubscription};
use crate::provider::LaunchableProvider;

const NAME: &str = "shortcuts";

/// The user's well-known folders plus configured command lines.
///
/// Always available. The set only changes when the folders themselves
/// appear or vanish, which is picked up on the next enumeration.
#[derive(Debug)]
pub struct ShortcutProvider {
    config: ShortcutConfig,
    notifier: ChangeNotifier,
}

impl ShortcutProvider {
    pub fn new(config: ShortcutConfig) -> Self {
        Self {
            config,
            notifier: ChangeNotifier::new(NAME),
        }
    }

    /// The configured command shortcuts.
    pub fn commands(&self) -> &[CommandShortcut] {
        &self.config.commands
    }
}

impl Default for ShortcutProvider {
    fn default() -> Self {
        Self::new(ShortcutConfig::default())
    }
}

fn special_folders() -> Vec<PathBuf> {
    [
        dirs::document_dir(),
        dirs::audio_dir(),
        dirs::desktop_dir(),
        dirs::picture_dir(),
        dirs::video_dir(),
        dirs::download_dir(),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| p.is_dir())
    .collect()
}

impl LaunchableProvider for ShortcutProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn is_available(&self) -> bool {
        true
    }

    fn launchables(&self) -> Vec<Launchable> {
        let mut launchables: Vec<Launchable> = if self.config.special_folders {
            special_folders().into_iter().map(Launchable::folder).collect()
        } else {
            Vec::new()
        };
        launchables.extend(
            self.config
                .commands
                .iter()
                .map(|c| Launchable::shortcut(&c.name, &c.command)),
        );
        launchables
    }

    fn subscribe(&self) -> ChangeSubscription {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configured_commands() {
        let provider = ShortcutProvider::new(ShortcutConfig {
            special_folders: false,
            commands: vec![CommandShortcut::new("Terminal", "xterm -e bash")],
        });

        let launchables = provider.launchables();
        assert_eq!(launchables.len(), 1);
        assert_eq!(launchables[0].name(), "Terminal");
        assert_eq!(launchables[0].identity().as_str(), "xterm -e bash");
        assert!(provider.is_available());
    }

    #[test]
    fn test_special_folders_exist() {
        let provider = ShortcutProvider::new(ShortcutConfig {
            special_folders: true,
            commands: Vec::new(),
        });

        for launchable in provider.launchables() {
            assert!(launchable.path().is_some_and(|p| p.is_dir()));
        }
    }
}
